use chrono::{Datelike, Local, NaiveDate};
use evm_tool::calendar::BusinessCalendar;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn default_mode_weekends_are_holidays() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    // 2025-01-04 is a Saturday, 2025-01-05 is a Sunday
    assert!(cal.is_holiday(date(2025, 1, 4)));
    assert!(cal.is_holiday(date(2025, 1, 5)));
}

#[test]
fn default_mode_plain_weekday_is_working() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    // 2025-01-02 is a Thursday and not a public holiday
    assert!(!cal.is_holiday(date(2025, 1, 2)));
}

#[test]
fn fixed_japanese_holidays() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    assert!(cal.is_holiday(date(2025, 1, 1))); // New Year's Day
    assert!(cal.is_holiday(date(2025, 2, 11))); // National Foundation Day
    assert!(cal.is_holiday(date(2025, 4, 29))); // Showa Day
    assert!(cal.is_holiday(date(2025, 11, 3))); // Culture Day
    assert!(cal.is_holiday(date(2025, 11, 23))); // Labour Thanksgiving Day
}

#[test]
fn monday_anchored_holidays() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    // Coming of Age Day: 2nd Monday of January 2025 = Jan 13
    assert!(cal.is_holiday(date(2025, 1, 13)));
    // Respect for the Aged Day: 3rd Monday of September 2025 = Sep 15
    assert!(cal.is_holiday(date(2025, 9, 15)));
    // Sports Day: 2nd Monday of October 2025 = Oct 13
    assert!(cal.is_holiday(date(2025, 10, 13)));
}

#[test]
fn equinox_holidays() {
    let cal = BusinessCalendar::with_year_range(2025, 2026);
    assert!(cal.is_holiday(date(2025, 3, 20))); // Vernal Equinox 2025
    assert!(cal.is_holiday(date(2025, 9, 23))); // Autumnal Equinox 2025
    assert!(cal.is_holiday(date(2026, 3, 20))); // Vernal Equinox 2026
}

#[test]
fn substitute_holiday_rolls_to_monday() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    // Emperor's Birthday 2025-02-23 falls on a Sunday; Monday is off
    assert!(cal.is_holiday(date(2025, 2, 23)));
    assert!(cal.is_holiday(date(2025, 2, 24)));
    assert!(!cal.is_holiday(date(2025, 2, 25)));
}

#[test]
fn substitute_holiday_skips_the_may_cluster() {
    let cal = BusinessCalendar::with_year_range(2026, 2026);
    // Constitution Memorial Day 2026-05-03 is a Sunday; May 4 and 5 are
    // already holidays, so the substitute lands on May 6
    assert!(cal.is_holiday(date(2026, 5, 3)));
    assert!(cal.is_holiday(date(2026, 5, 4)));
    assert!(cal.is_holiday(date(2026, 5, 5)));
    assert!(cal.is_holiday(date(2026, 5, 6)));
    assert!(!cal.is_holiday(date(2026, 5, 7)));
}

#[test]
fn citizens_holiday_between_september_holidays() {
    let cal = BusinessCalendar::with_year_range(2026, 2026);
    // Respect for the Aged Day 2026-09-21 (Mon) and Autumnal Equinox
    // 2026-09-23 (Wed) sandwich Tuesday the 22nd
    assert!(cal.is_holiday(date(2026, 9, 21)));
    assert!(cal.is_holiday(date(2026, 9, 22)));
    assert!(cal.is_holiday(date(2026, 9, 23)));
}

#[test]
fn year_range_arguments_are_normalized() {
    let forward = BusinessCalendar::with_year_range(2024, 2026);
    let backward = BusinessCalendar::with_year_range(2026, 2024);
    assert_eq!(forward, backward);
}

#[test]
fn default_calendar_covers_base_year_through_lookahead() {
    let cal = BusinessCalendar::default();
    assert!(cal.is_holiday(date(2020, 1, 1)));
    let last_year = Local::now().date_naive().year() + 3;
    assert!(cal.is_holiday(date(last_year, 1, 1)));
}

#[test]
fn custom_mode_uses_exactly_the_given_dates() {
    let cal = BusinessCalendar::from_holidays(vec![date(2025, 6, 2)]);
    assert!(cal.is_holiday(date(2025, 6, 2)));
    // No weekday exclusions in custom mode: 2025-06-07 is a Saturday
    assert!(!cal.is_holiday(date(2025, 6, 7)));
    assert!(!cal.is_holiday(date(2025, 6, 8)));
}

#[test]
fn empty_custom_list_makes_every_day_working() {
    let cal = BusinessCalendar::from_holidays(vec![]);
    let mut current = date(2025, 1, 1);
    while current <= date(2025, 1, 31) {
        assert!(!cal.is_holiday(current));
        current = current.succ_opt().unwrap();
    }
}

#[test]
fn most_recent_working_day_is_identity_on_working_days() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    // 2025-01-08 is a plain Wednesday
    assert_eq!(cal.most_recent_working_day(date(2025, 1, 8)), date(2025, 1, 8));
}

#[test]
fn most_recent_working_day_walks_back_over_weekend() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    // Sunday 2025-01-05 rolls back to Friday 2025-01-03
    assert_eq!(cal.most_recent_working_day(date(2025, 1, 5)), date(2025, 1, 3));
}

#[test]
fn most_recent_working_day_walks_back_over_long_weekend() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    // Substitute holiday Monday 2025-02-24 rolls back across the weekend
    // to Friday 2025-02-21
    assert_eq!(
        cal.most_recent_working_day(date(2025, 2, 24)),
        date(2025, 2, 21)
    );
}

#[test]
fn first_day_of_week_is_monday() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    // Wednesday 2025-01-08 and Sunday 2025-01-12 share the week of Jan 6
    assert_eq!(cal.first_day_of_week(date(2025, 1, 8)), date(2025, 1, 6));
    assert_eq!(cal.first_day_of_week(date(2025, 1, 12)), date(2025, 1, 6));
    assert_eq!(cal.first_day_of_week(date(2025, 1, 6)), date(2025, 1, 6));
}

#[test]
fn first_day_of_month_is_the_first() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    assert_eq!(cal.first_day_of_month(date(2025, 2, 15)), date(2025, 2, 1));
    assert_eq!(cal.first_day_of_month(date(2025, 2, 1)), date(2025, 2, 1));
}

#[test]
fn count_business_days_over_a_plain_week() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    // Mon 2025-01-06 through Fri 2025-01-10, no holidays
    assert_eq!(cal.count_business_days(date(2025, 1, 6), date(2025, 1, 10)), 5);
}

#[test]
fn count_business_days_skips_holidays() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    // Mon 2025-01-13 is Coming of Age Day
    assert_eq!(cal.count_business_days(date(2025, 1, 13), date(2025, 1, 17)), 4);
}

#[test]
fn count_business_days_inverted_range_is_zero() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    assert_eq!(cal.count_business_days(date(2025, 1, 10), date(2025, 1, 6)), 0);
}

#[test]
fn count_business_days_single_day() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    // A working Tuesday counts as 1
    assert_eq!(cal.count_business_days(date(2025, 1, 7), date(2025, 1, 7)), 1);
    // A Saturday counts as 0
    assert_eq!(cal.count_business_days(date(2025, 1, 4), date(2025, 1, 4)), 0);
}

#[test]
fn count_business_days_spanning_a_weekend() {
    let cal = BusinessCalendar::with_year_range(2025, 2025);
    // Fri 2025-01-10 through Tue 2025-01-14; Mon Jan 13 is a holiday
    assert_eq!(cal.count_business_days(date(2025, 1, 10), date(2025, 1, 14)), 2);
}
