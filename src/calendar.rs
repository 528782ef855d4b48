use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// First year covered by the default holiday enumeration.
const BASE_YEAR: i32 = 2020;

/// Years of lookahead past the current year, so due dates set a few
/// years out still resolve against a populated holiday set.
const LOOKAHEAD_YEARS: i32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessCalendar {
    holidays: HashSet<NaiveDate>,
    non_working_days: HashSet<Weekday>,
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        let current_year = Local::now().date_naive().year();
        Self::with_year_range(BASE_YEAR, current_year + LOOKAHEAD_YEARS)
    }
}

impl BusinessCalendar {
    /// Create a calendar with Japanese public holidays and a Mon-Fri work
    /// week for an inclusive range of years.
    pub fn with_year_range(start_year: i32, end_year: i32) -> Self {
        let (start, end) = if start_year <= end_year {
            (start_year, end_year)
        } else {
            (end_year, start_year)
        };

        let mut calendar = Self {
            holidays: HashSet::new(),
            non_working_days: HashSet::from([Weekday::Sat, Weekday::Sun]),
        };

        for year in start..=end {
            calendar.add_japan_holidays(year);
        }
        debug!(
            start_year = start,
            end_year = end,
            holidays = calendar.holidays.len(),
            "enumerated default holiday set"
        );
        calendar
    }

    /// Create a calendar from an explicit set of non-working dates.
    ///
    /// The supplied dates are the complete non-working set: no weekday
    /// exclusions are added, so an empty list means every day is a
    /// working day.
    pub fn from_holidays<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        Self {
            holidays: dates.into_iter().collect(),
            non_working_days: HashSet::new(),
        }
    }

    /// Add Japanese public holidays for a given year, including substitute
    /// holidays and sandwiched citizen's holidays.
    fn add_japan_holidays(&mut self, year: i32) {
        let mut days: Vec<NaiveDate> = Vec::new();

        // New Year's Day
        days.push(NaiveDate::from_ymd_opt(year, 1, 1).unwrap());

        // Coming of Age Day (2nd Monday in January)
        days.push(Self::nth_weekday(year, 1, Weekday::Mon, 2));

        // National Foundation Day
        days.push(NaiveDate::from_ymd_opt(year, 2, 11).unwrap());

        // Emperor's Birthday (Feb 23 since 2020)
        if year >= 2020 {
            days.push(NaiveDate::from_ymd_opt(year, 2, 23).unwrap());
        }

        // Vernal Equinox Day
        days.push(NaiveDate::from_ymd_opt(year, 3, Self::vernal_equinox_day(year)).unwrap());

        // Showa Day
        days.push(NaiveDate::from_ymd_opt(year, 4, 29).unwrap());

        // Constitution Memorial Day, Greenery Day, Children's Day
        days.push(NaiveDate::from_ymd_opt(year, 5, 3).unwrap());
        days.push(NaiveDate::from_ymd_opt(year, 5, 4).unwrap());
        days.push(NaiveDate::from_ymd_opt(year, 5, 5).unwrap());

        // Marine Day (3rd Monday in July; moved for the Tokyo Olympics)
        match year {
            2020 => days.push(NaiveDate::from_ymd_opt(2020, 7, 23).unwrap()),
            2021 => days.push(NaiveDate::from_ymd_opt(2021, 7, 22).unwrap()),
            _ => days.push(Self::nth_weekday(year, 7, Weekday::Mon, 3)),
        }

        // Mountain Day (Aug 11 since 2016; moved for the Tokyo Olympics)
        match year {
            2020 => days.push(NaiveDate::from_ymd_opt(2020, 8, 10).unwrap()),
            2021 => days.push(NaiveDate::from_ymd_opt(2021, 8, 8).unwrap()),
            y if y >= 2016 => days.push(NaiveDate::from_ymd_opt(year, 8, 11).unwrap()),
            _ => {}
        }

        // Respect for the Aged Day (3rd Monday in September)
        days.push(Self::nth_weekday(year, 9, Weekday::Mon, 3));

        // Autumnal Equinox Day
        days.push(NaiveDate::from_ymd_opt(year, 9, Self::autumnal_equinox_day(year)).unwrap());

        // Sports Day (2nd Monday in October; moved for the Tokyo Olympics)
        match year {
            2020 => days.push(NaiveDate::from_ymd_opt(2020, 7, 24).unwrap()),
            2021 => days.push(NaiveDate::from_ymd_opt(2021, 7, 23).unwrap()),
            _ => days.push(Self::nth_weekday(year, 10, Weekday::Mon, 2)),
        }

        // Culture Day
        days.push(NaiveDate::from_ymd_opt(year, 11, 3).unwrap());

        // Labour Thanksgiving Day
        days.push(NaiveDate::from_ymd_opt(year, 11, 23).unwrap());

        let base: HashSet<NaiveDate> = days.into_iter().collect();

        // Substitute holiday: a holiday on Sunday rolls forward to the
        // next day that is not already a holiday.
        for &day in &base {
            if day.weekday() == Weekday::Sun {
                let mut substitute = day + Duration::days(1);
                while base.contains(&substitute) {
                    substitute = substitute + Duration::days(1);
                }
                self.holidays.insert(substitute);
            }
        }

        // Citizen's holiday: a non-Sunday day sandwiched between two
        // holidays is itself a holiday (September equinox cluster).
        for &day in &base {
            let middle = day + Duration::days(1);
            if base.contains(&(middle + Duration::days(1)))
                && !base.contains(&middle)
                && middle.weekday() != Weekday::Sun
            {
                self.holidays.insert(middle);
            }
        }

        self.holidays.extend(base);
    }

    /// Approximate Vernal Equinox day-of-month for March. The actual date
    /// is proclaimed annually; the formula tracks it for recent decades.
    fn vernal_equinox_day(year: i32) -> u32 {
        let y = year as f64;
        (20.8431 + 0.242194 * (y - 1980.0) - ((y - 1980.0) / 4.0).floor()) as u32
    }

    /// Approximate Autumnal Equinox day-of-month for September.
    fn autumnal_equinox_day(year: i32) -> u32 {
        let y = year as f64;
        (23.2488 + 0.242194 * (y - 1980.0) - ((y - 1980.0) / 4.0).floor()) as u32
    }

    /// Helper: Find the nth occurrence of a weekday in a month
    fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> NaiveDate {
        let mut date = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let mut count = 0;

        while date.month() == month {
            if date.weekday() == weekday {
                count += 1;
                if count == n {
                    return date;
                }
            }
            date = date + Duration::days(1);
        }
        panic!("Could not find {}th {} in {}/{}", n, weekday, month, year);
    }

    /// Check if a date is non-working (holiday or non-working weekday)
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date) || self.non_working_days.contains(&date.weekday())
    }

    /// Return the date itself when it is a working day, otherwise walk
    /// backward one day at a time until a working day is found.
    pub fn most_recent_working_day(&self, date: NaiveDate) -> NaiveDate {
        let mut current = date;
        while self.is_holiday(current) {
            current = current - Duration::days(1);
        }
        current
    }

    /// Monday of the ISO week containing the date. Pure calendar
    /// arithmetic, does not consult the holiday set.
    pub fn first_day_of_week(&self, date: NaiveDate) -> NaiveDate {
        date.week(Weekday::Mon).first_day()
    }

    /// First calendar day of the month containing the date.
    pub fn first_day_of_month(&self, date: NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap()
    }

    /// Count working days in `[start, end]` inclusive. An inverted range
    /// (`end < start`) counts as an empty span and yields 0.
    pub fn count_business_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let mut count = 0;
        let mut current = start;

        while current <= end {
            if !self.is_holiday(current) {
                count += 1;
            }
            current = current + Duration::days(1);
        }
        count
    }
}
