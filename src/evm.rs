use crate::calendar::BusinessCalendar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// All metrics are rounded to 3 decimal places; later formulas consume
/// the rounded values of earlier ones.
const ROUND_SCALE: f64 = 1000.0;

fn round_metric(value: f64) -> f64 {
    (value * ROUND_SCALE).round() / ROUND_SCALE
}

/// One task's snapshot, frozen for the duration of an evaluation.
///
/// The status flags are mutually informative; the caller guarantees at
/// most one is conceptually current, the engine does not enforce it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvmInput {
    pub ended: bool,
    pub ongoing: bool,
    pub not_yet: bool,
    pub on_hold: bool,
    pub rejected: bool,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub actual_start_date: Option<NaiveDate>,
    pub actual_due_date: Option<NaiveDate>,
    /// Completion percentage, 0-100.
    pub done_ratio: f64,
    pub estimated_hours: f64,
    pub spent_hours: f64,
}

/// The eleven computed metrics, already rounded to 3 decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EvmMetrics {
    pub pv: f64,
    pub ev: f64,
    pub ac: f64,
    pub sv: f64,
    pub cv: f64,
    pub spi: f64,
    pub cpi: f64,
    pub bac: f64,
    pub etc: f64,
    pub eac: f64,
    pub vac: f64,
}

/// Per-task EVM calculator.
///
/// Usage is `set_input_data` followed by `calculate`; the accessors
/// return the last computed values (0 before the first `calculate`).
/// An engine may be reused across recalculations as long as each
/// `calculate` is preceded by a fresh `set_input_data`.
///
/// Calling `calculate` without input is safe: the engine evaluates the
/// empty default snapshot (no dates, zero hours), which resolves every
/// metric through its degenerate branch without panicking.
#[derive(Debug, Default)]
pub struct EvmEngine {
    input: Option<EvmInput>,
    as_of_date: Option<NaiveDate>,
    total_days: i64,
    spent_days: i64,
    metrics: EvmMetrics,
}

impl EvmEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store one task's snapshot and derive its working-day counts from
    /// the calendar. Does not trigger calculation.
    ///
    /// Rejected tasks and tasks without a planned schedule get zero
    /// working days.
    pub fn set_input_data(
        &mut self,
        input: EvmInput,
        as_of_date: NaiveDate,
        calendar: &BusinessCalendar,
    ) {
        match (input.rejected, input.start_date, input.due_date) {
            (false, Some(start), Some(due)) => {
                self.total_days = calendar.count_business_days(start, due);
                self.spent_days = calendar.count_business_days(start, as_of_date);
            }
            _ => {
                self.total_days = 0;
                self.spent_days = 0;
            }
        }
        self.input = Some(input);
        self.as_of_date = Some(as_of_date);
    }

    /// Compute all eleven metrics in dependency order. Each metric is
    /// rounded before later ones consume it.
    pub fn calculate(&mut self) {
        let input = self.input.clone().unwrap_or_default();
        self.metrics.pv = self.calculate_pv(&input);
        self.metrics.ev = self.calculate_ev(&input);
        self.metrics.ac = self.calculate_ac(&input);
        self.metrics.sv = self.calculate_sv();
        self.metrics.cv = self.calculate_cv();
        self.metrics.spi = self.calculate_spi();
        self.metrics.cpi = self.calculate_cpi();
        self.metrics.bac = self.calculate_bac(&input);
        self.metrics.etc = self.calculate_etc();
        self.metrics.eac = self.calculate_eac();
        self.metrics.vac = self.calculate_vac();
        debug!(
            total_days = self.total_days,
            spent_days = self.spent_days,
            pv = self.metrics.pv,
            ev = self.metrics.ev,
            ac = self.metrics.ac,
            "calculated EVM metrics"
        );
    }

    /// PV = estimated hours, prorated by elapsed working days while the
    /// planned period is still running.
    fn calculate_pv(&self, input: &EvmInput) -> f64 {
        let pv = if input.rejected || input.start_date.is_none() || input.due_date.is_none() {
            // No usable schedule
            0.0
        } else if self.spent_days < self.total_days {
            if self.total_days == 0 {
                0.0
            } else {
                input.estimated_hours * self.spent_days as f64 / self.total_days as f64
            }
        } else {
            // Planned period fully elapsed or overrun
            input.estimated_hours
        };
        round_metric(pv)
    }

    /// EV = estimated hours x completion ratio; an ended task counts as
    /// 100% regardless of the recorded ratio.
    fn calculate_ev(&self, input: &EvmInput) -> f64 {
        let ev = if input.ended {
            input.estimated_hours
        } else {
            input.estimated_hours * input.done_ratio / 100.0
        };
        round_metric(ev)
    }

    /// AC = spent hours.
    fn calculate_ac(&self, input: &EvmInput) -> f64 {
        round_metric(input.spent_hours)
    }

    /// SV = EV - PV.
    fn calculate_sv(&self) -> f64 {
        round_metric(self.metrics.ev - self.metrics.pv)
    }

    /// CV = EV - AC.
    fn calculate_cv(&self) -> f64 {
        round_metric(self.metrics.ev - self.metrics.ac)
    }

    /// SPI = EV / PV; a zero PV means "not yet started", reported as the
    /// neutral index 1. Exact zero check, no epsilon.
    fn calculate_spi(&self) -> f64 {
        let spi = if self.metrics.pv == 0.0 {
            1.0
        } else {
            self.metrics.ev / self.metrics.pv
        };
        round_metric(spi)
    }

    /// CPI = EV / AC; a zero AC is reported as the neutral index 1.
    fn calculate_cpi(&self) -> f64 {
        let cpi = if self.metrics.ac == 0.0 {
            1.0
        } else {
            self.metrics.ev / self.metrics.ac
        };
        round_metric(cpi)
    }

    /// BAC = estimated hours.
    fn calculate_bac(&self, input: &EvmInput) -> f64 {
        round_metric(input.estimated_hours)
    }

    /// ETC = (BAC - EV) / CPI; a zero CPI yields 0 so EAC stays defined.
    fn calculate_etc(&self) -> f64 {
        let etc = if self.metrics.cpi == 0.0 {
            0.0
        } else {
            (self.metrics.bac - self.metrics.ev) / self.metrics.cpi
        };
        round_metric(etc)
    }

    /// EAC = AC + ETC.
    fn calculate_eac(&self) -> f64 {
        round_metric(self.metrics.ac + self.metrics.etc)
    }

    /// VAC = BAC - EAC.
    fn calculate_vac(&self) -> f64 {
        round_metric(self.metrics.bac - self.metrics.eac)
    }

    /// Working days in the planned period, as derived by the last
    /// `set_input_data`.
    pub fn total_days(&self) -> i64 {
        self.total_days
    }

    /// Evaluation date of the last `set_input_data`.
    pub fn as_of_date(&self) -> Option<NaiveDate> {
        self.as_of_date
    }

    /// Working days elapsed up to the as-of date.
    pub fn spent_days(&self) -> i64 {
        self.spent_days
    }

    /// All eleven metrics as one record, for the export layer.
    pub fn metrics(&self) -> EvmMetrics {
        self.metrics
    }

    pub fn pv(&self) -> f64 {
        self.metrics.pv
    }

    pub fn ev(&self) -> f64 {
        self.metrics.ev
    }

    pub fn ac(&self) -> f64 {
        self.metrics.ac
    }

    pub fn sv(&self) -> f64 {
        self.metrics.sv
    }

    pub fn cv(&self) -> f64 {
        self.metrics.cv
    }

    pub fn spi(&self) -> f64 {
        self.metrics.spi
    }

    pub fn cpi(&self) -> f64 {
        self.metrics.cpi
    }

    pub fn bac(&self) -> f64 {
        self.metrics.bac
    }

    pub fn etc(&self) -> f64 {
        self.metrics.etc
    }

    pub fn eac(&self) -> f64 {
        self.metrics.eac
    }

    pub fn vac(&self) -> f64 {
        self.metrics.vac
    }
}
