//! Console progress reporting for batch evaluations.
//!
//! Renders a fixed-width bar in the form
//! `[#########----------] 50% | task message : status message`.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

pub struct ProgressReporter {
    bar: ProgressBar,
    task_msg: String,
    status_msg: String,
}

impl ProgressReporter {
    /// Create a reporter drawing to stderr and render the empty bar.
    pub fn new(total: u64) -> Self {
        Self::build(ProgressBar::new(total), "", "")
    }

    /// Create a reporter with initial task and status messages.
    pub fn with_messages(total: u64, task_msg: &str, status_msg: &str) -> Self {
        Self::build(ProgressBar::new(total), task_msg, status_msg)
    }

    /// Create a reporter that renders nothing, for non-interactive runs.
    pub fn hidden(total: u64) -> Self {
        Self::build(
            ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::hidden()),
            "",
            "",
        )
    }

    fn build(bar: ProgressBar, task_msg: &str, status_msg: &str) -> Self {
        bar.set_style(
            ProgressStyle::with_template("[{bar:50}] {percent:>3}% | {msg}")
                .unwrap()
                .progress_chars("##-"),
        );
        let reporter = Self {
            bar,
            task_msg: task_msg.to_string(),
            status_msg: status_msg.to_string(),
        };
        reporter.render();
        reporter
    }

    /// Advance the bar. `None` increments by one; `Some` jumps to the
    /// given position. Empty messages keep the previous text.
    pub fn update(&mut self, current: Option<u64>, task_msg: &str, status_msg: &str) {
        match current {
            Some(position) => self.bar.set_position(position),
            None => self.bar.inc(1),
        }
        if !task_msg.is_empty() {
            self.task_msg = task_msg.to_string();
        }
        if !status_msg.is_empty() {
            self.status_msg = status_msg.to_string();
        }
        self.render();
    }

    /// Jump to 100% and finish the bar.
    pub fn complete(&mut self, status_msg: &str) {
        let total = self.bar.length().unwrap_or(0);
        self.update(Some(total), "", status_msg);
        self.bar.finish();
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }

    fn render(&self) {
        self.bar
            .set_message(format!("{} : {}", self.task_msg, self.status_msg));
    }
}
