//! Presentation seam for command output.
//!
//! The command layer never prints directly; it hands lines and task
//! progress to a [`TaskReporter`] chosen by the caller.
mod capture;

pub use capture::{CapturingReporter, ReportLine};

use crate::tasks::TaskOutcome;

pub trait TaskReporter: Send + Sync {
    fn name(&self) -> &str;

    /// Called before waiting on a task. Live renderers start a spinner here.
    fn task_started(&self, _description: &str) {}

    fn task_finished(&self, description: &str, outcome: &TaskOutcome);

    fn info(&self, message: &str);

    fn error(&self, message: &str);
}

/// `"<description> done successfully"` / `"<description> done unsuccessfully"`.
pub fn outcome_line(description: &str, outcome: &TaskOutcome) -> String {
    let verdict = if outcome.is_success() {
        "successfully"
    } else {
        "unsuccessfully"
    };
    format!("{description} done {verdict}")
}
