use meiliscout_core::api::{outcome_line, TaskOutcome, TaskReporter};

/// One line per event on stdout/stderr.
pub struct PlainTaskReporter;

impl PlainTaskReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTaskReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskReporter for PlainTaskReporter {
    fn name(&self) -> &str {
        "plain"
    }

    fn task_finished(&self, description: &str, outcome: &TaskOutcome) {
        let line = outcome_line(description, outcome);
        if outcome.is_success() {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    }

    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{message}");
    }
}
