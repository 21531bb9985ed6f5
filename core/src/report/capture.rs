use std::sync::Mutex;

use crate::tasks::TaskOutcome;

use super::{outcome_line, TaskReporter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Info(String),
    Error(String),
}

/// Keeps every reported line in memory instead of printing it.
#[derive(Debug, Default)]
pub struct CapturingReporter {
    lines: Mutex<Vec<ReportLine>>,
}

impl CapturingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<ReportLine> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Line texts regardless of level.
    pub fn texts(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .map(|line| match line {
                ReportLine::Info(s) | ReportLine::Error(s) => s,
            })
            .collect()
    }

    fn push(&self, line: ReportLine) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl TaskReporter for CapturingReporter {
    fn name(&self) -> &str {
        "capture"
    }

    fn task_finished(&self, description: &str, outcome: &TaskOutcome) {
        let line = outcome_line(description, outcome);
        if outcome.is_success() {
            self.push(ReportLine::Info(line));
        } else {
            self.push(ReportLine::Error(line));
        }
    }

    fn info(&self, message: &str) {
        self.push(ReportLine::Info(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(ReportLine::Error(message.to_string()));
    }
}
