use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use meiliscout_core::api::{TaskOutcome, TaskReporter};

const LINE_WIDTH: usize = 60;

/// Live renderer: a spinner while a task is awaited, then a dotted
/// `DONE` / `FAIL` line.
pub struct RichTaskReporter {
    spinners: Mutex<HashMap<String, ProgressBar>>,
}

impl RichTaskReporter {
    pub fn new() -> Self {
        Self {
            spinners: Mutex::new(HashMap::new()),
        }
    }

    fn status_line(description: &str, outcome: &TaskOutcome) -> String {
        let verdict = if outcome.is_success() { "DONE" } else { "FAIL" };
        let dots = LINE_WIDTH.saturating_sub(description.chars().count() + verdict.len() + 2);
        let mut line = format!("  {} {} {}", description, ".".repeat(dots.max(3)), verdict);
        if !outcome.is_success() {
            line.push_str(&format!(" ({outcome})"));
        }
        line
    }
}

impl Default for RichTaskReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskReporter for RichTaskReporter {
    fn name(&self) -> &str {
        "rich"
    }

    fn task_started(&self, description: &str) {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("  {spinner:.green} {msg}")
            .map(|s| s.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✔"]))
        {
            bar.set_style(style);
        }
        bar.set_message(description.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut spinners) = self.spinners.lock() {
            spinners.insert(description.to_string(), bar);
        }
    }

    fn task_finished(&self, description: &str, outcome: &TaskOutcome) {
        let bar = self
            .spinners
            .lock()
            .ok()
            .and_then(|mut spinners| spinners.remove(description));
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
        println!("{}", Self::status_line(description, outcome));
    }

    fn info(&self, message: &str) {
        println!();
        println!("  INFO  {message}");
        println!();
    }

    fn error(&self, message: &str) {
        eprintln!();
        eprintln!("  ERROR  {message}");
        eprintln!();
    }
}

impl Drop for RichTaskReporter {
    fn drop(&mut self) {
        if let Ok(mut spinners) = self.spinners.lock() {
            for (_, bar) in spinners.drain() {
                bar.finish_and_clear();
            }
        }
    }
}
