use std::fmt;

use serde::Serialize;

use crate::engine::{Task, TaskStatus, TaskUid};
use crate::settings::AttributeCategory;

/// Final state of one submitted update, as observed while waiting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TaskOutcome {
    Succeeded,
    /// Terminal status other than `succeeded`.
    Failed {
        status: TaskStatus,
        message: Option<String>,
    },
    /// The update response had no task identifier to wait on.
    MissingHandle,
    /// The wait budget ran out before the task finished.
    TimedOut { waited_ms: u64 },
    /// Status polling kept failing until retries were exhausted.
    Unreachable { error: String },
}

impl TaskOutcome {
    pub fn from_task(task: &Task) -> Self {
        match task.status {
            TaskStatus::Succeeded => Self::Succeeded,
            ref other => Self::Failed {
                status: other.clone(),
                message: task.error.as_ref().map(|e| e.message.clone()),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => f.write_str("succeeded"),
            Self::Failed { status, message } => match message {
                Some(msg) => write!(f, "{status}: {msg}"),
                None => write!(f, "{status}"),
            },
            Self::MissingHandle => f.write_str("no task uid returned"),
            Self::TimedOut { waited_ms } => write!(f, "timed out after {waited_ms}ms"),
            Self::Unreachable { error } => write!(f, "unreachable: {error}"),
        }
    }
}

/// One reconciled entry, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskReport {
    pub category: AttributeCategory,
    pub description: &'static str,
    pub task_uid: Option<TaskUid>,
    pub outcome: TaskOutcome,
}
