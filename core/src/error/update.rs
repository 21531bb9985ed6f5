use thiserror::Error;

/// Failures that abort a `scout:update` run.
///
/// Per-task reconciliation failures are not errors; they surface as
/// [`crate::tasks::TaskOutcome`] values instead.
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("This model is not searchable.")]
    ModelNotSearchable(String),

    #[error("Meilisearch is the only supported engine for the sorts and/or filters.")]
    UnsupportedEngine { model: String, engine: String },

    #[error("{description} failed on index {index}: {source}")]
    Submission {
        description: &'static str,
        index: String,
        #[source]
        source: anyhow::Error,
    },
}

impl UpdateError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ModelNotSearchable(_) => 1,
            Self::UnsupportedEngine { .. } => 2,
            Self::Submission { .. } => 20,
        }
    }

    /// Precondition failures are raised before any remote call is made.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::ModelNotSearchable(_) | Self::UnsupportedEngine { .. }
        )
    }
}
