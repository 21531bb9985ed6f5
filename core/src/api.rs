//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `meiliscout_core::api` instead of reaching into internal modules.

pub use crate::command::{run_update, UpdateContext, UpdateRequest, UpdateSummary};
pub use crate::config::{
    get_data_dir, load_default, load_from_path, AppConfig, LoggingConfig, MeilisearchConfig,
    ModelConfig, OutputConfig, RetryConfig, ScoutConfig, WaitConfig,
};
pub use crate::engine::{
    SearchEngine, SearchIndex, Task, TaskInfo, TaskStatus, TaskUid, WaitOptions, WaitTimedOut,
};
pub use crate::error::{CliError, UpdateError};
pub use crate::model::{
    DeclaredModel, HasDisplayableAttributes, HasFilterableAttributes, HasSortableAttributes,
    ModelRegistry, RegisteredModel, Searchable, SearchableSettings, SettingsProvider,
    MEILISEARCH_ENGINE,
};
pub use crate::report::{outcome_line, CapturingReporter, ReportLine, TaskReporter};
pub use crate::settings::{
    resolve_attributes, AttributeCategory, AttributeSet, ResolvedAttributes, SettingsSource,
};
pub use crate::tasks::{
    reconcile, submit_updates, wait_gracefully, NoRetry, RetryStrategy, TaskOutcome, TaskReport,
    UpdateTask,
};
