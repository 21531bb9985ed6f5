use serde::Serialize;

use crate::engine::{SearchEngine, WaitOptions};
use crate::error::UpdateError;
use crate::model::{ModelRegistry, MEILISEARCH_ENGINE};
use crate::report::TaskReporter;
use crate::settings::{resolve_attributes, ResolvedAttributes};
use crate::tasks::{reconcile, submit_updates, RetryStrategy, TaskReport, UpdateTask};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Fully-qualified model type name.
    pub model: String,
    /// Block until every submitted task is terminal.
    pub wait: bool,
}

/// Collaborators used by [`run_update`].
pub struct UpdateContext<'a> {
    pub registry: &'a ModelRegistry,
    pub engine: &'a dyn SearchEngine,
    pub retry: &'a dyn RetryStrategy,
    pub reporter: &'a dyn TaskReporter,
    pub wait_options: WaitOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateSummary {
    pub run_id: String,
    pub model: String,
    pub index: String,
    pub attributes: ResolvedAttributes,
    pub tasks: Vec<UpdateTask>,
    /// `None` unless waiting was requested.
    pub outcomes: Option<Vec<TaskReport>>,
}

impl UpdateSummary {
    /// True when no waited task failed. Always true without `--wait`.
    pub fn all_succeeded(&self) -> bool {
        self.outcomes
            .as_ref()
            .map(|reports| reports.iter().all(|r| r.outcome.is_success()))
            .unwrap_or(true)
    }
}

/// Syncs a model's attribute settings to its index.
///
/// Validates the model and its engine, resolves the attribute sets,
/// submits one update per non-empty set and, when asked to, waits for and
/// reports each task.
#[tracing::instrument(
    name = "scout.update",
    skip(request, ctx),
    fields(model = %request.model, wait = request.wait, run_id = tracing::field::Empty)
)]
pub async fn run_update(
    request: &UpdateRequest,
    ctx: &UpdateContext<'_>,
) -> Result<UpdateSummary, UpdateError> {
    let run_id = uuid::Uuid::new_v4().to_string();
    tracing::Span::current().record("run_id", run_id.as_str());

    let model = ctx.registry.resolve_searchable(&request.model)?;

    let engine_kind = model.search_engine();
    if engine_kind != MEILISEARCH_ENGINE || ctx.engine.kind() != MEILISEARCH_ENGINE {
        tracing::debug!(
            model_engine = %engine_kind,
            client_engine = %ctx.engine.kind(),
            "engine not supported"
        );
        return Err(UpdateError::UnsupportedEngine {
            model: request.model.clone(),
            engine: engine_kind.to_string(),
        });
    }

    let index_uid = model.searchable_as();
    let attributes = resolve_attributes(model.as_ref());
    let index = ctx.engine.index(&index_uid);

    let tasks = submit_updates(index.as_ref(), &attributes).await?;
    tracing::info!(index = %index_uid, submitted = tasks.len(), "attribute updates submitted");

    let outcomes = if request.wait && !tasks.is_empty() {
        let reports = reconcile(
            index.as_ref(),
            &tasks,
            ctx.wait_options,
            ctx.retry,
            ctx.reporter,
        )
        .await;
        let failed = reports.iter().filter(|r| !r.outcome.is_success()).count();
        tracing::info!(index = %index_uid, waited = reports.len(), failed, "attribute updates reconciled");
        Some(reports)
    } else {
        None
    };

    ctx.reporter.info(&format!(
        "Index {} [{}] settings updated successfully.",
        index_uid, request.model
    ));

    Ok(UpdateSummary {
        run_id,
        model: request.model.clone(),
        index: index_uid,
        attributes,
        tasks,
        outcomes,
    })
}
