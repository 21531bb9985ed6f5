use serde::Serialize;

use crate::engine::{SearchIndex, TaskUid};
use crate::error::UpdateError;
use crate::settings::{AttributeCategory, ResolvedAttributes};

/// An accepted attribute update and the handle to track it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateTask {
    pub category: AttributeCategory,
    pub description: &'static str,
    /// `None` when the engine response carried no task identifier.
    pub task_uid: Option<TaskUid>,
}

/// Issues one update call per non-empty category, in the fixed
/// searchable/displayable/filterable/sortable order.
///
/// The first failing call aborts the submission. Updates accepted before
/// it stay queued on the engine.
pub async fn submit_updates(
    index: &dyn SearchIndex,
    resolved: &ResolvedAttributes,
) -> Result<Vec<UpdateTask>, UpdateError> {
    let mut tasks = Vec::with_capacity(AttributeCategory::ALL.len());

    for (category, fields) in resolved.non_empty() {
        let description = category.description();
        tracing::debug!(
            stage = "update.submit.in",
            index = %index.uid(),
            category = %category,
            fields = ?fields.as_slice()
        );

        let info = index
            .update_attributes(category, fields.as_slice())
            .await
            .map_err(|source| UpdateError::Submission {
                description,
                index: index.uid().to_string(),
                source,
            })?;

        if info.task_uid.is_none() {
            tracing::warn!(
                index = %index.uid(),
                category = %category,
                "update accepted without a task uid"
            );
        }
        tracing::debug!(
            stage = "update.submit.out",
            index = %index.uid(),
            category = %category,
            task_uid = ?info.task_uid
        );

        tasks.push(UpdateTask {
            category,
            description,
            task_uid: info.task_uid,
        });
    }

    Ok(tasks)
}
