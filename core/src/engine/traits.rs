use std::sync::Arc;

use async_trait::async_trait;

use crate::settings::AttributeCategory;

use super::types::{Task, TaskInfo, TaskUid, WaitOptions};

/// One remote index.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    fn uid(&self) -> &str;

    async fn update_searchable_attributes(&self, fields: &[String]) -> anyhow::Result<TaskInfo>;
    async fn update_displayed_attributes(&self, fields: &[String]) -> anyhow::Result<TaskInfo>;
    async fn update_filterable_attributes(&self, fields: &[String]) -> anyhow::Result<TaskInfo>;
    async fn update_sortable_attributes(&self, fields: &[String]) -> anyhow::Result<TaskInfo>;

    /// Polls until the task is terminal. Fails with
    /// [`super::WaitTimedOut`] once `options.timeout` is exhausted.
    async fn wait_for_task(&self, task_uid: TaskUid, options: WaitOptions)
        -> anyhow::Result<Task>;

    /// Dispatches to the update call matching `category`.
    async fn update_attributes(
        &self,
        category: AttributeCategory,
        fields: &[String],
    ) -> anyhow::Result<TaskInfo> {
        match category {
            AttributeCategory::Searchable => self.update_searchable_attributes(fields).await,
            AttributeCategory::Displayable => self.update_displayed_attributes(fields).await,
            AttributeCategory::Filterable => self.update_filterable_attributes(fields).await,
            AttributeCategory::Sortable => self.update_sortable_attributes(fields).await,
        }
    }
}

/// A search engine client.
pub trait SearchEngine: Send + Sync {
    /// Engine identifier compared against a model's configured engine.
    fn kind(&self) -> &str;

    fn index(&self, uid: &str) -> Arc<dyn SearchIndex>;
}
