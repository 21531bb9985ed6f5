use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use meiliscout_core::api as core_api;

use super::http_client::HttpClient;

/// Meilisearch implementation of [`core_api::SearchEngine`].
#[derive(Clone)]
pub struct MeilisearchEngine {
    client: HttpClient,
}

impl MeilisearchEngine {
    pub fn new(host: String, api_key: String, timeout_ms: u64) -> anyhow::Result<Self> {
        let client = HttpClient::new(host, api_key, timeout_ms)?;
        Ok(Self { client })
    }

    pub fn from_client(client: HttpClient) -> Self {
        Self { client }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

impl core_api::SearchEngine for MeilisearchEngine {
    fn kind(&self) -> &str {
        core_api::MEILISEARCH_ENGINE
    }

    fn index(&self, uid: &str) -> Arc<dyn core_api::SearchIndex> {
        Arc::new(MeilisearchIndex {
            client: self.client.clone(),
            uid: uid.to_string(),
        })
    }
}

pub struct MeilisearchIndex {
    client: HttpClient,
    uid: String,
}

#[async_trait]
impl core_api::SearchIndex for MeilisearchIndex {
    fn uid(&self) -> &str {
        &self.uid
    }

    async fn update_searchable_attributes(
        &self,
        fields: &[String],
    ) -> anyhow::Result<core_api::TaskInfo> {
        self.client
            .update_settings(&self.uid, core_api::AttributeCategory::Searchable, fields)
            .await
    }

    async fn update_displayed_attributes(
        &self,
        fields: &[String],
    ) -> anyhow::Result<core_api::TaskInfo> {
        self.client
            .update_settings(&self.uid, core_api::AttributeCategory::Displayable, fields)
            .await
    }

    async fn update_filterable_attributes(
        &self,
        fields: &[String],
    ) -> anyhow::Result<core_api::TaskInfo> {
        self.client
            .update_settings(&self.uid, core_api::AttributeCategory::Filterable, fields)
            .await
    }

    async fn update_sortable_attributes(
        &self,
        fields: &[String],
    ) -> anyhow::Result<core_api::TaskInfo> {
        self.client
            .update_settings(&self.uid, core_api::AttributeCategory::Sortable, fields)
            .await
    }

    async fn wait_for_task(
        &self,
        task_uid: core_api::TaskUid,
        options: core_api::WaitOptions,
    ) -> anyhow::Result<core_api::Task> {
        let started = Instant::now();
        loop {
            let task = self.client.get_task(task_uid).await?;
            if task.status.is_terminal() {
                tracing::debug!(
                    index = %self.uid,
                    task_uid,
                    status = %task.status,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "task finished"
                );
                return Ok(task);
            }

            let elapsed = started.elapsed();
            if elapsed >= options.timeout {
                return Err(core_api::WaitTimedOut {
                    task_uid,
                    waited_ms: elapsed.as_millis() as u64,
                    last_status: task.status,
                }
                .into());
            }
            tokio::time::sleep(options.interval.min(options.timeout - elapsed)).await;
        }
    }
}
