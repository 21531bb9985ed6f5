#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use meiliscout_core::api::{
    AttributeCategory, HasDisplayableAttributes, HasFilterableAttributes, HasSortableAttributes,
    ModelRegistry, SearchEngine, SearchIndex, Searchable, SearchableSettings, SettingsProvider,
    Task, TaskInfo, TaskStatus, TaskUid, WaitOptions, WaitTimedOut, MEILISEARCH_ENGINE,
};

fn owned(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

/// Declares searchable + sortable on its serialization method.
pub struct Post {
    settings: SearchableSettings,
}

impl Post {
    pub const TYPE: &'static str = "App\\Models\\Post";

    pub fn new() -> Self {
        Self {
            settings: SearchableSettings::new()
                .searchable(["title"])
                .sortable(["slug"]),
        }
    }
}

impl Searchable for Post {
    fn type_name(&self) -> &str {
        Self::TYPE
    }
    fn searchable_as(&self) -> String {
        "posts".into()
    }
    fn search_engine(&self) -> &str {
        MEILISEARCH_ENGINE
    }
    fn searchable_fields(&self) -> Vec<String> {
        owned(&["id", "title", "slug", "content"])
    }
    fn serialization_settings(&self) -> Option<&dyn SettingsProvider> {
        Some(&self.settings)
    }
}

/// Declares filterable + sortable on the type, and also has capability
/// methods that must be ignored.
pub struct User {
    settings: SearchableSettings,
}

impl User {
    pub const TYPE: &'static str = "App\\Models\\User";

    pub fn new() -> Self {
        Self {
            settings: SearchableSettings::new()
                .filterable(["email"])
                .sortable(["name"]),
        }
    }
}

impl Searchable for User {
    fn type_name(&self) -> &str {
        Self::TYPE
    }
    fn searchable_as(&self) -> String {
        "users".into()
    }
    fn search_engine(&self) -> &str {
        MEILISEARCH_ENGINE
    }
    fn searchable_fields(&self) -> Vec<String> {
        owned(&["name", "email", "password"])
    }
    fn type_settings(&self) -> Option<&dyn SettingsProvider> {
        Some(&self.settings)
    }
    fn as_filterable(&self) -> Option<&dyn HasFilterableAttributes> {
        Some(self)
    }
    fn as_sortable(&self) -> Option<&dyn HasSortableAttributes> {
        Some(self)
    }
}

impl HasFilterableAttributes for User {
    fn searchable_filters(&self) -> Vec<String> {
        owned(&["password"])
    }
}

impl HasSortableAttributes for User {
    fn searchable_sorts(&self) -> Vec<String> {
        owned(&["email"])
    }
}

/// No declaration; filterable and sortable through capability methods.
pub struct Tag;

impl Tag {
    pub const TYPE: &'static str = "App\\Models\\Tag";
}

impl Searchable for Tag {
    fn type_name(&self) -> &str {
        Self::TYPE
    }
    fn searchable_as(&self) -> String {
        "tags".into()
    }
    fn search_engine(&self) -> &str {
        MEILISEARCH_ENGINE
    }
    fn searchable_fields(&self) -> Vec<String> {
        owned(&["name", "slug"])
    }
    fn as_filterable(&self) -> Option<&dyn HasFilterableAttributes> {
        Some(self)
    }
    fn as_sortable(&self) -> Option<&dyn HasSortableAttributes> {
        Some(self)
    }
}

impl HasFilterableAttributes for Tag {
    fn searchable_filters(&self) -> Vec<String> {
        owned(&["name"])
    }
}

impl HasSortableAttributes for Tag {
    fn searchable_sorts(&self) -> Vec<String> {
        owned(&["slug"])
    }
}

/// Exposes displayed attributes, so searchable is derived from its fields.
pub struct Article;

impl Article {
    pub const TYPE: &'static str = "App\\Models\\Article";
}

impl Searchable for Article {
    fn type_name(&self) -> &str {
        Self::TYPE
    }
    fn searchable_as(&self) -> String {
        "articles".into()
    }
    fn search_engine(&self) -> &str {
        MEILISEARCH_ENGINE
    }
    fn searchable_fields(&self) -> Vec<String> {
        owned(&["id", "headline", "body", "published_at"])
    }
    fn as_displayable(&self) -> Option<&dyn HasDisplayableAttributes> {
        Some(self)
    }
}

impl HasDisplayableAttributes for Article {
    fn search_displayable_attributes(&self) -> Vec<String> {
        owned(&["id", "published_at"])
    }
}

/// Configured for an engine other than Meilisearch.
pub struct Product;

impl Product {
    pub const TYPE: &'static str = "App\\Models\\Product";
}

impl Searchable for Product {
    fn type_name(&self) -> &str {
        Self::TYPE
    }
    fn searchable_as(&self) -> String {
        "products".into()
    }
    fn search_engine(&self) -> &str {
        "algolia"
    }
    fn searchable_fields(&self) -> Vec<String> {
        owned(&["sku"])
    }
    fn as_filterable(&self) -> Option<&dyn HasFilterableAttributes> {
        Some(self)
    }
}

impl HasFilterableAttributes for Product {
    fn searchable_filters(&self) -> Vec<String> {
        owned(&["sku"])
    }
}

pub fn fixture_registry() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry.register(Arc::new(Post::new()));
    registry.register(Arc::new(User::new()));
    registry.register(Arc::new(Tag));
    registry.register(Arc::new(Article));
    registry.register(Arc::new(Product));
    registry.register_plain("App\\Models\\AuditLog");
    registry
}

/// In-memory index that records every call it receives.
#[derive(Default)]
pub struct RecordingIndex {
    uid: String,
    next_uid: AtomicU64,
    pub updates: Mutex<Vec<(AttributeCategory, Vec<String>)>>,
    pub applied: Mutex<HashMap<AttributeCategory, Vec<String>>>,
    pub wait_calls: Mutex<Vec<TaskUid>>,
    /// Terminal status per category; `Succeeded` when unset.
    pub statuses: Mutex<HashMap<AttributeCategory, TaskStatus>>,
    pub task_categories: Mutex<HashMap<TaskUid, AttributeCategory>>,
    /// Categories whose update response omits the task uid.
    pub omit_uid_for: Mutex<Vec<AttributeCategory>>,
    /// Category whose update call fails.
    pub fail_update_for: Mutex<Option<AttributeCategory>>,
    /// Number of upcoming wait calls that fail with a transport error.
    pub transient_wait_failures: AtomicU32,
    /// Every wait call times out.
    pub time_out: std::sync::atomic::AtomicBool,
}

impl RecordingIndex {
    pub fn new(uid: &str) -> Self {
        Self {
            uid: uid.to_string(),
            next_uid: AtomicU64::new(1),
            ..Self::default()
        }
    }

    pub fn updated_categories(&self) -> Vec<AttributeCategory> {
        self.updates.lock().unwrap().iter().map(|(c, _)| *c).collect()
    }

    pub fn applied(&self, category: AttributeCategory) -> Option<Vec<String>> {
        self.applied.lock().unwrap().get(&category).cloned()
    }

    pub fn wait_count(&self) -> usize {
        self.wait_calls.lock().unwrap().len()
    }

    fn record(&self, category: AttributeCategory, fields: &[String]) -> anyhow::Result<TaskInfo> {
        if *self.fail_update_for.lock().unwrap() == Some(category) {
            anyhow::bail!("connection refused");
        }
        self.updates
            .lock()
            .unwrap()
            .push((category, fields.to_vec()));
        self.applied
            .lock()
            .unwrap()
            .insert(category, fields.to_vec());

        let uid = self.next_uid.fetch_add(1, Ordering::SeqCst);
        self.task_categories.lock().unwrap().insert(uid, category);
        let task_uid = if self.omit_uid_for.lock().unwrap().contains(&category) {
            None
        } else {
            Some(uid)
        };
        Ok(TaskInfo {
            task_uid,
            index_uid: Some(self.uid.clone()),
            status: Some(TaskStatus::Enqueued),
            enqueued_at: None,
        })
    }
}

#[async_trait]
impl SearchIndex for RecordingIndex {
    fn uid(&self) -> &str {
        &self.uid
    }

    async fn update_searchable_attributes(&self, fields: &[String]) -> anyhow::Result<TaskInfo> {
        self.record(AttributeCategory::Searchable, fields)
    }

    async fn update_displayed_attributes(&self, fields: &[String]) -> anyhow::Result<TaskInfo> {
        self.record(AttributeCategory::Displayable, fields)
    }

    async fn update_filterable_attributes(&self, fields: &[String]) -> anyhow::Result<TaskInfo> {
        self.record(AttributeCategory::Filterable, fields)
    }

    async fn update_sortable_attributes(&self, fields: &[String]) -> anyhow::Result<TaskInfo> {
        self.record(AttributeCategory::Sortable, fields)
    }

    async fn wait_for_task(
        &self,
        task_uid: TaskUid,
        options: WaitOptions,
    ) -> anyhow::Result<Task> {
        self.wait_calls.lock().unwrap().push(task_uid);

        let pending = self.transient_wait_failures.load(Ordering::SeqCst);
        if pending > 0 {
            self.transient_wait_failures
                .store(pending - 1, Ordering::SeqCst);
            anyhow::bail!("connection reset by peer");
        }

        if self.time_out.load(Ordering::SeqCst) {
            return Err(WaitTimedOut {
                task_uid,
                waited_ms: options.timeout.as_millis() as u64,
                last_status: TaskStatus::Processing,
            }
            .into());
        }

        let category = self.task_categories.lock().unwrap().get(&task_uid).copied();
        let status = category
            .and_then(|c| self.statuses.lock().unwrap().get(&c).cloned())
            .unwrap_or(TaskStatus::Succeeded);

        Ok(Task {
            uid: task_uid,
            status,
            index_uid: Some(self.uid.clone()),
            kind: Some("settingsUpdate".into()),
            error: None,
            enqueued_at: None,
            finished_at: None,
        })
    }
}

/// Engine handing out one shared [`RecordingIndex`] per index uid.
pub struct RecordingEngine {
    kind: String,
    indexes: Mutex<HashMap<String, Arc<RecordingIndex>>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::with_kind(MEILISEARCH_ENGINE)
    }

    pub fn with_kind(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            indexes: Mutex::new(HashMap::new()),
        }
    }

    pub fn recording(&self, uid: &str) -> Arc<RecordingIndex> {
        self.indexes
            .lock()
            .unwrap()
            .entry(uid.to_string())
            .or_insert_with(|| Arc::new(RecordingIndex::new(uid)))
            .clone()
    }

    pub fn total_calls(&self) -> usize {
        self.indexes
            .lock()
            .unwrap()
            .values()
            .map(|idx| idx.updates.lock().unwrap().len() + idx.wait_count())
            .sum()
    }
}

impl SearchEngine for RecordingEngine {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn index(&self, uid: &str) -> Arc<dyn SearchIndex> {
        self.recording(uid)
    }
}
