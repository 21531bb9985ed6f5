use serde::{Deserialize, Serialize};

/// Engine identifier a model must report to be handled by `scout:update`.
pub const MEILISEARCH_ENGINE: &str = "meilisearch";

/// Explicit settings declaration attached to a model type or to its
/// serialization method.
///
/// When one is found it replaces every capability-derived list; the four
/// categories are never merged with capability output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchableSettings {
    #[serde(default)]
    pub searchable: Vec<String>,
    #[serde(default)]
    pub displayable: Vec<String>,
    #[serde(default)]
    pub filterable: Vec<String>,
    #[serde(default)]
    pub sortable: Vec<String>,
}

impl SearchableSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn searchable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn displayable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.displayable = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn filterable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filterable = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn sortable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sortable = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// Source of an explicit [`SearchableSettings`] declaration.
pub trait SettingsProvider: Send + Sync {
    fn searchable_settings(&self) -> &SearchableSettings;
}

impl SettingsProvider for SearchableSettings {
    fn searchable_settings(&self) -> &SearchableSettings {
        self
    }
}

/// Model exposes the fields returned in search results.
pub trait HasDisplayableAttributes: Send + Sync {
    fn search_displayable_attributes(&self) -> Vec<String>;
}

/// Model exposes the fields usable in filter expressions.
pub trait HasFilterableAttributes: Send + Sync {
    fn searchable_filters(&self) -> Vec<String>;
}

/// Model exposes the fields usable as sort keys.
pub trait HasSortableAttributes: Send + Sync {
    fn searchable_sorts(&self) -> Vec<String>;
}

/// A model type that is synced to a search index.
///
/// Optional capabilities are discovered through the `as_*` accessors and
/// the two settings hooks rather than by inspecting the type at runtime.
/// Implementors return `Some(self)` for every capability they implement.
pub trait Searchable: Send + Sync {
    /// Fully-qualified type name, as passed on the command line.
    fn type_name(&self) -> &str;

    /// Name of the remote index backing this model.
    fn searchable_as(&self) -> String;

    /// Identifier of the configured search engine.
    fn search_engine(&self) -> &str;

    /// Field names produced by the model's default serialization.
    fn searchable_fields(&self) -> Vec<String>;

    /// Settings declared on the type itself.
    fn type_settings(&self) -> Option<&dyn SettingsProvider> {
        None
    }

    /// Settings declared on the serialization method.
    fn serialization_settings(&self) -> Option<&dyn SettingsProvider> {
        None
    }

    fn as_displayable(&self) -> Option<&dyn HasDisplayableAttributes> {
        None
    }

    fn as_filterable(&self) -> Option<&dyn HasFilterableAttributes> {
        None
    }

    fn as_sortable(&self) -> Option<&dyn HasSortableAttributes> {
        None
    }
}
