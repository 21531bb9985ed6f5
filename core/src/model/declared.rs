use crate::config::{ModelConfig, ScoutConfig};

use super::traits::{
    HasDisplayableAttributes, HasFilterableAttributes, HasSortableAttributes, Searchable,
    SearchableSettings, SettingsProvider,
};

/// A searchable model described in configuration rather than in code.
///
/// A capability list that is present in the declaration (even empty) means
/// the model implements that capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredModel {
    type_name: String,
    index: String,
    engine: String,
    fields: Vec<String>,
    displayable: Option<Vec<String>>,
    filterable: Option<Vec<String>>,
    sortable: Option<Vec<String>>,
    type_settings: Option<SearchableSettings>,
    serialization_settings: Option<SearchableSettings>,
}

impl DeclaredModel {
    pub fn from_config(cfg: &ModelConfig, scout: &ScoutConfig) -> Self {
        let base_index = cfg
            .index
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_index_name(&cfg.name));
        let engine = cfg
            .engine
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(scout.driver.as_str())
            .to_string();

        Self {
            type_name: cfg.name.clone(),
            index: format!("{}{}", scout.prefix, base_index),
            engine,
            fields: cfg.fields.clone(),
            displayable: cfg.displayable.clone(),
            filterable: cfg.filterable.clone(),
            sortable: cfg.sortable.clone(),
            type_settings: cfg.settings.clone(),
            serialization_settings: cfg.serialization_settings.clone(),
        }
    }
}

/// `App\Models\BlogPost` -> `blog_posts`.
pub fn default_index_name(type_name: &str) -> String {
    let short = type_name
        .rsplit(|c: char| c == '\\' || c == ':' || c == '.')
        .find(|s| !s.is_empty())
        .unwrap_or(type_name);

    let mut out = String::with_capacity(short.len() + 2);
    for (idx, ch) in short.chars().enumerate() {
        if ch.is_uppercase() {
            if idx > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    if !out.ends_with('s') {
        out.push('s');
    }
    out
}

impl Searchable for DeclaredModel {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn searchable_as(&self) -> String {
        self.index.clone()
    }

    fn search_engine(&self) -> &str {
        &self.engine
    }

    fn searchable_fields(&self) -> Vec<String> {
        self.fields.clone()
    }

    fn type_settings(&self) -> Option<&dyn SettingsProvider> {
        self.type_settings
            .as_ref()
            .map(|s| s as &dyn SettingsProvider)
    }

    fn serialization_settings(&self) -> Option<&dyn SettingsProvider> {
        self.serialization_settings
            .as_ref()
            .map(|s| s as &dyn SettingsProvider)
    }

    fn as_displayable(&self) -> Option<&dyn HasDisplayableAttributes> {
        self.displayable
            .as_ref()
            .map(|_| self as &dyn HasDisplayableAttributes)
    }

    fn as_filterable(&self) -> Option<&dyn HasFilterableAttributes> {
        self.filterable
            .as_ref()
            .map(|_| self as &dyn HasFilterableAttributes)
    }

    fn as_sortable(&self) -> Option<&dyn HasSortableAttributes> {
        self.sortable
            .as_ref()
            .map(|_| self as &dyn HasSortableAttributes)
    }
}

impl HasDisplayableAttributes for DeclaredModel {
    fn search_displayable_attributes(&self) -> Vec<String> {
        self.displayable.clone().unwrap_or_default()
    }
}

impl HasFilterableAttributes for DeclaredModel {
    fn searchable_filters(&self) -> Vec<String> {
        self.filterable.clone().unwrap_or_default()
    }
}

impl HasSortableAttributes for DeclaredModel {
    fn searchable_sorts(&self) -> Vec<String> {
        self.sortable.clone().unwrap_or_default()
    }
}
