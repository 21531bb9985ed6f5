use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::UpdateError;

use super::declared::DeclaredModel;
use super::traits::Searchable;

/// A type known to the registry.
#[derive(Clone)]
pub enum RegisteredModel {
    Searchable(Arc<dyn Searchable>),
    /// Registered type that does not implement the searchable capability.
    Plain { type_name: String },
}

impl RegisteredModel {
    pub fn type_name(&self) -> &str {
        match self {
            Self::Searchable(model) => model.type_name(),
            Self::Plain { type_name } => type_name,
        }
    }

    pub fn as_searchable(&self) -> Option<&Arc<dyn Searchable>> {
        match self {
            Self::Searchable(model) => Some(model),
            Self::Plain { .. } => None,
        }
    }
}

impl std::fmt::Debug for RegisteredModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Searchable(model) => f
                .debug_struct("Searchable")
                .field("type_name", &model.type_name())
                .field("index", &model.searchable_as())
                .finish(),
            Self::Plain { type_name } => f
                .debug_struct("Plain")
                .field("type_name", type_name)
                .finish(),
        }
    }
}

/// Lookup table from type name to model.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, RegisteredModel>,
}

/// Leading namespace separators are not significant (`\App\Post` == `App\Post`).
fn normalize_type_name(name: &str) -> &str {
    name.trim().trim_start_matches('\\').trim_start_matches("::")
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every `[[models]]` declaration from the configuration.
    pub fn from_config(cfg: &AppConfig) -> Self {
        let mut registry = Self::new();
        for model_cfg in &cfg.models {
            if model_cfg.searchable {
                let model = DeclaredModel::from_config(model_cfg, &cfg.scout);
                registry.register(Arc::new(model));
            } else {
                registry.register_plain(&model_cfg.name);
            }
        }
        registry
    }

    pub fn register(&mut self, model: Arc<dyn Searchable>) {
        let key = normalize_type_name(model.type_name()).to_string();
        tracing::debug!(model = %key, index = %model.searchable_as(), "registered searchable model");
        self.models.insert(key, RegisteredModel::Searchable(model));
    }

    pub fn register_plain(&mut self, type_name: &str) {
        let key = normalize_type_name(type_name).to_string();
        self.models.insert(
            key,
            RegisteredModel::Plain {
                type_name: type_name.to_string(),
            },
        );
    }

    pub fn lookup(&self, type_name: &str) -> Option<&RegisteredModel> {
        self.models.get(normalize_type_name(type_name))
    }

    /// Returns the model when it exists and is searchable.
    pub fn resolve_searchable(&self, type_name: &str) -> Result<Arc<dyn Searchable>, UpdateError> {
        self.lookup(type_name)
            .and_then(RegisteredModel::as_searchable)
            .cloned()
            .ok_or_else(|| UpdateError::ModelNotSearchable(type_name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredModel> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
