use serde::Serialize;

use crate::model::{Searchable, SearchableSettings};

use super::attribute_set::{AttributeCategory, AttributeSet};

/// Where the resolved lists were taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsSource {
    /// Declaration attached to the model type.
    TypeDeclaration,
    /// Declaration attached to the serialization method.
    SerializationDeclaration,
    /// Derived from the model's capability traits.
    Capabilities,
}

/// The four attribute sets computed for one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAttributes {
    pub source: SettingsSource,
    pub searchable: AttributeSet,
    pub displayable: AttributeSet,
    pub filterable: AttributeSet,
    pub sortable: AttributeSet,
}

impl ResolvedAttributes {
    pub fn get(&self, category: AttributeCategory) -> &AttributeSet {
        match category {
            AttributeCategory::Searchable => &self.searchable,
            AttributeCategory::Displayable => &self.displayable,
            AttributeCategory::Filterable => &self.filterable,
            AttributeCategory::Sortable => &self.sortable,
        }
    }

    /// Categories with something to update, in submission order.
    pub fn non_empty(&self) -> impl Iterator<Item = (AttributeCategory, &AttributeSet)> {
        AttributeCategory::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
            .filter(|(_, set)| !set.is_empty())
    }

    fn from_declaration(source: SettingsSource, settings: &SearchableSettings) -> Self {
        Self {
            source,
            searchable: settings.searchable.iter().cloned().collect(),
            displayable: settings.displayable.iter().cloned().collect(),
            filterable: settings.filterable.iter().cloned().collect(),
            sortable: settings.sortable.iter().cloned().collect(),
        }
    }
}

/// Returns the first settings declaration found: type level, then
/// serialization-method level.
pub fn find_declaration(model: &dyn Searchable) -> Option<(SettingsSource, &SearchableSettings)> {
    if let Some(provider) = model.type_settings() {
        return Some((SettingsSource::TypeDeclaration, provider.searchable_settings()));
    }
    model
        .serialization_settings()
        .map(|provider| (SettingsSource::SerializationDeclaration, provider.searchable_settings()))
}

/// Computes the searchable, displayable, filterable and sortable sets.
///
/// A declaration overrides all capability output. Without one, searchable
/// is every serialized field minus the displayable ones, and only when the
/// model exposes displayable attributes; otherwise it stays empty.
pub fn resolve_attributes(model: &dyn Searchable) -> ResolvedAttributes {
    if let Some((source, settings)) = find_declaration(model) {
        let resolved = ResolvedAttributes::from_declaration(source, settings);
        tracing::debug!(
            stage = "update.resolve.out",
            model = %model.type_name(),
            source = ?resolved.source,
            searchable = resolved.searchable.len(),
            displayable = resolved.displayable.len(),
            filterable = resolved.filterable.len(),
            sortable = resolved.sortable.len()
        );
        return resolved;
    }

    let displayable: Option<AttributeSet> = model
        .as_displayable()
        .map(|cap| cap.search_displayable_attributes().into_iter().collect());

    let searchable = match &displayable {
        Some(shown) => model
            .searchable_fields()
            .into_iter()
            .collect::<AttributeSet>()
            .difference(shown),
        None => AttributeSet::new(),
    };

    let filterable = model
        .as_filterable()
        .map(|cap| cap.searchable_filters().into_iter().collect())
        .unwrap_or_default();

    let sortable = model
        .as_sortable()
        .map(|cap| cap.searchable_sorts().into_iter().collect())
        .unwrap_or_default();

    let resolved = ResolvedAttributes {
        source: SettingsSource::Capabilities,
        searchable,
        displayable: displayable.unwrap_or_default(),
        filterable,
        sortable,
    };
    tracing::debug!(
        stage = "update.resolve.out",
        model = %model.type_name(),
        source = ?resolved.source,
        searchable = resolved.searchable.len(),
        displayable = resolved.displayable.len(),
        filterable = resolved.filterable.len(),
        sortable = resolved.sortable.len()
    );
    resolved
}
