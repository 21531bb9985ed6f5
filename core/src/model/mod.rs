pub mod declared;
pub mod registry;
pub mod traits;

pub use declared::{default_index_name, DeclaredModel};
pub use registry::{ModelRegistry, RegisteredModel};
pub use traits::{
    HasDisplayableAttributes, HasFilterableAttributes, HasSortableAttributes, Searchable,
    SearchableSettings, SettingsProvider, MEILISEARCH_ENGINE,
};
