pub mod attribute_set;
pub mod resolver;

pub use attribute_set::{AttributeCategory, AttributeSet};
pub use resolver::{find_declaration, resolve_attributes, ResolvedAttributes, SettingsSource};
