pub mod factory;
pub mod meilisearch;
pub mod renderers;
pub mod strategies;
