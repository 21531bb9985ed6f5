//! Attribute resolution and task reconciliation for syncing a model's
//! search settings to a Meilisearch index.
pub mod api;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod settings;
pub mod tasks;
