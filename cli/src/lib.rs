//! meiliscout-cli library, exposes command handlers for unit tests.

pub mod commands;
