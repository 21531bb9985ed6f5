use anyhow::Result;

use meiliscout_core::api::{AppConfig, RetryConfig, RetryStrategy, TaskReporter};

use crate::meilisearch::MeilisearchEngine;
use crate::renderers::{PlainTaskReporter, RichTaskReporter};
use crate::strategies::{ExponentialBackoffStrategy, LinearRetryStrategy};

pub fn build_engine(cfg: &AppConfig) -> Result<MeilisearchEngine> {
    MeilisearchEngine::new(
        cfg.meilisearch.host.clone(),
        cfg.meilisearch.key.clone(),
        cfg.meilisearch.timeout_ms,
    )
}

pub fn build_retry(cfg: &RetryConfig) -> Box<dyn RetryStrategy> {
    match cfg.strategy.as_str() {
        "linear" => Box::new(LinearRetryStrategy::new(cfg.clone())),
        // Anything else falls back to exponential backoff.
        _ => Box::new(ExponentialBackoffStrategy::new(cfg.clone())),
    }
}

/// `rich` is only honoured when the caller knows stdout is interactive.
pub fn build_reporter(rich: bool) -> Box<dyn TaskReporter> {
    if rich {
        Box::new(RichTaskReporter::new())
    } else {
        Box::new(PlainTaskReporter::new())
    }
}
