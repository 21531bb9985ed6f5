//! `scout:update`: wires config-built collaborators into the core command.
use std::time::Duration;

use crate::commands::cli::UpdateArgs;
use meiliscout_core::api as core_api;
use meiliscout_plugins::factory;

fn wait_options(args: &UpdateArgs, cfg: &core_api::WaitConfig) -> core_api::WaitOptions {
    let mut options = cfg.options();
    if let Some(ms) = args.wait_timeout_ms {
        options.timeout = Duration::from_millis(ms.max(1));
    }
    if let Some(ms) = args.wait_interval_ms {
        options.interval = Duration::from_millis(ms.max(1));
    }
    options
}

fn use_rich_output(args: &UpdateArgs, cfg: &core_api::OutputConfig) -> bool {
    cfg.rich && !args.plain && atty::is(atty::Stream::Stdout)
}

pub async fn handle_update(
    args: UpdateArgs,
    cfg: &core_api::AppConfig,
) -> Result<i32, core_api::CliError> {
    let registry = core_api::ModelRegistry::from_config(cfg);
    let engine = factory::build_engine(cfg)
        .map_err(|e| core_api::CliError::Config(format!("meilisearch client: {e}")))?;
    let retry = factory::build_retry(&cfg.wait.retry);
    let reporter = factory::build_reporter(use_rich_output(&args, &cfg.output));

    tracing::debug!(
        models = registry.len(),
        host = %engine.base_url(),
        retry = retry.name(),
        reporter = reporter.name(),
        "scout:update collaborators ready"
    );

    let ctx = core_api::UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: retry.as_ref(),
        reporter: reporter.as_ref(),
        wait_options: wait_options(&args, &cfg.wait),
    };
    let request = core_api::UpdateRequest {
        model: args.model.clone(),
        wait: args.wait,
    };

    match core_api::run_update(&request, &ctx).await {
        Ok(summary) => {
            if !summary.all_succeeded() {
                tracing::warn!(index = %summary.index, "some attribute updates did not succeed");
            }
            Ok(0)
        }
        Err(e) if e.is_precondition() => {
            reporter.error(&e.to_string());
            Ok(e.exit_code())
        }
        Err(e) => Err(e.into()),
    }
}
