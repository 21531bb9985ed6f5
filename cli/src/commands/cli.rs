use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "meiliscout",
    version,
    about = "Sync search index settings from model declarations"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.meiliscout/config.toml or ./meiliscout.toml.
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct UpdateArgs {
    /// Fully-qualified model type name.
    pub model: String,

    /// Wait for task to finish to get a better result info.
    #[arg(long, default_value_t = false)]
    pub wait: bool,

    /// Maximum time to poll each task, overrides `wait.timeout_ms`.
    #[arg(long)]
    pub wait_timeout_ms: Option<u64>,

    /// Delay between two polls, overrides `wait.interval_ms`.
    #[arg(long)]
    pub wait_interval_ms: Option<u64>,

    /// Print plain lines even on an interactive terminal.
    #[arg(long, default_value_t = false)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Update Meilisearch settings from model attribute.
    #[command(name = "scout:update")]
    Update(UpdateArgs),
    /// List the models known to the registry.
    #[command(name = "scout:models")]
    Models,
}
