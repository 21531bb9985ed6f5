use std::path::{Path, PathBuf};

use super::types::AppConfig;

const LOCAL_CONFIG_FILE: &str = "meiliscout.toml";

/// Get the default data directory: ~/.meiliscout
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".meiliscout"))
}

/// Loads `~/.meiliscout/config.toml`, else `./meiliscout.toml`, else defaults,
/// then applies environment overrides.
pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.meiliscout/config.toml
    let home_config = get_data_dir()?.join("config.toml");

    // Priority 2: ./meiliscout.toml
    let local_config = Path::new(LOCAL_CONFIG_FILE);

    let mut cfg = if home_config.exists() {
        read_config(&home_config)?
    } else if local_config.exists() {
        read_config(local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

/// Loads an explicit config file (`--config`), then applies environment overrides.
pub fn load_from_path(path: &str) -> anyhow::Result<AppConfig> {
    let expanded = shellexpand::tilde(path).to_string();
    let mut cfg = read_config(Path::new(&expanded))?;
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

fn read_config(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), models = cfg.models.len(), "config loaded");
    Ok(cfg)
}

fn apply_env_overrides(cfg: &mut AppConfig) {
    apply_overrides_from(cfg, |key| std::env::var(key).ok());
}

// Non-empty values win over the file.
fn apply_overrides_from<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("MEILISEARCH_HOST") {
        cfg.meilisearch.host = v;
    }
    if let Some(v) = non_empty("MEILISEARCH_KEY") {
        cfg.meilisearch.key = v;
    }
    if let Some(v) = non_empty("SCOUT_DRIVER") {
        cfg.scout.driver = v;
    }
    if let Some(v) = non_empty("SCOUT_PREFIX") {
        cfg.scout.prefix = v;
    }
}
