//! `scout:models`: lists registered models.
use meiliscout_core::api as core_api;

pub fn format_model_line(model: &core_api::RegisteredModel) -> String {
    match model.as_searchable() {
        Some(m) => format!(
            "{}  index={}  engine={}",
            m.type_name(),
            m.searchable_as(),
            m.search_engine()
        ),
        None => format!("{}  (not searchable)", model.type_name()),
    }
}

pub fn handle_models(cfg: &core_api::AppConfig) -> Result<i32, core_api::CliError> {
    let registry = core_api::ModelRegistry::from_config(cfg);
    if registry.is_empty() {
        eprintln!("No models configured. Add [[models]] entries to your config file.");
        return Ok(0);
    }
    for model in registry.iter() {
        println!("{}", format_model_line(model));
    }
    Ok(0)
}
