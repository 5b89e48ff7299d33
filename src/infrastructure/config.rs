use crate::application::page::SelectorOptions;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    pub dashboard: DashboardSettings,
    pub export: ExportSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub default_top_n: usize,
    pub top_n_choices: Vec<usize>,
}

impl DashboardSettings {
    pub fn selector(&self) -> SelectorOptions {
        SelectorOptions::new(self.top_n_choices.clone(), self.default_top_n)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportSettings {
    pub directory: PathBuf,
}

/// Defaults, then `config/dashboard.*` if present, then `DASHBOARD__*` env vars
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .set_default("api.base_url", "http://127.0.0.1:6767")?
        .set_default("api.timeout_secs", 10)?
        .set_default("dashboard.default_top_n", 10)?
        .set_default("dashboard.top_n_choices", vec![5, 10, 20, 50])?
        .set_default("export.directory", "exports")?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("dashboard.top_n_choices"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
