use crate::application::conditions_api::EndpointVariant;
use crate::domain::destination::{default_catalog, DEFAULT_DESTINATION};
use chrono::Local;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub preferences: PreferenceSettings,
    #[serde(default)]
    pub widget: WidgetConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub variant: EndpointVariant,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Fixed `tz_offset` sent to `/all_data`; the host's zone when unset
    #[serde(default)]
    pub tz_offset_minutes: Option<i32>,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            variant: EndpointVariant::default(),
            timeout_secs: default_timeout_secs(),
            tz_offset_minutes: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PreferenceSettings {
    /// Empty keeps preferences in memory only
    #[serde(default = "default_preferences_path")]
    pub path: String,
}

impl Default for PreferenceSettings {
    fn default() -> Self {
        Self {
            path: default_preferences_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetConfig {
    #[serde(default = "default_destination")]
    pub default_destination: String,
    #[serde(default = "default_submit_link_template")]
    pub submit_link_template: String,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    #[serde(default = "default_catalog")]
    pub catalog: Vec<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            default_destination: default_destination(),
            submit_link_template: default_submit_link_template(),
            viewport_width: default_viewport_width(),
            catalog: default_catalog(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_preferences_path() -> String {
    "data/preferences.toml".to_string()
}

fn default_destination() -> String {
    DEFAULT_DESTINATION.to_string()
}

fn default_submit_link_template() -> String {
    "/submit-ccs?destination=${destination}".to_string()
}

fn default_viewport_width() -> u32 {
    1200
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load_dashboard_config_from("config/dashboard")
}

/// `path` is a config file name without extension; the file is optional
pub fn load_dashboard_config_from(path: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Minutes to add to local time to reach UTC, the way a browser reports
/// its timezone offset (UTC-5 gives 300)
pub fn resolve_tz_offset(configured: Option<i32>) -> i32 {
    configured.unwrap_or_else(|| -(Local::now().offset().local_minus_utc() / 60))
}

/// Replace template variables in a query string
pub fn prepare_query(query: &str, vars: &HashMap<String, String>) -> String {
    let mut result = query.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
