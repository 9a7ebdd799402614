//! Client-side settings, persisted in `localStorage`.

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "agri_dashboard_config_v1";

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_REFRESH_SECS: u32 = 30;
pub const DEFAULT_NOTIFICATION_MS: u32 = 3000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix of every backend path, e.g. `/api` or `http://host:8000/api`.
    pub api_base: String,
    /// Period of the statistics refresh.
    pub refresh_interval_secs: u32,
    /// Rows per page in the analysis report listing.
    pub report_page_size: u32,
    /// How long a notification stays on screen.
    pub notification_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            report_page_size: contracts::shared::pagination::DEFAULT_PAGE_SIZE,
            notification_ms: DEFAULT_NOTIFICATION_MS,
        }
    }
}

impl AppConfig {
    /// Checks user input from the settings form.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_base.trim().is_empty() {
            return Err("API 地址不能为空".to_string());
        }
        if !(5..=3600).contains(&self.refresh_interval_secs) {
            return Err("刷新间隔需在 5 到 3600 秒之间".to_string());
        }
        if !(1..=100).contains(&self.report_page_size) {
            return Err("每页报告数需在 1 到 100 之间".to_string());
        }
        if !(500..=60_000).contains(&self.notification_ms) {
            return Err("通知显示时长需在 500 到 60000 毫秒之间".to_string());
        }
        Ok(())
    }

    /// Builds a configuration from the settings form fields and validates it.
    pub fn from_form(
        api_base: &str,
        refresh_secs: &str,
        page_size: &str,
        notification_ms: &str,
    ) -> Result<Self, String> {
        fn number(value: &str, field: &str) -> Result<u32, String> {
            value
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("{}必须是正整数", field))
        }
        let config = Self {
            api_base: api_base.trim().to_string(),
            refresh_interval_secs: number(refresh_secs, "刷新间隔")?,
            report_page_size: number(page_size, "每页报告数")?,
            notification_ms: number(notification_ms, "通知显示时长")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// `api_base` without a trailing slash.
    pub fn base(&self) -> &str {
        self.api_base.trim().trim_end_matches('/')
    }

    pub fn refresh_interval_ms(&self) -> u32 {
        self.refresh_interval_secs.saturating_mul(1000)
    }

    /// Stored configuration, or defaults when nothing valid is stored.
    pub fn load() -> Self {
        load_persisted()
            .filter(|c| c.validate().is_ok())
            .unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), String> {
        self.validate()?;
        let raw = serde_json::to_string(self).map_err(|e| e.to_string())?;
        storage()
            .ok_or_else(|| "localStorage 不可用".to_string())?
            .set_item(STORAGE_KEY, &raw)
            .map_err(|e| format!("{:?}", e))
    }

    pub fn clear_saved() {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn load_persisted() -> Option<AppConfig> {
    let raw = storage()?.get_item(STORAGE_KEY).ok().flatten()?;
    serde_json::from_str::<AppConfig>(&raw).ok()
}

/// Reactive configuration shared through context.
#[derive(Clone, Copy)]
pub struct ConfigStore {
    pub config: RwSignal<AppConfig>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            config: RwSignal::new(AppConfig::load()),
        }
    }

    pub fn apply(&self, config: AppConfig) -> Result<(), String> {
        config.save()?;
        log::info!("configuration saved: {:?}", config);
        self.config.set(config);
        Ok(())
    }

    pub fn reset(&self) {
        AppConfig::clear_saved();
        self.config.set(AppConfig::default());
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_config() -> ConfigStore {
    use_context::<ConfigStore>().expect("ConfigStore context not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.report_page_size, 10);
        assert_eq!(config.refresh_interval_ms(), 30_000);
        assert_eq!(config.notification_ms, 3000);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"api_base": "http://localhost:8000/api/"}"#).unwrap();
        assert_eq!(config.base(), "http://localhost:8000/api");
        assert_eq!(config.refresh_interval_secs, DEFAULT_REFRESH_SECS);
    }

    #[test]
    fn test_from_form() {
        let config = AppConfig::from_form(" /api ", "60", "20", "5000").unwrap();
        assert_eq!(config.api_base, "/api");
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.report_page_size, 20);

        assert_eq!(
            AppConfig::from_form("/api", "abc", "20", "5000"),
            Err("刷新间隔必须是正整数".to_string())
        );
        assert!(AppConfig::from_form("/api", "60", "0", "5000").is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = AppConfig::default();
        config.refresh_interval_secs = 1;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.report_page_size = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.api_base = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
