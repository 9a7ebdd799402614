use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which backend crawler a control request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlerKind {
    Price,
    Report,
}

impl CrawlerKind {
    pub const ALL: [CrawlerKind; 2] = [CrawlerKind::Price, CrawlerKind::Report];

    /// Path segment under `/api`.
    pub fn base_path(&self) -> &'static str {
        match self {
            CrawlerKind::Price => "/crawler",
            CrawlerKind::Report => "/report-crawler",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CrawlerKind::Price => "价格数据爬虫",
            CrawlerKind::Report => "分析报告爬虫",
        }
    }

    pub fn start_path(&self) -> String {
        format!("{}/start", self.base_path())
    }

    pub fn stop_path(&self) -> String {
        format!("{}/stop", self.base_path())
    }

    pub fn status_path(&self) -> String {
        format!("{}/status", self.base_path())
    }
}

/// Режим однократного сбора отчётов.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrawlMode {
    /// Все страницы источника.
    #[default]
    Full,
    /// Только первая страница.
    Quick,
}

impl CrawlMode {
    pub fn is_full(&self) -> bool {
        matches!(self, CrawlMode::Full)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CrawlMode::Full => "完整爬取",
            CrawlMode::Quick => "快速爬取",
        }
    }

    /// Path of `POST /api/report-crawler/crawl-once` with the mode flag.
    pub fn crawl_once_path(&self) -> String {
        format!(
            "{}/crawl-once?full_crawl={}",
            CrawlerKind::Report.base_path(),
            self.is_full()
        )
    }
}

/// Status of either crawler.
///
/// The price crawler reports its `config` object, the report crawler the
/// number of `report_types` it knows about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlerStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub is_running: bool,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub running_time: Option<String>,
    #[serde(default)]
    pub crawled_count: u64,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default)]
    pub report_types: Option<u32>,
    #[serde(default)]
    pub config: Option<Value>,
}

impl CrawlerStatus {
    /// Status text, falling back to the running flag when the backend sent none.
    pub fn status_text(&self) -> &str {
        if !self.status.is_empty() {
            &self.status
        } else if self.is_running {
            "运行中"
        } else {
            "已停止"
        }
    }

    /// `running_time` without the fractional seconds, `-` when unknown.
    pub fn running_time_text(&self) -> String {
        match self.running_time.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => format_running_time(t),
            _ => "-".to_string(),
        }
    }

    pub fn crawler_config(&self) -> Option<CrawlerConfig> {
        self.config
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Drops the microseconds of a `H:MM:SS.ffffff` duration.
pub fn format_running_time(raw: &str) -> String {
    match raw.split_once('.') {
        Some((whole, frac)) if frac.chars().all(|c| c.is_ascii_digit()) => whole.to_string(),
        _ => raw.to_string(),
    }
}

/// Body of `POST /api/crawler/config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlerConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_interval")]
    pub interval_minutes: u32,
    #[serde(default)]
    pub provinces: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

fn default_interval() -> u32 {
    30
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_minutes: default_interval(),
            provinces: Vec::new(),
        }
    }
}

impl CrawlerConfig {
    /// Validates the settings form. Provinces are comma separated; blanks are dropped.
    pub fn from_form(enabled: bool, interval: &str, provinces: &str) -> Result<Self, String> {
        let interval_minutes = interval
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("无效的爬取间隔: {}", interval.trim()))?;
        if interval_minutes == 0 {
            return Err("爬取间隔必须大于 0".to_string());
        }
        let provinces = provinces
            .split([',', '，'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self {
            enabled,
            interval_minutes,
            provinces,
        })
    }

    pub fn provinces_text(&self) -> String {
        self.provinces.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(CrawlerKind::Price.start_path(), "/crawler/start");
        assert_eq!(CrawlerKind::Report.status_path(), "/report-crawler/status");
        assert_eq!(
            CrawlMode::Quick.crawl_once_path(),
            "/report-crawler/crawl-once?full_crawl=false"
        );
        assert_eq!(
            CrawlMode::Full.crawl_once_path(),
            "/report-crawler/crawl-once?full_crawl=true"
        );
    }

    #[test]
    fn test_price_crawler_status() {
        let json = r#"{"status": "运行中", "is_running": true,
                       "start_time": "2024-03-15T08:00:00", "running_time": "1:02:03.456789",
                       "crawled_count": 120, "error_count": 2,
                       "config": {"enabled": true, "interval_minutes": 60, "provinces": ["北京"]}}"#;
        let status: CrawlerStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.status_text(), "运行中");
        assert_eq!(status.running_time_text(), "1:02:03");
        let config = status.crawler_config().unwrap();
        assert_eq!(config.interval_minutes, 60);
        assert_eq!(config.provinces, vec!["北京"]);
    }

    #[test]
    fn test_stopped_report_crawler() {
        let json = r#"{"is_running": false, "start_time": null, "running_time": null,
                       "crawled_count": 0, "error_count": 0, "report_types": 3}"#;
        let status: CrawlerStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.status_text(), "已停止");
        assert_eq!(status.running_time_text(), "-");
        assert_eq!(status.report_types, Some(3));
        assert!(status.crawler_config().is_none());
    }

    #[test]
    fn test_config_from_form() {
        let config = CrawlerConfig::from_form(true, " 45 ", "北京, 上海，,广东").unwrap();
        assert_eq!(config.interval_minutes, 45);
        assert_eq!(config.provinces, vec!["北京", "上海", "广东"]);
        assert_eq!(config.provinces_text(), "北京, 上海, 广东");

        assert!(CrawlerConfig::from_form(true, "abc", "").is_err());
        assert!(CrawlerConfig::from_form(false, "0", "").is_err());
        assert!(CrawlerConfig::from_form(false, "10", "").unwrap().provinces.is_empty());
    }

    #[test]
    fn test_format_running_time() {
        assert_eq!(format_running_time("0:00:05.1"), "0:00:05");
        assert_eq!(format_running_time("2 days, 3:00:00"), "2 days, 3:00:00");
    }
}
