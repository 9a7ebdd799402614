use crate::system::crawler::dto::CrawlerStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Response data of `GET /api/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    #[serde(default)]
    pub data_stats: DataStats,
    #[serde(default)]
    pub crawler_status: CrawlerStatus,
    #[serde(default)]
    pub scheduler_status: SchedulerStatus,
}

/// Сводка по сохранённым ценовым данным.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataStats {
    #[serde(default)]
    pub total_records: u64,
    #[serde(default)]
    pub total_markets: u64,
    #[serde(default)]
    pub total_varieties: u64,
    #[serde(default)]
    pub total_provinces: u64,
    #[serde(default)]
    pub last_update: Option<String>,
}

impl DataStats {
    pub fn last_update_text(&self) -> &str {
        match self.last_update.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => "-",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerStatus {
    #[serde(default)]
    pub is_running: bool,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub running_time: Option<String>,
    #[serde(default)]
    pub task_count: u32,
    #[serde(default)]
    pub task_stats: Option<Value>,
    #[serde(default)]
    pub next_runs: BTreeMap<String, String>,
}

/// One stat card of the overview section.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCardData {
    pub title: &'static str,
    pub value: String,
}

impl SystemStats {
    /// Cards in display order: records, markets, varieties, crawler status.
    pub fn cards(&self) -> [StatCardData; 4] {
        [
            StatCardData {
                title: "数据总数",
                value: self.data_stats.total_records.to_string(),
            },
            StatCardData {
                title: "市场数量",
                value: self.data_stats.total_markets.to_string(),
            },
            StatCardData {
                title: "品种数量",
                value: self.data_stats.total_varieties.to_string(),
            },
            StatCardData {
                title: "爬虫状态",
                value: self.crawler_status.status_text().to_string(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_stats() {
        let json = r#"{
            "data_stats": {"total_records": 1520, "total_markets": 37, "total_varieties": 210,
                           "total_provinces": 12, "last_update": "2024-03-15 09:30:00"},
            "crawler_status": {"status": "已停止", "is_running": false, "crawled_count": 0,
                               "error_count": 0, "start_time": null, "running_time": null,
                               "config": {"enabled": true, "interval_minutes": 30, "provinces": []}},
            "scheduler_status": {"is_running": true, "task_count": 3,
                                 "task_stats": {"crawl": 5}, "next_runs": {"daily": "2024-03-16T02:00:00"}}
        }"#;
        let stats: SystemStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.data_stats.total_markets, 37);
        assert_eq!(stats.scheduler_status.task_count, 3);
        let cards = stats.cards();
        assert_eq!(cards[0].value, "1520");
        assert_eq!(cards[3].value, "已停止");
    }

    #[test]
    fn test_empty_data_stats() {
        let stats: SystemStats = serde_json::from_str(
            r#"{"data_stats": {"total_records": 0, "total_markets": 0, "total_varieties": 0,
                "total_provinces": 0, "last_update": null}}"#,
        )
        .unwrap();
        assert_eq!(stats.data_stats.last_update_text(), "-");
        assert_eq!(stats.cards()[3].value, "已停止");
    }
}
