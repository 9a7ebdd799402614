use crate::shared::lenient;
use crate::shared::series::SeriesSet;
use crate::shared::text::{change_class, price_or_dash, short_date};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Selectable trend windows in days.
pub const TREND_RANGE_OPTIONS: [(u32, &str); 5] = [
    (7, "最近7天"),
    (30, "最近30天"),
    (90, "最近90天"),
    (180, "最近180天"),
    (365, "最近一年"),
];

pub const DEFAULT_TREND_DAYS: u32 = 30;

/// Query of `GET /api/dashboard/trends`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendsQuery {
    pub days: u32,
}

impl Default for TrendsQuery {
    fn default() -> Self {
        Self {
            days: DEFAULT_TREND_DAYS,
        }
    }
}

/// Response data of `GET /api/dashboard/trends?days=N`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendsData {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub price_trends: Vec<DailyAvgPrice>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub report_trends: ReportTrends,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub key_metrics: KeyMetrics,
    #[serde(default)]
    pub last_update: String,
    #[serde(default)]
    pub time_range: String,
}

impl TrendsData {
    /// Heading of the price chart, e.g. `价格趋势 (30天)`.
    pub fn chart_title(&self) -> String {
        if self.time_range.is_empty() {
            "价格趋势".to_string()
        } else {
            format!("价格趋势 ({})", self.time_range)
        }
    }

    /// Daily average price line.
    pub fn price_series(&self) -> SeriesSet {
        SeriesSet::single(
            "平均价格 (元/公斤)",
            "#007bff",
            self.price_trends
                .iter()
                .map(|p| (short_date(&p.date), p.avg_price))
                .collect(),
        )
    }
}

impl ReportTrends {
    /// Report count per type, largest first.
    pub fn type_bars(&self) -> Vec<(String, f64)> {
        let mut bars: Vec<(String, f64)> = self
            .type_distribution
            .iter()
            .map(|(name, count)| (name.clone(), *count as f64))
            .collect();
        bars.sort_by(|a, b| b.1.total_cmp(&a.1));
        bars
    }

    /// Reports published per day, in date order.
    pub fn daily_bars(&self) -> Vec<(String, f64)> {
        let mut days: Vec<&DailyReportCount> = self.daily_counts.iter().collect();
        days.sort_by(|a, b| a.date.cmp(&b.date));
        days.into_iter()
            .map(|d| (short_date(&d.date), d.count as f64))
            .collect()
    }
}

/// Средняя цена за торговый день.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyAvgPrice {
    #[serde(rename = "交易日期", default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(rename = "平均价", default, deserialize_with = "lenient::opt_f64")]
    pub avg_price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTrends {
    #[serde(default, deserialize_with = "lenient::count_map")]
    pub type_distribution: BTreeMap<String, u64>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub daily_counts: Vec<DailyReportCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyReportCount {
    #[serde(rename = "日期", default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(rename = "报告数量", default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub avg_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price_change_percent: Option<f64>,
    #[serde(default)]
    pub total_reports: Option<u64>,
    #[serde(default)]
    pub report_types: Option<u64>,
}

impl KeyMetrics {
    pub fn avg_price_text(&self) -> String {
        price_or_dash(self.avg_price)
    }

    pub fn max_price_text(&self) -> String {
        price_or_dash(self.max_price)
    }

    pub fn min_price_text(&self) -> String {
        price_or_dash(self.min_price)
    }

    /// `(+1.5%, "positive")`; `None` when the backend had fewer than two days.
    pub fn price_change(&self) -> Option<(String, &'static str)> {
        self.price_change_percent.map(|change| {
            let sign = if change > 0.0 { "+" } else { "" };
            (format!("{}{}%", sign, change), change_class(change))
        })
    }

    pub fn total_reports_text(&self) -> String {
        self.total_reports.unwrap_or(0).to_string()
    }

    pub fn report_types_text(&self) -> String {
        format!("{} 种类型", self.report_types.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_trends() {
        let json = r#"{
            "price_trends": [{"交易日期": "2024-03-14", "平均价": 5.2}, {"交易日期": "2024-03-15", "平均价": 5.35}],
            "report_trends": {"type_distribution": {"农产品批发市场价格日报": 20},
                              "daily_counts": [{"日期": "2024-03-15", "报告数量": 4}]},
            "key_metrics": {"avg_price": 5.276, "max_price": 12.0, "min_price": 0.8,
                            "price_change_percent": -1.25, "total_reports": 20, "report_types": 2},
            "last_update": "2024-03-15T10:00:00",
            "time_range": "30天"
        }"#;
        let data: TrendsData = serde_json::from_str(json).unwrap();
        assert_eq!(data.price_trends.len(), 2);
        assert_eq!(data.price_trends[1].avg_price, Some(5.35));
        assert_eq!(data.report_trends.daily_counts[0].count, 4);
        assert_eq!(data.chart_title(), "价格趋势 (30天)");
        assert_eq!(data.key_metrics.avg_price_text(), "5.28");
        assert_eq!(
            data.key_metrics.price_change(),
            Some(("-1.25%".to_string(), "negative"))
        );
        assert_eq!(data.key_metrics.report_types_text(), "2 种类型");

        let series = data.price_series();
        assert_eq!(series.labels, vec!["03/14", "03/15"]);
        assert_eq!(series.series[0].values, vec![Some(5.2), Some(5.35)]);
        assert_eq!(
            data.report_trends.daily_bars(),
            vec![("03/15".to_string(), 4.0)]
        );
    }

    #[test]
    fn test_type_bars_sorted_by_count() {
        let trends: ReportTrends = serde_json::from_str(
            r#"{"type_distribution": {"农业分析报告": 3, "农产品批发市场价格日报": 20, "年报": 1}}"#,
        )
        .unwrap();
        let bars = trends.type_bars();
        assert_eq!(bars[0], ("农产品批发市场价格日报".to_string(), 20.0));
        assert_eq!(bars[2], ("年报".to_string(), 1.0));
    }

    #[test]
    fn test_decode_without_files() {
        let json = r#"{"price_trends": [], "report_trends": [], "key_metrics": {},
                       "last_update": "2024-03-15T10:00:00", "time_range": "7天"}"#;
        let data: TrendsData = serde_json::from_str(json).unwrap();
        assert!(data.price_trends.is_empty());
        assert_eq!(data.report_trends, ReportTrends::default());
        assert_eq!(data.key_metrics.max_price_text(), "-");
        assert_eq!(data.key_metrics.price_change(), None);
        assert_eq!(data.key_metrics.total_reports_text(), "0");
    }

    #[test]
    fn test_positive_change() {
        let metrics = KeyMetrics {
            price_change_percent: Some(2.5),
            ..Default::default()
        };
        assert_eq!(metrics.price_change(), Some(("+2.5%".to_string(), "positive")));
    }

    #[test]
    fn test_default_range_is_listed() {
        assert!(TREND_RANGE_OPTIONS
            .iter()
            .any(|(days, _)| *days == TrendsQuery::default().days));
    }
}
