use crate::shared::lenient;
use serde::{Deserialize, Serialize};

/// Default row limit of the "latest records" listing.
pub const LATEST_LIMIT: u32 = 100;

/// Одна ценовая запись рынка (рынок / сорт / дата).
///
/// The backend stores columns under their Chinese headers; the English
/// names are accepted for records that were never standardised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "省份", alias = "province", default, deserialize_with = "lenient::string")]
    pub province: String,
    #[serde(rename = "市场名称", alias = "market_name", default, deserialize_with = "lenient::string")]
    pub market_name: String,
    #[serde(rename = "品种名称", alias = "variety_name", default, deserialize_with = "lenient::string")]
    pub variety_name: String,
    #[serde(rename = "最低价", alias = "min_price", default, deserialize_with = "lenient::opt_f64")]
    pub min_price: Option<f64>,
    #[serde(rename = "平均价", alias = "avg_price", default, deserialize_with = "lenient::opt_f64")]
    pub avg_price: Option<f64>,
    #[serde(rename = "最高价", alias = "max_price", default, deserialize_with = "lenient::opt_f64")]
    pub max_price: Option<f64>,
    #[serde(rename = "单位", alias = "unit", default, deserialize_with = "lenient::string")]
    pub unit: String,
    #[serde(rename = "交易日期", alias = "trade_date", default, deserialize_with = "lenient::string")]
    pub trade_date: String,
    #[serde(rename = "更新时间", alias = "crawl_time", default, deserialize_with = "lenient::string")]
    pub crawl_time: String,
}

impl PriceRecord {
    /// Column headers of the price table, in display order.
    pub fn headers() -> [&'static str; 9] {
        [
            "省份", "市场名称", "品种名称", "最低价", "平均价", "最高价", "单位", "交易日期",
            "更新时间",
        ]
    }

    /// Cell texts in header order; missing values render as `-`.
    pub fn cells(&self) -> [String; 9] {
        fn text(s: &str) -> String {
            if s.trim().is_empty() {
                "-".to_string()
            } else {
                s.to_string()
            }
        }
        fn price(p: Option<f64>) -> String {
            match p {
                Some(v) if v != 0.0 => format!("{:.2}", v),
                _ => "-".to_string(),
            }
        }
        [
            text(&self.province),
            text(&self.market_name),
            text(&self.variety_name),
            price(self.min_price),
            price(self.avg_price),
            price(self.max_price),
            text(&self.unit),
            text(&self.trade_date),
            text(&self.crawl_time),
        ]
    }
}

/// Фильтры поиска ценовых записей (`POST /api/search`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl SearchQuery {
    /// Builds a query from raw form values, dropping empty fields.
    pub fn from_form(form: &SearchForm) -> Self {
        Self {
            province: non_empty(&form.province),
            variety: non_empty(&form.variety),
            market: non_empty(&form.market),
            date_from: non_empty(&form.date_from),
            date_to: non_empty(&form.date_to),
            limit: form.limit,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.province.is_none()
            && self.variety.is_none()
            && self.market.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// Filter part used by the CSV export endpoint (no row limit).
    pub fn export_filter(&self) -> ExportFilter {
        ExportFilter {
            province: self.province.clone(),
            variety: self.variety.clone(),
            market: self.market.clone(),
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
        }
    }
}

/// Raw search form values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
    pub province: String,
    pub variety: String,
    pub market: String,
    pub date_from: String,
    pub date_to: String,
    pub limit: Option<u32>,
}

/// Query parameters of `GET /api/export/csv`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

/// Suggested file name of a price export, e.g. `market_data_2024-03-15.csv`.
pub fn export_filename(date: chrono::NaiveDate) -> String {
    format!("market_data_{}.csv", date.format("%Y-%m-%d"))
}

/// Option lists for the search form dropdowns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub provinces: Vec<String>,
    pub varieties: Vec<String>,
    pub markets: Vec<String>,
}

/// Distinct markets, varieties and provinces in the loaded records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverageCounts {
    pub markets: usize,
    pub varieties: usize,
    pub provinces: usize,
}

impl CoverageCounts {
    pub fn from_records(records: &[PriceRecord]) -> Self {
        use std::collections::HashSet;
        fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> usize {
            values
                .filter(|v| !v.trim().is_empty())
                .collect::<HashSet<_>>()
                .len()
        }
        Self {
            markets: distinct(records.iter().map(|r| r.market_name.as_str())),
            varieties: distinct(records.iter().map(|r| r.variety_name.as_str())),
            provinces: distinct(records.iter().map(|r| r.province.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_chinese_columns() {
        let json = r#"{
            "省份": "山东", "市场名称": "寿光农产品物流园", "品种名称": "西红柿",
            "最低价": 2.4, "平均价": "3.1", "最高价": "", "单位": "元/公斤",
            "交易日期": "2024-03-15", "更新时间": "2024-03-15 08:00:00", "保存时间": "x"
        }"#;
        let rec: PriceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.province, "山东");
        assert_eq!(rec.min_price, Some(2.4));
        assert_eq!(rec.avg_price, Some(3.1));
        assert_eq!(rec.max_price, None);
        assert_eq!(rec.cells()[5], "-");
        assert_eq!(rec.cells()[4], "3.10");
    }

    #[test]
    fn test_deserialize_english_aliases() {
        let json = r#"{"province": "河北", "market_name": "新发地", "variety_name": "白菜",
                       "avg_price": 1.2, "trade_date": "2024-03-14", "crawl_time": "t"}"#;
        let rec: PriceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.market_name, "新发地");
        assert_eq!(rec.crawl_time, "t");
        assert_eq!(rec.cells()[6], "-");
    }

    #[test]
    fn test_search_query_drops_empty_fields() {
        let form = SearchForm {
            province: "山东".to_string(),
            variety: "  ".to_string(),
            date_to: "2024-03-31".to_string(),
            limit: Some(100),
            ..Default::default()
        };
        let q = SearchQuery::from_form(&form);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"province": "山东", "date_to": "2024-03-31", "limit": 100})
        );
        assert!(!q.is_empty());
        assert!(SearchQuery::from_form(&SearchForm::default()).is_empty());
    }

    #[test]
    fn test_export_filename() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(export_filename(date), "market_data_2024-03-15.csv");
    }

    #[test]
    fn test_coverage_counts() {
        let rec = |p: &str, m: &str, v: &str| PriceRecord {
            province: p.to_string(),
            market_name: m.to_string(),
            variety_name: v.to_string(),
            ..Default::default()
        };
        let records = vec![
            rec("山东", "寿光", "西红柿"),
            rec("山东", "寿光", "黄瓜"),
            rec("北京", "新发地", "黄瓜"),
            rec("", "", ""),
        ];
        let counts = CoverageCounts::from_records(&records);
        assert_eq!(counts.markets, 2);
        assert_eq!(counts.varieties, 2);
        assert_eq!(counts.provinces, 2);
        assert_eq!(CoverageCounts::from_records(&[]), CoverageCounts::default());
    }
}
