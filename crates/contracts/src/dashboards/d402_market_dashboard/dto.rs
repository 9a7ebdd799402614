use crate::shared::api_response::{ApiEnvelope, ApiError};
use crate::shared::lenient;
pub use crate::shared::series::{NamedSeries, SeriesSet};
use crate::shared::text::{change_class, short_date, signed_fixed};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Number of gainers / losers listed in the volatility panel.
pub const VOLATILITY_TOP_N: usize = 5;

/// `GET /api/dashboard/data`: the common envelope plus a top-level `summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDashboardResponse {
    #[serde(flatten)]
    pub envelope: ApiEnvelope<MarketDashboard>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub summary: DashboardSummary,
}

impl MarketDashboardResponse {
    pub fn into_parts(self) -> Result<(MarketDashboard, DashboardSummary), ApiError> {
        let data = self.envelope.into_data()?;
        Ok((data, self.summary))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_reports: u64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub date_range: DateRange,
}

/// Аналитика по дневным отчётам: индексы, категории, ключевые продукты.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketDashboard {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub price_index_trend: Vec<PriceIndexPoint>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub category_price_trends: CategoryTrends,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub key_products_trends: BTreeMap<String, Vec<ProductPoint>>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub market_summary: MarketSummary,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub volatility_analysis: Volatility,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceIndexPoint {
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price_index_200: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub basket_index: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryPoint {
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub avg_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub change_rate: Option<f64>,
    #[serde(default)]
    pub product: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrends {
    #[serde(default)]
    pub vegetables: Vec<CategoryPoint>,
    #[serde(default)]
    pub fruits: Vec<CategoryPoint>,
    #[serde(default)]
    pub meat: Vec<CategoryPoint>,
    #[serde(default)]
    pub aquatic: Vec<CategoryPoint>,
}

impl CategoryTrends {
    pub fn series(&self, category: TrendCategory) -> &[CategoryPoint] {
        match category {
            TrendCategory::Vegetables => &self.vegetables,
            TrendCategory::Fruits => &self.fruits,
            TrendCategory::Meat => &self.meat,
            TrendCategory::Aquatic => &self.aquatic,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPoint {
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price: Option<f64>,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, deserialize_with = "lenient::string")]
    pub start: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end: String,
}

impl DateRange {
    /// `MM/DD 至 MM/DD`, `-` when either end is unknown.
    pub fn display(&self) -> String {
        if self.start.trim().is_empty() || self.end.trim().is_empty() {
            return "-".to_string();
        }
        format!("{} 至 {}", short_date(&self.start), short_date(&self.end))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    #[serde(default, deserialize_with = "lenient::string")]
    pub latest_date: String,
    #[serde(default)]
    pub total_reports: u64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub date_range: DateRange,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub latest_conclusions: LatestConclusions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestConclusions {
    #[serde(default, deserialize_with = "lenient::string")]
    pub overall: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub vegetables: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub fruits: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub meat: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub aquatic: String,
}

impl LatestConclusions {
    /// Non-empty conclusions with their headings.
    pub fn sections(&self) -> Vec<(&'static str, &str)> {
        [
            ("总体情况", self.overall.as_str()),
            ("蔬菜", self.vegetables.as_str()),
            ("水果", self.fruits.as_str()),
            ("畜产品", self.meat.as_str()),
            ("水产品", self.aquatic.as_str()),
        ]
        .into_iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolatilityEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub product: String,
    #[serde(default)]
    pub change_rate: f64,
}

impl VolatilityEntry {
    pub fn change_text(&self) -> String {
        format!("{}%", signed_fixed(self.change_rate, 1))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Volatility {
    #[serde(default)]
    pub top_gainers: Vec<VolatilityEntry>,
    #[serde(default)]
    pub top_losers: Vec<VolatilityEntry>,
}

/// Entries of the most recent date, ordered by `|change_rate|` descending.
pub fn latest_volatility(entries: &[VolatilityEntry], limit: usize) -> Vec<VolatilityEntry> {
    let Some(latest) = entries.iter().map(|e| e.date.as_str()).max() else {
        return Vec::new();
    };
    let mut latest_entries: Vec<VolatilityEntry> = entries
        .iter()
        .filter(|e| e.date == latest)
        .cloned()
        .collect();
    latest_entries.sort_by(|a, b| b.change_rate.abs().total_cmp(&a.change_rate.abs()));
    latest_entries.truncate(limit);
    latest_entries
}

/// Товарная категория на графике категорий.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendCategory {
    Vegetables,
    Fruits,
    Meat,
    Aquatic,
}

impl TrendCategory {
    pub const ALL: [TrendCategory; 4] = [
        TrendCategory::Vegetables,
        TrendCategory::Fruits,
        TrendCategory::Meat,
        TrendCategory::Aquatic,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TrendCategory::Vegetables => "vegetables",
            TrendCategory::Fruits => "fruits",
            TrendCategory::Meat => "meat",
            TrendCategory::Aquatic => "aquatic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendCategory::Vegetables => "蔬菜",
            TrendCategory::Fruits => "水果",
            TrendCategory::Meat => "畜产品",
            TrendCategory::Aquatic => "水产品",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            TrendCategory::Vegetables => "#28a745",
            TrendCategory::Fruits => "#ffc107",
            TrendCategory::Meat => "#dc3545",
            TrendCategory::Aquatic => "#17a2b8",
        }
    }
}

/// Selection of the category chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryView {
    #[default]
    All,
    Single(TrendCategory),
}

impl CategoryView {
    pub fn options() -> Vec<(CategoryView, &'static str)> {
        std::iter::once((CategoryView::All, "全部类别"))
            .chain(
                TrendCategory::ALL
                    .into_iter()
                    .map(|c| (CategoryView::Single(c), c.label())),
            )
            .collect()
    }
}

impl fmt::Display for CategoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryView::All => f.write_str("all"),
            CategoryView::Single(c) => f.write_str(c.key()),
        }
    }
}

impl FromStr for CategoryView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryView::All);
        }
        TrendCategory::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .map(CategoryView::Single)
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// Category chart data for `view`.
///
/// For `All` the dates of every non-empty category are merged and sorted;
/// a category without a point on some date gets a gap there.
pub fn category_series(trends: &CategoryTrends, view: CategoryView) -> SeriesSet {
    match view {
        CategoryView::Single(category) => {
            let points = trends.series(category);
            SeriesSet {
                labels: points.iter().map(|p| short_date(&p.date)).collect(),
                series: vec![NamedSeries {
                    name: format!("{}平均价格 (元/公斤)", category.label()),
                    color: category.color(),
                    values: points.iter().map(|p| p.avg_price).collect(),
                }],
            }
        }
        CategoryView::All => {
            let dates: BTreeSet<&str> = TrendCategory::ALL
                .iter()
                .flat_map(|c| trends.series(*c).iter().map(|p| p.date.as_str()))
                .collect();
            let series = TrendCategory::ALL
                .iter()
                .filter(|c| !trends.series(**c).is_empty())
                .map(|c| {
                    let points = trends.series(*c);
                    NamedSeries {
                        name: c.label().to_string(),
                        color: c.color(),
                        values: dates
                            .iter()
                            .map(|d| {
                                points
                                    .iter()
                                    .find(|p| p.date == *d)
                                    .and_then(|p| p.avg_price)
                            })
                            .collect(),
                    }
                })
                .collect();
            SeriesSet {
                labels: dates.iter().map(|d| short_date(d)).collect(),
                series,
            }
        }
    }
}

/// 200 index and basket index over time.
pub fn price_index_series(points: &[PriceIndexPoint]) -> SeriesSet {
    SeriesSet {
        labels: points.iter().map(|p| short_date(&p.date)).collect(),
        series: vec![
            NamedSeries {
                name: "农产品批发价格200指数".to_string(),
                color: "#007bff",
                values: points.iter().map(|p| p.price_index_200).collect(),
            },
            NamedSeries {
                name: "\"菜篮子\"产品批发价格指数".to_string(),
                color: "#28a745",
                values: points.iter().map(|p| p.basket_index).collect(),
            },
        ],
    }
}

/// Latest known price per key product, for the bar chart.
pub fn latest_product_prices(products: &BTreeMap<String, Vec<ProductPoint>>) -> Vec<(String, f64)> {
    products
        .iter()
        .filter_map(|(name, points)| {
            points
                .iter()
                .rev()
                .find_map(|p| p.price)
                .map(|price| (name.clone(), price))
        })
        .collect()
}

/// A headline value with its change against the previous point.
#[derive(Debug, Clone, PartialEq)]
pub struct Headline {
    pub value: String,
    pub change: Option<(String, &'static str)>,
}

/// Overview cards derived from the market dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPreview {
    pub price_index: Option<Headline>,
    pub vegetables: Option<Headline>,
    pub fruits: Option<Headline>,
    pub meat: Option<Headline>,
    pub date_range: String,
    pub total_reports: String,
}

impl DashboardPreview {
    pub fn from_dashboard(data: &MarketDashboard) -> Self {
        let summary = &data.market_summary;
        Self {
            price_index: index_headline(&data.price_index_trend),
            vegetables: category_headline(&data.category_price_trends.vegetables),
            fruits: category_headline(&data.category_price_trends.fruits),
            meat: category_headline(&data.category_price_trends.meat),
            date_range: summary.date_range.display(),
            total_reports: if summary.total_reports > 0 {
                format!("{} 篇", summary.total_reports)
            } else {
                "-".to_string()
            },
        }
    }
}

fn index_headline(points: &[PriceIndexPoint]) -> Option<Headline> {
    let latest = points.last()?;
    let value = latest.price_index_200?;
    let change = points
        .len()
        .checked_sub(2)
        .and_then(|i| points[i].price_index_200)
        .map(|previous| {
            let delta = value - previous;
            (signed_fixed(delta, 2), change_class(delta))
        });
    Some(Headline {
        value: format!("{:.2}", value),
        change,
    })
}

fn category_headline(points: &[CategoryPoint]) -> Option<Headline> {
    let latest = points.last()?;
    let price = latest.avg_price?;
    let rate = latest.change_rate.unwrap_or(0.0);
    Some(Headline {
        value: format!("{:.2} 元/公斤", price),
        change: Some((format!("{}%", signed_fixed(rate, 1)), change_class(rate))),
    })
}

/// Independently refreshable panel of the market dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPanel {
    PriceIndex,
    Categories,
    Products,
    Volatility,
}

impl DashboardPanel {
    pub fn label(&self) -> &'static str {
        match self {
            DashboardPanel::PriceIndex => "价格指数",
            DashboardPanel::Categories => "分类价格",
            DashboardPanel::Products => "重点产品",
            DashboardPanel::Volatility => "价格波动",
        }
    }

    /// Copies this panel's part of `fresh` into `target`, leaving the rest as is.
    pub fn merge_into(&self, target: &mut MarketDashboard, fresh: MarketDashboard) {
        match self {
            DashboardPanel::PriceIndex => target.price_index_trend = fresh.price_index_trend,
            DashboardPanel::Categories => target.category_price_trends = fresh.category_price_trends,
            DashboardPanel::Products => target.key_products_trends = fresh.key_products_trends,
            DashboardPanel::Volatility => target.volatility_analysis = fresh.volatility_analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vol(date: &str, product: &str, rate: f64) -> VolatilityEntry {
        VolatilityEntry {
            date: date.to_string(),
            product: product.to_string(),
            change_rate: rate,
        }
    }

    fn point(date: &str, price: f64) -> CategoryPoint {
        CategoryPoint {
            date: date.to_string(),
            avg_price: Some(price),
            change_rate: Some(0.0),
            product: None,
        }
    }

    #[test]
    fn test_latest_volatility() {
        let entries = vec![
            vol("2024-03-14", "白菜", 9.9),
            vol("2024-03-15", "西红柿", 3.1),
            vol("2024-03-15", "鲢鱼", -7.2),
            vol("2024-03-15", "菠菜", 5.0),
            vol("2024-03-15", "生菜", 1.0),
            vol("2024-03-15", "芹菜", 2.0),
            vol("2024-03-15", "黄瓜", 4.4),
        ];
        let top = latest_volatility(&entries, VOLATILITY_TOP_N);
        let names: Vec<&str> = top.iter().map(|e| e.product.as_str()).collect();
        assert_eq!(names, vec!["鲢鱼", "菠菜", "黄瓜", "西红柿", "芹菜"]);
        assert!(latest_volatility(&[], 5).is_empty());
        assert_eq!(top[0].change_text(), "-7.2%");
        assert_eq!(top[1].change_text(), "+5.0%");
    }

    #[test]
    fn test_category_merge_leaves_gaps() {
        let trends = CategoryTrends {
            vegetables: vec![point("2024-03-14", 4.1), point("2024-03-15", 4.2)],
            fruits: vec![point("2024-03-13", 7.0), point("2024-03-15", 7.1)],
            ..Default::default()
        };
        let set = category_series(&trends, CategoryView::All);
        assert_eq!(set.labels, vec!["03/13", "03/14", "03/15"]);
        assert_eq!(set.series.len(), 2);
        assert_eq!(set.series[0].name, "蔬菜");
        assert_eq!(set.series[0].values, vec![None, Some(4.1), Some(4.2)]);
        assert_eq!(set.series[1].values, vec![Some(7.0), None, Some(7.1)]);
        assert_eq!(set.series[1].color, "#ffc107");
    }

    #[test]
    fn test_single_category() {
        let trends = CategoryTrends {
            meat: vec![point("2024-03-15", 21.5)],
            ..Default::default()
        };
        let set = category_series(&trends, CategoryView::Single(TrendCategory::Meat));
        assert_eq!(set.labels, vec!["03/15"]);
        assert_eq!(set.series[0].name, "畜产品平均价格 (元/公斤)");
        let empty = category_series(&trends, CategoryView::Single(TrendCategory::Aquatic));
        assert!(empty.labels.is_empty());
    }

    #[test]
    fn test_category_view_parse() {
        assert_eq!("all".parse(), Ok(CategoryView::All));
        assert_eq!(
            "fruits".parse(),
            Ok(CategoryView::Single(TrendCategory::Fruits))
        );
        assert!("grain".parse::<CategoryView>().is_err());
        assert_eq!(CategoryView::options().len(), 5);
        assert_eq!(CategoryView::Single(TrendCategory::Aquatic).to_string(), "aquatic");
    }

    #[test]
    fn test_preview() {
        let data = MarketDashboard {
            price_index_trend: vec![
                PriceIndexPoint {
                    date: "2024-03-14".to_string(),
                    price_index_200: Some(120.0),
                    basket_index: None,
                },
                PriceIndexPoint {
                    date: "2024-03-15".to_string(),
                    price_index_200: Some(119.5),
                    basket_index: Some(121.3),
                },
            ],
            category_price_trends: CategoryTrends {
                vegetables: vec![CategoryPoint {
                    change_rate: Some(1.26),
                    ..point("2024-03-15", 5.0)
                }],
                ..Default::default()
            },
            market_summary: MarketSummary {
                total_reports: 12,
                date_range: DateRange {
                    start: "2024-03-01".to_string(),
                    end: "2024-03-15".to_string(),
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let preview = DashboardPreview::from_dashboard(&data);
        let index = preview.price_index.unwrap();
        assert_eq!(index.value, "119.50");
        assert_eq!(index.change, Some(("-0.50".to_string(), "negative")));
        let veg = preview.vegetables.unwrap();
        assert_eq!(veg.value, "5.00 元/公斤");
        assert_eq!(veg.change, Some(("+1.3%".to_string(), "positive")));
        assert!(preview.fruits.is_none());
        assert_eq!(preview.date_range, "03/01 至 03/15");
        assert_eq!(preview.total_reports, "12 篇");
    }

    #[test]
    fn test_decode_response_with_summary() {
        let json = r#"{
            "success": true,
            "data": {
                "price_index_trend": [{"date": "2024-03-15", "price_index_200": 119.5, "basket_index": null}],
                "category_price_trends": {"vegetables": [], "fruits": [], "meat": [], "aquatic": []},
                "key_products_trends": {"猪肉": [{"date": "2024-03-14", "price": 20.1, "unit": "元/公斤"},
                                                 {"date": "2024-03-15", "price": 20.4, "unit": "元/公斤"}]},
                "market_summary": {},
                "volatility_analysis": {"top_gainers": [], "top_losers": [], "volatility_summary": {}}
            },
            "summary": {"total_reports": 3, "date_range": {"start": "2024-03-13", "end": "2024-03-15"}}
        }"#;
        let resp: MarketDashboardResponse = serde_json::from_str(json).unwrap();
        let (data, summary) = resp.into_parts().unwrap();
        assert_eq!(summary.total_reports, 3);
        assert_eq!(data.market_summary, MarketSummary::default());
        assert_eq!(
            latest_product_prices(&data.key_products_trends),
            vec![("猪肉".to_string(), 20.4)]
        );
    }

    #[test]
    fn test_decode_error_without_success() {
        let resp: MarketDashboardResponse =
            serde_json::from_str(r#"{"error": "没有找到日报数据"}"#).unwrap();
        assert_eq!(
            resp.into_parts().unwrap_err(),
            ApiError::Rejected("没有找到日报数据".to_string())
        );
    }

    #[test]
    fn test_conclusion_sections_skip_empty() {
        let c = LatestConclusions {
            overall: "平稳".to_string(),
            meat: "猪肉下降".to_string(),
            ..Default::default()
        };
        assert_eq!(c.sections(), vec![("总体情况", "平稳"), ("畜产品", "猪肉下降")]);
    }

    #[test]
    fn test_panel_merge_touches_one_part() {
        let mut current = MarketDashboard {
            price_index_trend: vec![PriceIndexPoint {
                date: "2024-03-14".to_string(),
                price_index_200: Some(120.0),
                basket_index: None,
            }],
            ..Default::default()
        };
        current.volatility_analysis.top_gainers = vec![vol("2024-03-14", "白菜", 9.9)];

        let fresh = MarketDashboard {
            price_index_trend: Vec::new(),
            volatility_analysis: Volatility {
                top_gainers: vec![vol("2024-03-15", "菠菜", 5.0)],
                top_losers: Vec::new(),
            },
            ..Default::default()
        };
        DashboardPanel::Volatility.merge_into(&mut current, fresh);

        assert_eq!(current.price_index_trend.len(), 1);
        assert_eq!(current.volatility_analysis.top_gainers[0].product, "菠菜");
    }
}
