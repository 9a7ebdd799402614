use crate::shared::lenient;
use crate::shared::text::{csv_quote, html_escape, or_dash, sanitize_html, truncate_chars};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Max characters of a report title in the listing.
pub const TITLE_MAX_CHARS: usize = 50;

/// Фильтр типа аналитического отчёта.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    All,
    Daily,
    Monthly,
    Yearly,
}

impl ReportType {
    pub const ALL: [ReportType; 4] = [
        ReportType::All,
        ReportType::Daily,
        ReportType::Monthly,
        ReportType::Yearly,
    ];

    /// Value of the `report_type` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            ReportType::All => "all",
            ReportType::Daily => "daily",
            ReportType::Monthly => "monthly",
            ReportType::Yearly => "yearly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportType::All => "全部",
            ReportType::Daily => "日报",
            ReportType::Monthly => "月报",
            ReportType::Yearly => "年报",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ReportType::All),
            "daily" => Ok(ReportType::Daily),
            "monthly" => Ok(ReportType::Monthly),
            "yearly" => Ok(ReportType::Yearly),
            other => Err(format!("unknown report type: {}", other)),
        }
    }
}

/// Аналитический отчёт (日报 / 月报 / 年报) с выводами по категориям.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(rename = "报告ID", default, deserialize_with = "lenient::string")]
    pub report_id: String,
    #[serde(rename = "报告标题", default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(rename = "报告类型", default, deserialize_with = "lenient::string")]
    pub type_name: String,
    #[serde(rename = "报告类型代码", default, deserialize_with = "lenient::string")]
    pub type_code: String,
    #[serde(rename = "日报日期", default, deserialize_with = "lenient::string")]
    pub report_date: String,
    #[serde(rename = "发布时间", default, deserialize_with = "lenient::string")]
    pub publish_time: String,
    #[serde(rename = "来源", default, deserialize_with = "lenient::string")]
    pub source: String,
    #[serde(rename = "爬取时间", default, deserialize_with = "lenient::string")]
    pub crawl_time: String,
    #[serde(rename = "总体结论", default, deserialize_with = "lenient::string")]
    pub overall_conclusion: String,
    #[serde(rename = "畜产品结论", default, deserialize_with = "lenient::string")]
    pub animal_conclusion: String,
    #[serde(rename = "水产品结论", default, deserialize_with = "lenient::string")]
    pub aquatic_conclusion: String,
    #[serde(rename = "蔬菜结论", default, deserialize_with = "lenient::string")]
    pub vegetables_conclusion: String,
    #[serde(rename = "水果结论", default, deserialize_with = "lenient::string")]
    pub fruits_conclusion: String,
    #[serde(rename = "价格指数结论", default, deserialize_with = "lenient::string")]
    pub index_conclusion: String,
    #[serde(rename = "涨跌幅分析", default, deserialize_with = "lenient::string")]
    pub change_analysis: String,
    #[serde(rename = "报告内容", default, deserialize_with = "lenient::string")]
    pub content_html: String,
    #[serde(rename = "纯文本内容", default, deserialize_with = "lenient::string")]
    pub plain_text: String,
}

impl AnalysisReport {
    /// Report date for daily reports, publish time otherwise.
    pub fn display_date(&self) -> &str {
        or_dash(&[self.report_date.as_str(), self.publish_time.as_str()])
    }

    pub fn display_title(&self) -> String {
        truncate_chars(or_dash(&[self.title.as_str()]), TITLE_MAX_CHARS)
    }

    /// Conclusion blocks in the order they appear in the detail view.
    pub fn conclusion_sections(&self) -> [(&'static str, &str); 7] {
        [
            ("总体结论", self.overall_conclusion.as_str()),
            ("畜产品价格", self.animal_conclusion.as_str()),
            ("水产品价格", self.aquatic_conclusion.as_str()),
            ("蔬菜价格", self.vegetables_conclusion.as_str()),
            ("水果价格", self.fruits_conclusion.as_str()),
            ("价格指数", self.index_conclusion.as_str()),
            ("涨跌幅分析", self.change_analysis.as_str()),
        ]
    }

    /// Body shown in the detail view: HTML content, else plain text.
    pub fn body(&self) -> Option<&str> {
        [self.content_html.as_str(), self.plain_text.as_str()]
            .into_iter()
            .find(|s| !s.trim().is_empty())
    }

    /// Detail body as safe HTML: sanitised report markup, or escaped plain text.
    pub fn body_html(&self) -> Option<String> {
        if !self.content_html.trim().is_empty() {
            return Some(sanitize_html(&self.content_html));
        }
        self.body()
            .map(|text| html_escape(text).replace('\n', "<br>"))
    }

    /// Single-report CSV: a `字段,内容` header and one row per field.
    pub fn to_csv(&self) -> String {
        let rows: [(&str, &str); 12] = [
            ("字段", "内容"),
            ("报告标题", self.title.as_str()),
            ("报告类型", self.type_name.as_str()),
            ("发布时间", self.date_or_empty()),
            ("来源", self.source.as_str()),
            ("总体结论", self.overall_conclusion.as_str()),
            ("畜产品结论", self.animal_conclusion.as_str()),
            ("水产品结论", self.aquatic_conclusion.as_str()),
            ("蔬菜结论", self.vegetables_conclusion.as_str()),
            ("水果结论", self.fruits_conclusion.as_str()),
            ("价格指数结论", self.index_conclusion.as_str()),
            ("涨跌幅分析", self.change_analysis.as_str()),
        ];
        rows.iter()
            .map(|(k, v)| format!("{},{}", csv_quote(k), csv_quote(v)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `report_<id>_<YYYY-MM-DD>.csv`; `unknown` when the report has no id.
    pub fn csv_filename(&self, date: chrono::NaiveDate) -> String {
        let id = if self.report_id.trim().is_empty() {
            "unknown"
        } else {
            self.report_id.trim()
        };
        format!("report_{}_{}.csv", id, date.format("%Y-%m-%d"))
    }

    /// Standalone printable HTML document. All values are escaped.
    pub fn to_printable_html(&self) -> String {
        let title = html_escape(&self.title);
        let mut sections = String::new();
        for (heading, text) in self.conclusion_sections() {
            sections.push_str(&format!(
                "<h2>{}</h2>\n<p>{}</p>\n",
                heading,
                html_escape(text)
            ));
        }
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: Arial, sans-serif; margin: 20px; line-height: 1.6; }}
h1 {{ color: #333; border-bottom: 2px solid #667eea; padding-bottom: 10px; }}
h2 {{ color: #555; margin-top: 20px; }}
.meta {{ background: #f5f5f5; padding: 15px; border-radius: 5px; margin-bottom: 20px; }}
@media print {{ body {{ margin: 0; }} }}
</style>
</head>
<body>
<h1>{title}</h1>
<div class="meta">
<p><strong>报告类型：</strong>{type_name}</p>
<p><strong>发布时间：</strong>{date}</p>
<p><strong>来源：</strong>{source}</p>
</div>
<div class="content">
{sections}</div>
</body>
</html>
"#,
            title = title,
            type_name = html_escape(&self.type_name),
            date = html_escape(self.date_or_empty()),
            source = html_escape(&self.source),
            sections = sections,
        )
    }

    fn date_or_empty(&self) -> &str {
        if self.report_date.trim().is_empty() {
            &self.publish_time
        } else {
            &self.report_date
        }
    }
}

/// Query of `GET /api/reports/latest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPageQuery {
    pub limit: u32,
    pub page: u32,
    pub report_type: ReportType,
}

/// Статистика отчётов (`GET /api/reports/stats`, без конверта).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub daily_count: u64,
    #[serde(default)]
    pub monthly_count: u64,
    #[serde(default)]
    pub yearly_count: u64,
    #[serde(default, deserialize_with = "lenient::count_map")]
    pub types: BTreeMap<String, u64>,
}

impl ReportStats {
    pub fn count_for(&self, report_type: ReportType) -> u64 {
        match report_type {
            ReportType::All => self.total,
            ReportType::Daily => self.daily_count,
            ReportType::Monthly => self.monthly_count,
            ReportType::Yearly => self.yearly_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisReport {
        AnalysisReport {
            report_id: "42".to_string(),
            title: "2024年3月15日农产品批发市场价格日报".to_string(),
            type_name: "农产品批发市场价格日报".to_string(),
            report_date: "2024-03-15".to_string(),
            source: "农业农村部".to_string(),
            overall_conclusion: "\"农产品批发价格200指数\"为120.5".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_deserialize_report() {
        let json = r#"{"报告ID": 42, "报告标题": "日报", "报告类型": "农产品批发市场价格日报",
                       "日报日期": "", "发布时间": "2024-03-01", "来源": "农业农村部",
                       "爬取时间": "2024-03-01 10:00:00", "总体结论": "平稳"}"#;
        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.report_id, "42");
        assert_eq!(report.display_date(), "2024-03-01");
        assert_eq!(report.body(), None);
        assert_eq!(report.body_html(), None);
        assert_eq!(report.conclusion_sections()[0], ("总体结论", "平稳"));
    }

    #[test]
    fn test_body_html() {
        let mut report = sample();
        report.plain_text = "第一行\n<第二行>".to_string();
        assert_eq!(report.body_html().as_deref(), Some("第一行<br>&lt;第二行&gt;"));
        report.content_html = "<p onmouseover=\"x()\">正文</p>".to_string();
        assert_eq!(report.body_html().as_deref(), Some("<p>正文</p>"));
    }

    #[test]
    fn test_csv_export() {
        let csv = sample().to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "\"字段\",\"内容\"");
        assert_eq!(lines[3], "\"发布时间\",\"2024-03-15\"");
        assert_eq!(
            lines[5],
            "\"总体结论\",\"\"\"农产品批发价格200指数\"\"为120.5\""
        );
    }

    #[test]
    fn test_csv_filename() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        assert_eq!(sample().csv_filename(date), "report_42_2024-03-16.csv");
        let anonymous = AnalysisReport::default();
        assert_eq!(anonymous.csv_filename(date), "report_unknown_2024-03-16.csv");
    }

    #[test]
    fn test_printable_html_is_escaped() {
        let mut report = sample();
        report.title = "<script>x</script>".to_string();
        let html = report.to_printable_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<h2>涨跌幅分析</h2>"));
    }

    #[test]
    fn test_display_title_truncated() {
        let mut report = sample();
        report.title = "长".repeat(60);
        assert_eq!(report.display_title().chars().count(), TITLE_MAX_CHARS + 3);
        assert_eq!(AnalysisReport::default().display_title(), "-");
    }

    #[test]
    fn test_report_type_roundtrip_names() {
        for t in ReportType::ALL {
            assert_eq!(t.as_query().parse::<ReportType>(), Ok(t));
        }
        assert!("weekly".parse::<ReportType>().is_err());
        assert_eq!(ReportType::Monthly.label(), "月报");
    }

    #[test]
    fn test_stats_without_data() {
        let stats: ReportStats = serde_json::from_str(
            r#"{"total": 0, "daily_count": 0, "monthly_count": 0, "yearly_count": 0, "types": []}"#,
        )
        .unwrap();
        assert_eq!(stats, ReportStats::default());
        let stats: ReportStats = serde_json::from_str(
            r#"{"total": 5, "daily_count": 4, "monthly_count": 1, "yearly_count": 0,
                "types": {"农产品批发市场价格日报": 4, "农业分析报告": 1}}"#,
        )
        .unwrap();
        assert_eq!(stats.count_for(ReportType::Daily), 4);
        assert_eq!(stats.types.len(), 2);
    }
}
