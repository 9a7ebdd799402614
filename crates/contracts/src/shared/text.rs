//! Small text helpers shared by table rendering and exports.

/// Cuts `text` to `max_chars` characters, appending `...` when shortened.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}

/// Always-quoted CSV field with embedded quotes doubled.
pub fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Escapes text for insertion into generated HTML documents.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// First non-blank value, or `"-"`.
pub fn or_dash<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|s| !s.trim().is_empty())
        .unwrap_or("-")
}

/// Fixed-point value with an explicit `+` for non-negative numbers.
pub fn signed_fixed(value: f64, decimals: usize) -> String {
    if value >= 0.0 {
        format!("+{:.*}", decimals, value)
    } else {
        format!("{:.*}", decimals, value)
    }
}

/// CSS modifier for a change value: `positive` or `negative`.
pub fn change_class(value: f64) -> &'static str {
    if value >= 0.0 {
        "positive"
    } else {
        "negative"
    }
}

/// `2024-03-15` (optionally followed by a time) → `03/15`.
///
/// Values that are not ISO dates are returned unchanged.
pub fn short_date(value: &str) -> String {
    let date_part = value.trim().get(..10).unwrap_or(value.trim());
    match chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(d) => d.format("%m/%d").to_string(),
        Err(_) => value.to_string(),
    }
}

/// `Some(v)` as `v` with two decimals, `-` otherwise.
pub fn price_or_dash(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

/// Cleans report HTML for insertion into the page.
///
/// Scripts, styles, event handler attributes and non-http URLs are removed;
/// stray `<` is escaped.
pub fn sanitize_html(html: &str) -> String {
    ammonia::clean(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("短标题", 50), "短标题");
        assert_eq!(truncate_chars("农产品批发市场价格日报", 5), "农产品批发...");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_csv_quote() {
        assert_eq!(csv_quote("plain"), "\"plain\"");
        assert_eq!(csv_quote("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_quote("a,b\nc"), "\"a,b\nc\"");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape("<b>猪肉 & 牛肉</b>"),
            "&lt;b&gt;猪肉 &amp; 牛肉&lt;/b&gt;"
        );
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(&["", "2024-03-15"]), "2024-03-15");
        assert_eq!(or_dash(&["  ", ""]), "-");
        assert_eq!(or_dash(&[]), "-");
    }

    #[test]
    fn test_signed_fixed() {
        assert_eq!(signed_fixed(1.234, 2), "+1.23");
        assert_eq!(signed_fixed(0.0, 1), "+0.0");
        assert_eq!(signed_fixed(-2.36, 1), "-2.4");
        assert_eq!(change_class(0.0), "positive");
        assert_eq!(change_class(-0.1), "negative");
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date("2024-03-05"), "03/05");
        assert_eq!(short_date("2024-12-31T08:00:00"), "12/31");
        assert_eq!(short_date("三月"), "三月");
        assert_eq!(short_date(""), "");
    }

    #[test]
    fn test_price_or_dash() {
        assert_eq!(price_or_dash(Some(3.456)), "3.46");
        assert_eq!(price_or_dash(None), "-");
    }

    #[test]
    fn test_sanitize_keeps_plain_markup() {
        let html = "<p>猪肉价格<b>上涨</b></p><table><tbody><tr><td>1</td></tr></tbody></table>";
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn test_sanitize_drops_scripts_and_handlers() {
        let html = "<div onclick='steal()'>a<script>alert(1)</script>b</div>";
        assert_eq!(sanitize_html(html), "<div>ab</div>");

        let cleaned = sanitize_html("<a href=\"javascript:alert(1)\">link</a>");
        assert!(!cleaned.contains("javascript"));
        assert!(cleaned.contains(">link</a>"));

        assert_eq!(sanitize_html("<style>p{}</style><p>k</p>"), "<p>k</p>");
    }

    #[test]
    fn test_sanitize_escapes_stray_brackets() {
        let cleaned = sanitize_html("涨幅 < 5%");
        assert!(cleaned.contains("&lt;"));
        assert_eq!(sanitize_html(""), "");
    }
}
