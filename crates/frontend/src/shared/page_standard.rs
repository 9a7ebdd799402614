//! Page category constants.
//!
//! Every section page declares:
//!   - HTML `id` in the format `{section}--{category}` (e.g. `"a002_analysis_report--list"`)
//!   - `data-page-category` with one of the constants below

/// List of records: table with filters/pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Detail view of a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Analytical dashboard / chart view.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// System administration page.
pub const PAGE_CAT_SYSTEM: &str = "system";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DETAIL,
    PAGE_CAT_DASHBOARD,
    PAGE_CAT_SYSTEM,
];

/// Validate that a page id matches the `{section}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    let parts: Vec<&str> = id.splitn(2, "--").collect();
    parts.len() == 2 && !parts[0].is_empty() && ALL_CATEGORIES.contains(&parts[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("d400_overview--dashboard"));
        assert!(is_valid_page_id("a002_analysis_report--list"));
        assert!(!is_valid_page_id("settings"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("settings--page"));
    }
}
