//! API utilities for frontend-backend communication
//!
//! Paths passed around the app are relative to the API prefix (`/stats`,
//! `/reports/latest`, ...). The prefix comes from the stored [`AppConfig`].

use crate::shared::config::AppConfig;
use serde::Serialize;

/// Get the base URL for API requests, e.g. `/api`.
pub fn api_base() -> String {
    AppConfig::load().base().to_string()
}

/// Build a full API URL from a path
///
/// # Example
/// ```ignore
/// let url = api_url("/reports/stats");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

/// Path with an url-encoded query string. Empty queries add nothing.
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> String {
    match serde_qs::to_string(query) {
        Ok(qs) if !qs.is_empty() => format!("{}?{}", path, qs),
        Ok(_) => path.to_string(),
        Err(e) => {
            log::error!("failed to encode query for {}: {}", path, e);
            path.to_string()
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_price_record::dto::ExportFilter;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("/api", "/stats"), "/api/stats");
        assert_eq!(join_url("/api/", "stats"), "/api/stats");
        assert_eq!(
            join_url("http://localhost:8000/api", "/reports/latest"),
            "http://localhost:8000/api/reports/latest"
        );
    }

    #[test]
    fn test_with_query_skips_empty_filters() {
        assert_eq!(with_query("/export/csv", &ExportFilter::default()), "/export/csv");
        let filter = ExportFilter {
            province: Some("山东".to_string()),
            date_from: Some("2024-03-01".to_string()),
            ..Default::default()
        };
        assert_eq!(
            with_query("/export/csv", &filter),
            "/export/csv?province=%E5%B1%B1%E4%B8%9C&date_from=2024-03-01"
        );
    }
}
