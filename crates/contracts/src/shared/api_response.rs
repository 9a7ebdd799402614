use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибка обращения к backend API.
///
/// Transport failures and `success: false` responses are both errors; an
/// empty successful result is not.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTTP {status}{}", .detail.as_ref().map(|d| format!(": {d}")).unwrap_or_default())]
    Http { status: u16, detail: Option<String> },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Response contains no data")]
    MissingData,
}

impl ApiError {
    /// Short text for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "网络错误，请检查连接".to_string(),
            ApiError::Http { status, detail } => match detail {
                Some(d) if !d.is_empty() => format!("服务器错误 ({}): {}", status, d),
                _ => format!("服务器错误 ({})", status),
            },
            ApiError::Decode(_) => "响应格式错误".to_string(),
            ApiError::Rejected(msg) => msg.clone(),
            ApiError::MissingData => "响应中没有数据".to_string(),
        }
    }
}

/// Body FastAPI returns for `HTTPException`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn text(self) -> Option<String> {
        self.detail.or(self.error).or(self.message)
    }
}

/// Common response envelope of the market API.
///
/// `{ success, data?, count?, total?, total_pages?, page?, limit?, report_type?, error?, message? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub report_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            total: None,
            total_pages: None,
            page: None,
            limit: None,
            report_type: None,
            error: None,
            message: None,
            detail: None,
        }
    }

    fn rejection(&mut self) -> ApiError {
        let text = self
            .error
            .take()
            .or_else(|| self.message.take())
            .or_else(|| self.detail.take())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "未知错误".to_string());
        ApiError::Rejected(text)
    }

    /// Payload of a successful response.
    pub fn into_data(mut self) -> Result<T, ApiError> {
        if !self.success {
            return Err(self.rejection());
        }
        self.data.ok_or(ApiError::MissingData)
    }

    /// Acknowledgement message for command-style endpoints (start/stop/config).
    pub fn into_ack(mut self) -> Result<String, ApiError> {
        if !self.success {
            return Err(self.rejection());
        }
        Ok(self.message.unwrap_or_default())
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total items across all pages.
    pub total: u64,
    pub page: u32,
    /// `None` when the backend did not report it.
    pub total_pages: Option<u32>,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> ApiEnvelope<Vec<T>> {
    /// Paginated payload. A successful response with no rows is an empty page.
    pub fn into_page(mut self) -> Result<Page<T>, ApiError> {
        if !self.success {
            return Err(self.rejection());
        }
        let items = self.data.take().unwrap_or_default();
        let total = self
            .total
            .or(self.count)
            .unwrap_or(items.len() as u64);
        Ok(Page {
            items,
            total,
            page: self.page.unwrap_or(1).max(1),
            total_pages: self.total_pages,
        })
    }

    /// Non-paginated listing: rows plus the reported count.
    pub fn into_rows(mut self) -> Result<(Vec<T>, u64), ApiError> {
        if !self.success {
            return Err(self.rejection());
        }
        let items = self.data.take().unwrap_or_default();
        let count = self.count.unwrap_or(items.len() as u64);
        Ok((items, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_data_success() {
        let env: ApiEnvelope<Vec<String>> =
            serde_json::from_str(r#"{"success": true, "data": ["北京", "上海"]}"#).unwrap();
        assert_eq!(env.into_data().unwrap(), vec!["北京", "上海"]);
    }

    #[test]
    fn test_missing_success_is_failure() {
        let env: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"error": "报告数据文件不存在"}"#).unwrap();
        assert_eq!(
            env.into_data(),
            Err(ApiError::Rejected("报告数据文件不存在".to_string()))
        );
    }

    #[test]
    fn test_detail_used_as_message() {
        let env: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"detail": "boom"}"#).unwrap();
        assert_eq!(env.into_data(), Err(ApiError::Rejected("boom".to_string())));

        let env: ApiEnvelope<serde_json::Value> = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(env.into_data(), Err(ApiError::Rejected("未知错误".to_string())));
    }

    #[test]
    fn test_success_without_data() {
        let env: ApiEnvelope<Vec<u32>> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(env.into_data(), Err(ApiError::MissingData));
    }

    #[test]
    fn test_empty_page_is_not_an_error() {
        let env: ApiEnvelope<Vec<u32>> = serde_json::from_str(
            r#"{"success": true, "count": 0, "data": [], "total": 0, "page": 1, "total_pages": 0}"#,
        )
        .unwrap();
        let page = env.into_page().unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, Some(0));
    }

    #[test]
    fn test_page_fields() {
        let env: ApiEnvelope<Vec<u32>> = serde_json::from_str(
            r#"{"success": true, "data": [1, 2], "total": 12, "page": 2, "total_pages": 2, "limit": 10}"#,
        )
        .unwrap();
        let page = env.into_page().unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.total, 12);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn test_ack() {
        let env: ApiEnvelope<()> =
            serde_json::from_str(r#"{"success": true, "message": "爬虫已启动"}"#).unwrap();
        assert_eq!(env.into_ack().unwrap(), "爬虫已启动");
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Http {
            status: 500,
            detail: Some("oops".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP 500: oops");
        let err = ApiError::Http {
            status: 404,
            detail: None,
        };
        assert_eq!(err.to_string(), "HTTP 404");
        assert_eq!(err.user_message(), "服务器错误 (404)");
    }
}
