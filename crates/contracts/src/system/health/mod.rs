use serde::{Deserialize, Serialize};

/// Ответ `GET /api/health` (без конверта).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub version: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health() {
        let h: HealthStatus = serde_json::from_str(
            r#"{"status": "healthy", "timestamp": "2024-03-15T10:00:00", "version": "2.0.0"}"#,
        )
        .unwrap();
        assert!(h.is_healthy());
        assert!(!HealthStatus::default().is_healthy());
    }
}
