use crate::shared::http::get_json;
use contracts::dashboards::d400_overview::dto::SystemStats;
use contracts::domain::a002_analysis_report::dto::ReportStats;
use contracts::shared::api_response::{ApiEnvelope, ApiError};

/// Сводная статистика системы (`GET /api/stats`)
pub async fn fetch_stats() -> Result<SystemStats, ApiError> {
    get_json::<ApiEnvelope<SystemStats>>("/stats")
        .await?
        .into_data()
}

/// Счётчики отчётов по типам. Этот endpoint отвечает без конверта.
pub async fn fetch_report_stats() -> Result<ReportStats, ApiError> {
    get_json::<ReportStats>("/reports/stats").await
}
