use crate::shared::api_utils::{api_url, with_query};
use crate::shared::export::download_url;
use crate::shared::http::get_json;
use contracts::domain::a002_analysis_report::dto::{AnalysisReport, ReportPageQuery};
use contracts::shared::api_response::{ApiEnvelope, ApiError, Page};

pub use crate::dashboards::d400_overview::api::fetch_report_stats;

/// Страница отчётов (`GET /api/reports/latest?limit&page&report_type`)
pub async fn fetch_page(query: &ReportPageQuery) -> Result<Page<AnalysisReport>, ApiError> {
    let path = with_query("/reports/latest", query);
    get_json::<ApiEnvelope<Vec<AnalysisReport>>>(&path)
        .await?
        .into_page()
}

/// Выгрузка всех отчётов, файл формирует сервер
pub fn export_all() -> Result<(), String> {
    download_url(&api_url("/reports/export"), None)
}
