use crate::shared::http::get_json;
use contracts::dashboards::d402_market_dashboard::dto::{
    DashboardSummary, MarketDashboard, MarketDashboardResponse,
};
use contracts::shared::api_response::ApiError;

/// Данные рыночного дашборда вместе с верхнеуровневым `summary`
pub async fn fetch_dashboard() -> Result<(MarketDashboard, DashboardSummary), ApiError> {
    get_json::<MarketDashboardResponse>("/dashboard/data")
        .await?
        .into_parts()
}
