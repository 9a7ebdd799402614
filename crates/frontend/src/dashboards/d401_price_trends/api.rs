use crate::shared::api_utils::with_query;
use crate::shared::http::get_json;
use contracts::dashboards::d401_price_trends::dto::{TrendsData, TrendsQuery};
use contracts::shared::api_response::{ApiEnvelope, ApiError};

/// Тренды цен и отчётов за последние `days` дней
pub async fn fetch_trends(query: TrendsQuery) -> Result<TrendsData, ApiError> {
    let path = with_query("/dashboard/trends", &query);
    get_json::<ApiEnvelope<TrendsData>>(&path).await?.into_data()
}
