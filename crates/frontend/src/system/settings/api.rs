use crate::shared::http::{get_json, post_json};
use contracts::shared::api_response::{ApiEnvelope, ApiError};
use contracts::system::crawler::dto::CrawlerConfig;
use contracts::system::health::HealthStatus;

pub async fn save_crawler_config(config: &CrawlerConfig) -> Result<String, ApiError> {
    post_json::<_, ApiEnvelope<()>>("/crawler/config", config)
        .await?
        .into_ack()
}

/// `GET /api/health`, ответ без конверта
pub async fn check_health() -> Result<HealthStatus, ApiError> {
    get_json::<HealthStatus>("/health").await
}
