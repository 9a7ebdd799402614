use crate::shared::http::{get_json, post_empty};
use contracts::shared::api_response::{ApiEnvelope, ApiError};
use contracts::system::crawler::dto::{CrawlMode, CrawlerKind, CrawlerStatus};

/// Returns the backend acknowledgement, e.g. "爬虫已启动".
pub async fn start(kind: CrawlerKind) -> Result<String, ApiError> {
    post_empty::<ApiEnvelope<()>>(&kind.start_path())
        .await?
        .into_ack()
}

pub async fn stop(kind: CrawlerKind) -> Result<String, ApiError> {
    post_empty::<ApiEnvelope<()>>(&kind.stop_path())
        .await?
        .into_ack()
}

pub async fn status(kind: CrawlerKind) -> Result<CrawlerStatus, ApiError> {
    get_json::<ApiEnvelope<CrawlerStatus>>(&kind.status_path())
        .await?
        .into_data()
}

/// Однократный запуск парсера отчётов
pub async fn crawl_once(mode: CrawlMode) -> Result<String, ApiError> {
    post_empty::<ApiEnvelope<()>>(&mode.crawl_once_path())
        .await?
        .into_ack()
}
