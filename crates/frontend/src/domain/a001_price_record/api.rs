use crate::shared::api_utils::{api_url, with_query};
use crate::shared::date_utils::today;
use crate::shared::export::download_url;
use crate::shared::http::{get_json, post_json};
use contracts::domain::a001_price_record::dto::{
    export_filename, ExportFilter, FilterOptions, PriceRecord, SearchQuery,
};
use contracts::shared::api_response::{ApiEnvelope, ApiError};

async fn fetch_option_list(kind: &str) -> Result<Vec<String>, ApiError> {
    get_json::<ApiEnvelope<Vec<String>>>(&format!("/data/{}", kind))
        .await?
        .into_data()
}

/// Значения для выпадающих списков формы поиска
pub async fn fetch_filter_options() -> Result<FilterOptions, ApiError> {
    let provinces = fetch_option_list("provinces").await?;
    let varieties = fetch_option_list("varieties").await?;
    let markets = fetch_option_list("markets").await?;
    Ok(FilterOptions {
        provinces,
        varieties,
        markets,
    })
}

/// Последние записи. Returns the rows and the reported count.
pub async fn fetch_latest(limit: u32) -> Result<(Vec<PriceRecord>, u64), ApiError> {
    get_json::<ApiEnvelope<Vec<PriceRecord>>>(&format!("/data/latest?limit={}", limit))
        .await?
        .into_rows()
}

pub async fn search(query: &SearchQuery) -> Result<(Vec<PriceRecord>, u64), ApiError> {
    post_json::<_, ApiEnvelope<Vec<PriceRecord>>>("/search", query)
        .await?
        .into_rows()
}

/// Starts a browser download of `GET /api/export/csv` with the non-empty filters.
pub fn export_csv(filter: &ExportFilter) -> Result<(), String> {
    let url = api_url(&with_query("/export/csv", filter));
    download_url(&url, Some(&export_filename(today())))
}
