pub mod api_response;
pub mod lenient;
pub mod pagination;
pub mod series;
pub mod text;
