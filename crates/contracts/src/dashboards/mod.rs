pub mod d400_overview;
pub mod d401_price_trends;
pub mod d402_market_dashboard;
