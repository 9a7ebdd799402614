pub mod dashboard;

pub use dashboard::MarketDashboardPage;
