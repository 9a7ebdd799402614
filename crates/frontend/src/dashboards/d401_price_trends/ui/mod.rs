pub mod dashboard;

pub use dashboard::PriceTrendsDashboard;
