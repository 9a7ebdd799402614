pub mod dashboard;

pub use dashboard::{OverviewDashboard, PreviewCards};
