pub mod chart;
pub mod pagination_controls;
pub mod stat_card;
pub mod state_views;

pub use pagination_controls::PaginationControls;
pub use stat_card::StatCard;
pub use state_views::{EmptyState, LoadingState};
