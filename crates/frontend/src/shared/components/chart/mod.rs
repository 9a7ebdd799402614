pub mod bar_chart;
pub mod geometry;
pub mod line_chart;

pub use bar_chart::BarChart;
pub use line_chart::LineChart;
