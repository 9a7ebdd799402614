pub mod a001_price_record;
pub mod a002_analysis_report;
