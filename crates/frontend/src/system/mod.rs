pub mod crawler_control;
pub mod settings;
