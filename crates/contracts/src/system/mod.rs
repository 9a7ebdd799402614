pub mod crawler;
pub mod health;
