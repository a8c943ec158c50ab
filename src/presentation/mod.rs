// Presentation layer - Routes, page handlers and text views
pub mod app_state;
pub mod cli;
pub mod handlers;
pub mod router;
pub mod views;
