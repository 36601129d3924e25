// Presentation layer - HTTP surface standing in for the chart UI
pub mod app_state;
pub mod handlers;
pub mod routes;
