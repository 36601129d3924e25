// Application layer - Augmentation use cases and their ports
pub mod anomaly_client;
pub mod augment_service;
pub mod error;
pub mod forecast_client;
pub mod response_parser;
pub mod series_merger;
pub mod stats_gateway;
