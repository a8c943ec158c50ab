// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_sensor_api;
pub mod query;
