// Application layer - Service seam and state container
pub mod sensor_api;
pub mod sensor_store;
