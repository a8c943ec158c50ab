// Domain layer - Plain data records exchanged with the sensor API
pub mod filter;
pub mod insight;
pub mod sensor;
pub mod upload;
