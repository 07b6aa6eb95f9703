// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod fake_time_series;
pub mod payload_mapper;
pub mod wave_transport;
