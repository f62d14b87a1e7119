pub mod error;
pub mod service;
pub mod settings;
pub mod source;
pub mod surface;
pub mod telemetry;
