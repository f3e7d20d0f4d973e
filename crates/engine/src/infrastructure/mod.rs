//! Infrastructure layer - ports and their implementations.

pub mod clock;
pub mod config;
pub mod memory;
pub mod ports;
pub mod telemetry;
