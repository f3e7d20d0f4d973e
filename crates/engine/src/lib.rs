//! Parley negotiation engine.
//!
//! Async orchestration of the negotiation domain model over swappable ports.
//!
//! ## Structure
//!
//! - `use_cases/` - Operations a host calls (create, start, record arguments, ...)
//! - `infrastructure/` - Ports plus the in-memory, clock, config and tracing adapters
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
