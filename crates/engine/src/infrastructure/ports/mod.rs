//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Session storage (could swap in-memory -> SQLite/IndexedDB)
//! - Narrative logging on completion (optional host hook)
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::NegotiationRepo;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::NarrativeLogPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::MockNarrativeLogPort;
#[cfg(test)]
pub use repos::MockNegotiationRepo;
#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{NarrativeLogError, RepoError};
