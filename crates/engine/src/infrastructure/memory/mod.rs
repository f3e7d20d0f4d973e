//! In-memory adapters.

mod negotiation_repo;

pub use negotiation_repo::InMemoryNegotiationRepo;
