pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use aggregates::{CreateNegotiation, NegotiationSession, NegotiationSetup};

pub use entities::{
    ArgumentInput, ArgumentRecord, ArgumentTier, ArgumentType, Motivation, NegotiationStatus,
    Pitfall,
};

pub use error::DomainError;
pub use events::{DomainEvent, NegotiationUpdate};

// Re-export ID types
pub use ids::{ArgumentId, CharacterId, NegotiationId};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    classify, Interest, NegotiationName, NegotiationOutcome, NegotiationRules, NpcName,
    PatienceMeter, ResourceDelta, TierDeltas, MAX_PATIENCE,
};
