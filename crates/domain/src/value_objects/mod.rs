//! Value objects - Immutable objects defined by their attributes

mod names;
mod outcome;
mod resources;
mod rules;

pub use names::{NegotiationName, NpcName};
pub use outcome::{classify, NegotiationOutcome};
pub use resources::{Interest, PatienceMeter, MAX_PATIENCE};
pub use rules::{NegotiationRules, ResourceDelta, TierDeltas};
