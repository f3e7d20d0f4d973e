//! Domain entities - Core business objects owned by the negotiation aggregate

mod argument;
mod lever;
mod status;

pub use argument::{ArgumentInput, ArgumentRecord, ArgumentTier, ArgumentType};
pub use lever::{Motivation, Pitfall};
pub use status::NegotiationStatus;
