//! Use cases - user story orchestration.
//!
//! Use cases coordinate the domain aggregate with the ports it needs.
//! They are concrete structs built once by the `App` composition root.

pub mod negotiation;

pub use negotiation::{
    ArgumentResult, CompletionNotifier, NegotiationCrud, NegotiationError, NegotiationLifecycle,
    NegotiationUseCases, RecordArgument, RevealInformation,
};
