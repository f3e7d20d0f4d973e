//! NegotiationSession aggregate - an NPC's shifting disposition during a negotiation
//!
//! # Lifecycle
//!
//! ```text
//! Preparing --start--> Active --complete--> Completed
//!                        ^  \--(patience hits 0)--^ |
//!                        \--------reopen------------/
//! ```
//!
//! Setup fields can only be edited while preparing. Arguments can only be
//! recorded while active. Reveals are allowed in any status.
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: interest and patience can only move through `record_argument`
//! - **Validate first**: every mutation checks its preconditions before touching
//!   state, so a failed call leaves the session unchanged
//! - **Mutation outcomes**: every mutation returns a `NegotiationUpdate`

use chrono::{DateTime, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ids::{ArgumentId, CharacterId, NegotiationId};

use crate::entities::{
    ArgumentInput, ArgumentRecord, ArgumentTier, ArgumentType, Motivation, NegotiationStatus,
    Pitfall,
};
use crate::error::DomainError;
use crate::events::NegotiationUpdate;
use crate::value_objects::{
    classify, Interest, NegotiationName, NegotiationOutcome, NegotiationRules, NpcName,
    PatienceMeter,
};

/// Input for creating a new negotiation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNegotiation {
    pub name: String,
    pub npc_name: String,
    #[serde(default)]
    pub npc_entity_id: Option<CharacterId>,
    #[serde(default)]
    pub description: Option<String>,
    pub interest: u8,
    pub patience: u8,
    #[serde(default)]
    pub impression: i32,
    #[serde(default)]
    pub motivations: Vec<Motivation>,
    #[serde(default)]
    pub pitfalls: Vec<Pitfall>,
}

/// Partial update of setup fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NegotiationSetup {
    pub name: Option<String>,
    pub npc_name: Option<String>,
    /// `Some(None)` clears the back-reference.
    pub npc_entity_id: Option<Option<CharacterId>>,
    pub description: Option<String>,
    pub interest: Option<u8>,
    pub patience: Option<u8>,
    pub impression: Option<i32>,
    pub motivations: Option<Vec<Motivation>>,
    pub pitfalls: Option<Vec<Pitfall>>,
}

/// A negotiation between the party and a single NPC
///
/// # Invariants
///
/// - `interest` is always within `0..=5` and patience within `0..=max`
/// - `outcome` is `Some` exactly when `status` is `Completed`
/// - `arguments` is append-only
/// - motivation types and pitfall descriptions are unique (case-insensitive)
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use parley_domain::{
///     ArgumentId, ArgumentInput, CreateNegotiation, NegotiationRules, NegotiationSession,
///     NegotiationStatus,
/// };
///
/// let now = Utc::now();
/// let mut session = NegotiationSession::create(
///     CreateNegotiation {
///         name: "Toll at the bridge".into(),
///         npc_name: "Old Marda".into(),
///         npc_entity_id: None,
///         description: None,
///         interest: 2,
///         patience: 1,
///         impression: 0,
///         motivations: vec![],
///         pitfalls: vec![],
///     },
///     now,
/// )
/// .unwrap();
///
/// session.start(now).unwrap();
/// session
///     .record_argument(
///         ArgumentInput::no_motivation(2, "We'll pay double next time"),
///         &NegotiationRules::default(),
///         ArgumentId::new(),
///         now,
///     )
///     .unwrap();
///
/// assert_eq!(session.status(), NegotiationStatus::Completed);
/// assert_eq!(session.interest().value(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NegotiationSession {
    // Identity
    id: NegotiationId,
    status: NegotiationStatus,

    // Descriptive
    name: NegotiationName,
    npc_name: NpcName,
    /// Back-reference to an NPC record, never dereferenced here
    npc_entity_id: Option<CharacterId>,
    description: String,

    // Resources
    interest: Interest,
    /// Interest at setup time, the base for the replay projection
    starting_interest: Interest,
    patience: PatienceMeter,
    /// Display only
    impression: i32,

    // Levers
    motivations: Vec<Motivation>,
    pitfalls: Vec<Pitfall>,

    // History
    arguments: Vec<ArgumentRecord>,
    outcome: Option<NegotiationOutcome>,

    // Timestamps
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl NegotiationSession {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a new session in `Preparing` status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a name is empty, the starting
    /// interest or patience is out of range, or the levers contain blank or
    /// duplicate keys.
    pub fn create(input: CreateNegotiation, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let name = NegotiationName::new(input.name)?;
        let npc_name = NpcName::new(input.npc_name)?;
        let interest = Interest::new(input.interest)?;
        let patience = PatienceMeter::new(input.patience)?;
        validate_levers(&input.motivations, &input.pitfalls)?;

        Ok(Self {
            id: NegotiationId::new(),
            status: NegotiationStatus::Preparing,
            name,
            npc_name,
            npc_entity_id: input.npc_entity_id,
            description: input.description.unwrap_or_default(),
            interest,
            starting_interest: interest,
            patience,
            impression: input.impression,
            motivations: input.motivations.into_iter().map(Motivation::unused).collect(),
            pitfalls: input.pitfalls,
            arguments: Vec::new(),
            outcome: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Set the session's ID (used when loading from storage or replaying).
    pub fn with_id(mut self, id: NegotiationId) -> Self {
        self.id = id;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> NegotiationId {
        self.id
    }

    #[inline]
    pub fn status(&self) -> NegotiationStatus {
        self.status
    }

    #[inline]
    pub fn name(&self) -> &NegotiationName {
        &self.name
    }

    #[inline]
    pub fn npc_name(&self) -> &NpcName {
        &self.npc_name
    }

    #[inline]
    pub fn npc_entity_id(&self) -> Option<CharacterId> {
        self.npc_entity_id
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn interest(&self) -> Interest {
        self.interest
    }

    #[inline]
    pub fn starting_interest(&self) -> Interest {
        self.starting_interest
    }

    #[inline]
    pub fn patience(&self) -> PatienceMeter {
        self.patience
    }

    #[inline]
    pub fn impression(&self) -> i32 {
        self.impression
    }

    #[inline]
    pub fn motivations(&self) -> &[Motivation] {
        &self.motivations
    }

    #[inline]
    pub fn pitfalls(&self) -> &[Pitfall] {
        &self.pitfalls
    }

    /// Argument history in chronological order.
    #[inline]
    pub fn arguments(&self) -> &[ArgumentRecord] {
        &self.arguments
    }

    /// Argument history newest first, the order it is usually displayed in.
    pub fn arguments_newest_first(&self) -> impl Iterator<Item = &ArgumentRecord> {
        self.arguments.iter().rev()
    }

    #[inline]
    pub fn outcome(&self) -> Option<NegotiationOutcome> {
        self.outcome
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn find_motivation(&self, motivation_type: &str) -> Option<&Motivation> {
        self.motivations.iter().find(|m| m.matches(motivation_type))
    }

    pub fn find_pitfall(&self, description: &str) -> Option<&Pitfall> {
        self.pitfalls.iter().find(|p| p.matches(description))
    }

    /// Whether the host should offer argument controls.
    pub fn can_record_arguments(&self) -> bool {
        self.status == NegotiationStatus::Active
    }

    /// Recompute interest and patience by folding the recorded deltas over
    /// the starting values.
    ///
    /// Deltas are captured post-clamp, so this always equals the stored
    /// `interest()` / `patience()`.
    pub fn replayed_resources(&self) -> (Interest, PatienceMeter) {
        self.arguments.iter().fold(
            (self.starting_interest, self.patience.refilled()),
            |(interest, patience), argument| {
                (
                    interest.apply(argument.interest_change()).0,
                    patience.apply(argument.patience_change()).0,
                )
            },
        )
    }

    // =========================================================================
    // State Machine
    // =========================================================================

    /// Move from `Preparing` to `Active`.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<NegotiationUpdate, DomainError> {
        self.ensure_status(NegotiationStatus::Preparing, "start")?;
        self.status = NegotiationStatus::Active;
        self.updated_at = now;
        Ok(NegotiationUpdate::Started)
    }

    /// End an active negotiation and classify its outcome from current interest.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<NegotiationUpdate, DomainError> {
        self.ensure_status(NegotiationStatus::Active, "complete")?;
        let outcome = self.finish();
        self.updated_at = now;
        Ok(NegotiationUpdate::Completed {
            outcome,
            interest: self.interest,
        })
    }

    /// Move a completed negotiation back to `Active`, discarding its outcome.
    ///
    /// Interest, patience, history and reveal state are left exactly as they were.
    pub fn reopen(&mut self, now: DateTime<Utc>) -> Result<NegotiationUpdate, DomainError> {
        self.ensure_status(NegotiationStatus::Completed, "reopen")?;
        let previous_outcome = self.outcome.take();
        self.status = NegotiationStatus::Active;
        self.updated_at = now;
        Ok(NegotiationUpdate::Reopened { previous_outcome })
    }

    fn finish(&mut self) -> NegotiationOutcome {
        let outcome = classify(self.interest);
        self.outcome = Some(outcome);
        self.status = NegotiationStatus::Completed;
        outcome
    }

    fn ensure_status(&self, expected: NegotiationStatus, action: &str) -> Result<(), DomainError> {
        if self.status != expected {
            return Err(DomainError::invalid_state_transition(format!(
                "Cannot {} a negotiation that is {} (expected {})",
                action, self.status, expected
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Argument Resolution
    // =========================================================================

    /// Resolve an argument against the rules table and append it to history.
    ///
    /// If the argument exhausts patience the session is completed as part of
    /// this call; the returned update carries the outcome in `auto_completed`.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidStateTransition` unless the session is active
    /// - `DomainError::Validation` for a tier outside 1..=3, or a motivation
    ///   argument without a registered motivation type
    pub fn record_argument(
        &mut self,
        mut input: ArgumentInput,
        rules: &NegotiationRules,
        argument_id: ArgumentId,
        now: DateTime<Utc>,
    ) -> Result<NegotiationUpdate, DomainError> {
        self.ensure_status(NegotiationStatus::Active, "record an argument in")?;
        let tier = ArgumentTier::try_from(input.tier)?;

        let motivation_index = match input.argument_type {
            ArgumentType::Motivation => {
                let key = input
                    .motivation_type
                    .as_deref()
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .ok_or_else(|| {
                        DomainError::validation("Motivation arguments require a motivation type")
                    })?;
                let index = self
                    .motivations
                    .iter()
                    .position(|m| m.matches(key))
                    .ok_or_else(|| {
                        DomainError::validation(format!("Unknown motivation type: {}", key))
                    })?;
                input.motivation_type = Some(self.motivations[index].motivation_type().to_string());
                Some(index)
            }
            ArgumentType::NoMotivation | ArgumentType::Pitfall => {
                input.motivation_type = None;
                None
            }
        };

        // Validation done; mutate.
        let delta = rules.deltas_for(input.argument_type, tier);
        let (interest, interest_change) = self.interest.apply(delta.interest);
        let (patience, patience_change) = self.patience.apply(delta.patience);
        self.interest = interest;
        self.patience = patience;

        if let Some(motivation) = motivation_index.and_then(|i| self.motivations.get_mut(i)) {
            motivation.record_use();
        }

        let argument = ArgumentRecord::new(
            argument_id,
            input,
            tier,
            interest_change,
            patience_change,
            now,
        );
        self.arguments.push(argument.clone());
        self.updated_at = now;

        let auto_completed = if self.patience.is_exhausted() {
            Some(self.finish())
        } else {
            None
        };

        Ok(NegotiationUpdate::ArgumentRecorded {
            argument,
            interest: self.interest,
            patience: self.patience,
            auto_completed,
        })
    }

    // =========================================================================
    // Reveal Tracker
    // =========================================================================

    /// Mark a motivation as known to the players. Allowed in any status.
    pub fn reveal_motivation(
        &mut self,
        motivation_type: &str,
        now: DateTime<Utc>,
    ) -> Result<NegotiationUpdate, DomainError> {
        let motivation = self
            .motivations
            .iter_mut()
            .find(|m| m.matches(motivation_type))
            .ok_or_else(|| DomainError::not_found("Motivation", motivation_type))?;

        let newly_revealed = motivation.reveal();
        let motivation_type = motivation.motivation_type().to_string();
        if newly_revealed {
            self.updated_at = now;
        }
        Ok(NegotiationUpdate::MotivationRevealed {
            motivation_type,
            newly_revealed,
        })
    }

    /// Mark a pitfall as known to the players. Allowed in any status.
    pub fn reveal_pitfall(
        &mut self,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<NegotiationUpdate, DomainError> {
        let pitfall = self
            .pitfalls
            .iter_mut()
            .find(|p| p.matches(description))
            .ok_or_else(|| DomainError::not_found("Pitfall", description))?;

        let newly_revealed = pitfall.reveal();
        let description = pitfall.description().to_string();
        if newly_revealed {
            self.updated_at = now;
        }
        Ok(NegotiationUpdate::PitfallRevealed {
            description,
            newly_revealed,
        })
    }

    // =========================================================================
    // Setup Editing
    // =========================================================================

    /// Edit setup fields. Only allowed while preparing.
    ///
    /// Changing starting interest or patience resets the current values to
    /// match, since no argument has been recorded yet.
    pub fn update_setup(
        &mut self,
        setup: NegotiationSetup,
        now: DateTime<Utc>,
    ) -> Result<NegotiationUpdate, DomainError> {
        self.ensure_status(NegotiationStatus::Preparing, "edit the setup of")?;

        let name = setup.name.map(NegotiationName::new).transpose()?;
        let npc_name = setup.npc_name.map(NpcName::new).transpose()?;
        let interest = setup.interest.map(Interest::new).transpose()?;
        let patience = setup.patience.map(PatienceMeter::new).transpose()?;
        validate_levers(
            setup
                .motivations
                .as_deref()
                .unwrap_or(self.motivations.as_slice()),
            setup
                .pitfalls
                .as_deref()
                .unwrap_or(self.pitfalls.as_slice()),
        )?;

        let mut fields = Vec::new();
        if let Some(name) = name {
            self.name = name;
            fields.push("name");
        }
        if let Some(npc_name) = npc_name {
            self.npc_name = npc_name;
            fields.push("npcName");
        }
        if let Some(npc_entity_id) = setup.npc_entity_id {
            self.npc_entity_id = npc_entity_id;
            fields.push("npcEntityId");
        }
        if let Some(description) = setup.description {
            self.description = description;
            fields.push("description");
        }
        if let Some(interest) = interest {
            self.interest = interest;
            self.starting_interest = interest;
            fields.push("interest");
        }
        if let Some(patience) = patience {
            self.patience = patience;
            fields.push("patience");
        }
        if let Some(impression) = setup.impression {
            self.impression = impression;
            fields.push("impression");
        }
        if let Some(motivations) = setup.motivations {
            self.motivations = motivations.into_iter().map(Motivation::unused).collect();
            fields.push("motivations");
        }
        if let Some(pitfalls) = setup.pitfalls {
            self.pitfalls = pitfalls;
            fields.push("pitfalls");
        }

        if !fields.is_empty() {
            self.updated_at = now;
        }
        Ok(NegotiationUpdate::SetupUpdated { fields })
    }
}

/// Recorded history must reproduce the stored resources and use counts.
fn validate_history(session: &NegotiationSession) -> Result<(), DomainError> {
    let (interest, patience) = session.replayed_resources();
    if (interest, patience) != (session.interest, session.patience) {
        return Err(DomainError::validation(format!(
            "Argument history replays to interest {} and patience {}, but {} and {} are stored",
            interest, patience, session.interest, session.patience
        )));
    }

    if let Some(outcome) = session.outcome {
        if outcome != classify(session.interest) {
            return Err(DomainError::validation(format!(
                "Outcome {} does not match final interest {}",
                outcome, session.interest
            )));
        }
    }

    for argument in &session.arguments {
        if let Some(key) = argument.motivation_type() {
            if session.find_motivation(key).is_none() {
                return Err(DomainError::validation(format!(
                    "Argument {} references unknown motivation type: {}",
                    argument.id(),
                    key
                )));
            }
        }
    }

    for motivation in &session.motivations {
        let uses = session
            .arguments
            .iter()
            .filter(|a| a.argument_type() == ArgumentType::Motivation)
            .filter(|a| a.motivation_type().is_some_and(|key| motivation.matches(key)))
            .count();
        if usize::try_from(motivation.times_used()).ok() != Some(uses) {
            return Err(DomainError::validation(format!(
                "Motivation {} has times_used {} but {} recorded arguments",
                motivation.motivation_type(),
                motivation.times_used(),
                uses
            )));
        }
    }
    Ok(())
}

/// Motivation types and pitfall descriptions are lookup keys: non-empty and unique.
fn validate_levers(motivations: &[Motivation], pitfalls: &[Pitfall]) -> Result<(), DomainError> {
    for (i, motivation) in motivations.iter().enumerate() {
        if motivation.motivation_type().trim().is_empty() {
            return Err(DomainError::validation("Motivation type cannot be empty"));
        }
        if motivations[..i]
            .iter()
            .any(|other| other.matches(motivation.motivation_type()))
        {
            return Err(DomainError::validation(format!(
                "Duplicate motivation type: {}",
                motivation.motivation_type()
            )));
        }
    }
    for (i, pitfall) in pitfalls.iter().enumerate() {
        if pitfall.description().trim().is_empty() {
            return Err(DomainError::validation("Pitfall description cannot be empty"));
        }
        if pitfalls[..i]
            .iter()
            .any(|other| other.matches(pitfall.description()))
        {
            return Err(DomainError::validation(format!(
                "Duplicate pitfall: {}",
                pitfall.description()
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Intermediate format for serialization that matches the wire format.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NegotiationSessionWireFormat {
    id: NegotiationId,
    status: NegotiationStatus,
    name: String,
    npc_name: String,
    #[serde(default)]
    npc_entity_id: Option<CharacterId>,
    #[serde(default)]
    description: String,
    interest: u8,
    starting_interest: u8,
    patience: u8,
    max_patience: u8,
    #[serde(default)]
    impression: i32,
    #[serde(default)]
    motivations: Vec<Motivation>,
    #[serde(default)]
    pitfalls: Vec<Pitfall>,
    #[serde(default)]
    arguments: Vec<ArgumentRecord>,
    #[serde(default)]
    outcome: Option<NegotiationOutcome>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Serialize for NegotiationSession {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = NegotiationSessionWireFormat {
            id: self.id,
            status: self.status,
            name: self.name.to_string(),
            npc_name: self.npc_name.to_string(),
            npc_entity_id: self.npc_entity_id,
            description: self.description.clone(),
            interest: self.interest.value(),
            starting_interest: self.starting_interest.value(),
            patience: self.patience.current(),
            max_patience: self.patience.max(),
            impression: self.impression,
            motivations: self.motivations.clone(),
            pitfalls: self.pitfalls.clone(),
            arguments: self.arguments.clone(),
            outcome: self.outcome,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NegotiationSession {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = NegotiationSessionWireFormat::deserialize(deserializer)?;

        let name = NegotiationName::new(wire.name).map_err(DeError::custom)?;
        let npc_name = NpcName::new(wire.npc_name).map_err(DeError::custom)?;
        let interest = Interest::new(wire.interest).map_err(DeError::custom)?;
        let starting_interest = Interest::new(wire.starting_interest).map_err(DeError::custom)?;
        let patience =
            PatienceMeter::restore(wire.patience, wire.max_patience).map_err(DeError::custom)?;
        validate_levers(&wire.motivations, &wire.pitfalls).map_err(DeError::custom)?;

        let completed = wire.status == NegotiationStatus::Completed;
        if completed != wire.outcome.is_some() {
            return Err(DeError::custom(format!(
                "Negotiation in status {} cannot have outcome {:?}",
                wire.status, wire.outcome
            )));
        }

        let session = NegotiationSession {
            id: wire.id,
            status: wire.status,
            name,
            npc_name,
            npc_entity_id: wire.npc_entity_id,
            description: wire.description,
            interest,
            starting_interest,
            patience,
            impression: wire.impression,
            motivations: wire.motivations,
            pitfalls: wire.pitfalls,
            arguments: wire.arguments,
            outcome: wire.outcome,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        };
        validate_history(&session).map_err(DeError::custom)?;
        Ok(session)
    }
}

// ============================================================================
// Tests
// ============================================================================
