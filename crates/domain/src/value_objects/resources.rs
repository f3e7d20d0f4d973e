//! Bounded negotiation resources: interest and patience.
//!
//! Both meters clamp instead of rejecting: a delta that would push a value
//! out of range is trimmed to the boundary, and `apply` reports the delta
//! that was actually applied so argument history reflects reality.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Upper bound for a session's starting patience.
pub const MAX_PATIENCE: u8 = 10;

// ============================================================================
// Interest
// ============================================================================

/// The NPC's disposition toward the negotiating party, always within `0..=5`.
///
/// # Examples
///
/// ```
/// use parley_domain::Interest;
///
/// let interest = Interest::new(4).unwrap();
/// let (next, applied) = interest.apply(2);
/// assert_eq!(next.value(), 5);
/// assert_eq!(applied, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Interest(u8);

impl Interest {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 5;

    /// Create a validated interest value.
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value > Self::MAX {
            return Err(DomainError::validation(format!(
                "Interest must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )));
        }
        Ok(Self(value))
    }

    /// Create an interest value, clamping to the valid range.
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(i32::from(Self::MIN), i32::from(Self::MAX)) as u8)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Apply a delta, returning the new value and the delta actually applied.
    pub fn apply(self, delta: i32) -> (Self, i32) {
        let next = Self::clamped(i32::from(self.0).saturating_add(delta));
        (next, i32::from(next.0) - i32::from(self.0))
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

impl TryFrom<u8> for Interest {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Interest> for u8 {
    fn from(interest: Interest) -> u8 {
        interest.0
    }
}

// ============================================================================
// PatienceMeter
// ============================================================================

/// Remaining tolerance for continued negotiation, within `0..=max`.
///
/// `max` is the session's configured starting patience. Reaching zero forces
/// the negotiation to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PatienceMeterRaw")]
pub struct PatienceMeter {
    current: u8,
    max: u8,
}

#[derive(Deserialize)]
struct PatienceMeterRaw {
    current: u8,
    max: u8,
}

impl PatienceMeter {
    /// Create a full meter with the given starting patience.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `max` is zero or above [`MAX_PATIENCE`].
    pub fn new(max: u8) -> Result<Self, DomainError> {
        Self::restore(max, max)
    }

    /// Rebuild a meter from stored values (used when loading from storage).
    pub fn restore(current: u8, max: u8) -> Result<Self, DomainError> {
        if max == 0 || max > MAX_PATIENCE {
            return Err(DomainError::validation(format!(
                "Starting patience must be between 1 and {}, got {}",
                MAX_PATIENCE, max
            )));
        }
        if current > max {
            return Err(DomainError::validation(format!(
                "Patience {} exceeds its maximum of {}",
                current, max
            )));
        }
        Ok(Self { current, max })
    }

    #[inline]
    pub const fn current(self) -> u8 {
        self.current
    }

    #[inline]
    pub const fn max(self) -> u8 {
        self.max
    }

    #[inline]
    pub const fn is_exhausted(self) -> bool {
        self.current == 0
    }

    /// The same meter at its starting value.
    pub const fn refilled(self) -> Self {
        Self {
            current: self.max,
            max: self.max,
        }
    }

    /// Apply a delta, returning the new meter and the delta actually applied.
    pub fn apply(self, delta: i32) -> (Self, i32) {
        let current = i32::from(self.current)
            .saturating_add(delta)
            .clamp(0, i32::from(self.max)) as u8;
        let applied = i32::from(current) - i32::from(self.current);
        (Self { current, ..self }, applied)
    }
}

impl fmt::Display for PatienceMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

impl TryFrom<PatienceMeterRaw> for PatienceMeter {
    type Error = DomainError;

    fn try_from(raw: PatienceMeterRaw) -> Result<Self, Self::Error> {
        Self::restore(raw.current, raw.max)
    }
}
