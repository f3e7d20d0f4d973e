//! Motivations and pitfalls - the levers an NPC can be moved by.
//!
//! Both start hidden from the players unless explicitly revealed. Reveal
//! state is informational only and never changes how arguments resolve.

use serde::{Deserialize, Serialize};

/// A lever that, when appealed to correctly, produces a better resource delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motivation {
    #[serde(rename = "type")]
    motivation_type: String,
    description: String,
    #[serde(default)]
    is_known: bool,
    #[serde(default)]
    times_used: u32,
}

impl Motivation {
    /// Create a hidden, unused motivation.
    pub fn new(motivation_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            motivation_type: motivation_type.into().trim().to_string(),
            description: description.into(),
            is_known: false,
            times_used: 0,
        }
    }

    /// Mark the motivation as already known to the players.
    pub fn revealed(mut self) -> Self {
        self.is_known = true;
        self
    }

    #[inline]
    pub fn motivation_type(&self) -> &str {
        &self.motivation_type
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        self.is_known
    }

    #[inline]
    pub fn times_used(&self) -> u32 {
        self.times_used
    }

    /// Whether this motivation is the one referred to by `key`.
    pub fn matches(&self, key: &str) -> bool {
        self.motivation_type.eq_ignore_ascii_case(key.trim())
    }

    /// Returns `true` if the motivation was hidden before this call.
    pub(crate) fn reveal(&mut self) -> bool {
        !std::mem::replace(&mut self.is_known, true)
    }

    /// The same motivation with its use count cleared, for fresh setups.
    pub(crate) fn unused(mut self) -> Self {
        self.times_used = 0;
        self
    }

    pub(crate) fn record_use(&mut self) -> u32 {
        self.times_used += 1;
        self.times_used
    }
}

/// A lever that, when triggered, produces a worse resource delta.
///
/// Pitfalls have no separate type and are keyed by their description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pitfall {
    description: String,
    #[serde(default)]
    is_known: bool,
}

impl Pitfall {
    /// Create a hidden pitfall.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into().trim().to_string(),
            is_known: false,
        }
    }

    /// Mark the pitfall as already known to the players.
    pub fn revealed(mut self) -> Self {
        self.is_known = true;
        self
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        self.is_known
    }

    pub fn matches(&self, key: &str) -> bool {
        self.description.eq_ignore_ascii_case(key.trim())
    }

    /// Returns `true` if the pitfall was hidden before this call.
    pub(crate) fn reveal(&mut self) -> bool {
        !std::mem::replace(&mut self.is_known, true)
    }
}
