//! Participant identities and the session roster.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Result, TypesError};

/// Opaque participant identifier. Always trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Build an identifier from raw user input.
    ///
    /// Surrounding whitespace is stripped.
    ///
    /// # Errors
    ///
    /// - [`TypesError::EmptyParticipant`] if nothing is left after trimming
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypesError::EmptyParticipant);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ParticipantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ParticipantId {
    type Error = TypesError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ParticipantId> for String {
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}

/// Ordered, duplicate-free list of the people currently taking part.
///
/// Insertion order is preserved. The roster lives only for the session
/// and is never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParticipantSet {
    members: Vec<ParticipantId>,
}

impl ParticipantSet {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` if it is non-empty after trimming and not already present.
    ///
    /// Returns the added identifier, or `None` when the call was a no-op.
    pub fn add(&mut self, name: &str) -> Option<ParticipantId> {
        let id = ParticipantId::new(name).ok()?;
        if self.contains(&id) {
            return None;
        }
        self.members.push(id.clone());
        Some(id)
    }

    /// Remove `name` (trimmed) from the roster. Returns `false` if it was
    /// not present.
    pub fn remove(&mut self, name: &str) -> bool {
        let name = name.trim();
        let before = self.members.len();
        self.members.retain(|m| m.as_str() != name);
        self.members.len() != before
    }

    /// Whether `id` is in the roster.
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.members.contains(id)
    }

    /// Look up a member by name.
    pub fn get(&self, name: &str) -> Option<&ParticipantId> {
        self.members.iter().find(|m| m.as_str() == name)
    }

    /// Everyone except `payer`, in roster order.
    pub fn receivers_for(&self, payer: &ParticipantId) -> Vec<ParticipantId> {
        self.members
            .iter()
            .filter(|m| *m != payer)
            .cloned()
            .collect()
    }

    /// Iterate members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ParticipantId> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> ParticipantSet {
        let mut set = ParticipantSet::new();
        for name in names {
            set.add(name).expect("add participant");
        }
        set
    }

    #[test]
    fn test_id_is_trimmed() {
        let id = ParticipantId::new("  Mina ").expect("valid id");
        assert_eq!(id.as_str(), "Mina");
    }

    #[test]
    fn test_blank_id_rejected() {
        assert_eq!(ParticipantId::new("   "), Err(TypesError::EmptyParticipant));
        assert_eq!(ParticipantId::new(""), Err(TypesError::EmptyParticipant));
    }

    #[test]
    fn test_add_preserves_order() {
        let set = roster(&["C", "A", "B"]);
        let names: Vec<&str> = set.iter().map(ParticipantId::as_str).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let mut set = roster(&["A"]);
        assert!(set.add("A").is_none());
        assert!(set.add("  A  ").is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_add_blank_is_noop() {
        let mut set = ParticipantSet::new();
        assert!(set.add("  ").is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut set = roster(&["A", "B"]);
        assert!(set.remove("A"));
        assert!(!set.remove("A"));
        assert!(!set.remove("Z"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_matches_trimmed_name() {
        let mut set = ParticipantSet::new();
        assert!(set.add(" A ").is_some());
        assert!(set.remove(" A "));
        assert!(set.is_empty());

        let mut set = roster(&["B"]);
        assert!(set.remove("\tB  "));
        assert!(!set.remove("   "));
    }

    #[test]
    fn test_receivers_exclude_payer() {
        let set = roster(&["A", "B", "C"]);
        let payer = ParticipantId::new("B").expect("id");
        let receivers = set.receivers_for(&payer);
        let names: Vec<&str> = receivers.iter().map(ParticipantId::as_str).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_id_serde_rejects_blank() {
        let ok: ParticipantId = serde_json::from_str("\"Jun\"").expect("parse");
        assert_eq!(ok.as_str(), "Jun");
        assert!(serde_json::from_str::<ParticipantId>("\"  \"").is_err());
    }
}
