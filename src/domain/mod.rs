//! Domain types for the IPO catalogue with strong typing.
//!
//! This module provides type-safe wrappers and domain primitives shared by
//! the store, services, and API layers.

pub mod events;

pub use events::{Broadcaster, NotificationEvent};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an IPO record.
///
/// Identifiers are server-assigned UUID strings; the newtype prevents mixing
/// IPO ids with user or application ids in service signatures.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct IpoId(String);

impl IpoId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for IpoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for IpoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for IpoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for IpoId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for IpoId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = String::deserialize(deserializer)?;
        Ok(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipo_id_conversions() {
        let id = IpoId::new("abc-123");
        assert_eq!(id.as_str(), "abc-123");
        assert_eq!(id.to_string(), "abc-123");
        assert_eq!(IpoId::from("abc-123"), id);
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(IpoId::generate(), IpoId::generate());
    }

    #[test]
    fn ipo_id_serialization() {
        let id = IpoId::new("abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc\"");
        let back: IpoId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
