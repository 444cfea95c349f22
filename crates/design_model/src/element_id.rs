//! Element identity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a placed design element.
/// Uses UUID v4 so IDs stay stable across snapshots and cart copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new random ElementId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an ElementId from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parse an ElementId from its string representation
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ElementId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_string_roundtrip() {
        let id = ElementId::new();
        let parsed = ElementId::from_string(&id.to_string());
        assert_eq!(parsed, Some(id));
        assert_eq!(ElementId::from_string("not-a-uuid"), None);
    }

    #[test]
    fn test_element_ids_are_unique() {
        assert_ne!(ElementId::new(), ElementId::new());
    }
}
