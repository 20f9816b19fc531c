use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a window, unique within the set of currently open
/// windows of one container. Assigned by the backend; opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for WindowId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_as_str() {
        let id = WindowId::from("win-1");
        assert_eq!(id.to_string(), id.as_str());
    }

    #[test]
    fn equality_and_clone() {
        let id = WindowId::from("main");
        let cloned = id.clone();
        assert_eq!(id, cloned);
        assert_ne!(id, WindowId::from("other"));
    }

    #[test]
    fn hash_dedupes() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(WindowId::from("a"));
        set.insert(WindowId::from("b"));
        set.insert(WindowId::from("a"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn serialization_roundtrip() {
        let id = WindowId::from("win-42");
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: WindowId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
