//! Logical-to-native event name mapping.
//!
//! Backends name their window events differently, and some reuse one
//! native event for several logical ones (a single "bounds changed"
//! event for both move and resize, disambiguated by a payload field).
//! The mapping is therefore a name *plus* a payload predicate, not a
//! bare string table: the disambiguation is part of the contract.

use serde_json::Value;

/// The events the managers reason about, independent of backend
/// naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalEvent {
    Move,
    Resize,
    Moved,
    Minimize,
    Restore,
    Created,
    Closed,
}

/// One backend's translation of a logical event: the native event
/// name to subscribe to, and a predicate deciding whether a given
/// payload of that native event actually is this logical event.
#[derive(Clone, Copy)]
pub struct NativeEventSpec {
    pub name: &'static str,
    pub filter: fn(&Value) -> bool,
}

impl NativeEventSpec {
    /// A one-to-one mapping: every payload matches.
    pub fn plain(name: &'static str) -> Self {
        Self {
            name,
            filter: |_| true,
        }
    }

    /// A shared native event, narrowed by a payload predicate.
    pub fn filtered(name: &'static str, filter: fn(&Value) -> bool) -> Self {
        Self { name, filter }
    }

    pub fn accepts(&self, payload: &Value) -> bool {
        (self.filter)(payload)
    }
}

impl std::fmt::Debug for NativeEventSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeEventSpec")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A backend's full event mapping.
pub type EventMapper = fn(LogicalEvent) -> Option<NativeEventSpec>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // A backend that fires one "bounds-changed" event for both move
    // and resize, tagged by a changeType field.
    fn combined_mapper(event: LogicalEvent) -> Option<NativeEventSpec> {
        match event {
            LogicalEvent::Move => Some(NativeEventSpec::filtered("bounds-changed", |p| {
                p.get("changeType").and_then(Value::as_u64) == Some(0)
            })),
            LogicalEvent::Resize => Some(NativeEventSpec::filtered("bounds-changed", |p| {
                p.get("changeType").and_then(Value::as_u64) == Some(1)
            })),
            LogicalEvent::Moved => Some(NativeEventSpec::plain("bounds-changed-end")),
            LogicalEvent::Minimize => Some(NativeEventSpec::plain("minimized")),
            LogicalEvent::Restore => Some(NativeEventSpec::plain("restored")),
            LogicalEvent::Created => Some(NativeEventSpec::plain("window-created")),
            LogicalEvent::Closed => None,
        }
    }

    #[test]
    fn shared_native_event_is_disambiguated_by_payload() {
        let move_spec = combined_mapper(LogicalEvent::Move).unwrap();
        let resize_spec = combined_mapper(LogicalEvent::Resize).unwrap();
        assert_eq!(move_spec.name, resize_spec.name);

        let move_payload = json!({"changeType": 0});
        let resize_payload = json!({"changeType": 1});
        assert!(move_spec.accepts(&move_payload));
        assert!(!move_spec.accepts(&resize_payload));
        assert!(resize_spec.accepts(&resize_payload));
        assert!(!resize_spec.accepts(&move_payload));
    }

    #[test]
    fn plain_spec_accepts_anything() {
        let spec = NativeEventSpec::plain("minimized");
        assert!(spec.accepts(&json!({})));
        assert!(spec.accepts(&json!({"whatever": true})));
    }

    #[test]
    fn unmapped_event_is_none() {
        assert!(combined_mapper(LogicalEvent::Closed).is_none());
    }
}
