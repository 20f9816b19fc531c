use serde::{Deserialize, Serialize};
use windock_common::Rect;

/// Creation-time options of a window, as reported by the backend.
/// Managers read `snap`; the rest rides along for window creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    /// Window name; may or may not equal the backend-assigned id.
    pub name: Option<String>,
    /// Opt-out for snap assist. Windows created with `snap: false`
    /// neither snap nor act as snap targets.
    pub snap: bool,
    /// Initial bounds, when the creator specifies them.
    pub bounds: Option<Rect>,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            name: None,
            snap: true,
            bounds: None,
        }
    }
}

impl WindowOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn no_snap(mut self) -> Self {
        self.snap = false;
        self
    }
}
