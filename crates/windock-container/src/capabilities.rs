use serde::{Deserialize, Serialize};

/// What a backend's windows can do, declared once at window-wrap time.
/// Managers consult this instead of probing for optional hooks per
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCapabilities {
    /// The backend has native window grouping. When false, group
    /// operations are permanently rejected for this window.
    pub native_grouping: bool,
    /// Native frame dragging can be disabled so a manager drives the
    /// window position itself during drags.
    pub frameless_drag: bool,
    /// The backend can visually highlight a window as a snap target.
    pub snap_hint: bool,
    /// Move events carry live bounds inline, so handlers do not need
    /// a separate bounds query per frame.
    pub inline_move_bounds: bool,
}

impl Default for WindowCapabilities {
    /// The browser-window default backend: no native grouping, no
    /// frame control, no hint rendering.
    fn default() -> Self {
        Self {
            native_grouping: false,
            frameless_drag: false,
            snap_hint: false,
            inline_move_bounds: false,
        }
    }
}
