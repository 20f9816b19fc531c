use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::WindowId;
use crate::types::Rect;

/// Window lifecycle and gesture events published by a container
/// backend. Every event names the window it concerns; handlers that
/// manage many windows dispatch on the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ContainerEvent {
    WindowCreated(WindowId),
    WindowClosed(WindowId),
    /// Fired repeatedly while the user drags a window. Backends that
    /// report live bounds inline carry them in the payload; others
    /// leave `bounds` empty and the handler queries the window.
    WindowMoving {
        id: WindowId,
        bounds: Option<Rect>,
    },
    /// Fired once when the drag gesture ends.
    WindowMoved(WindowId),
    WindowMinimized(WindowId),
    WindowRestored(WindowId),
    #[serde(other)]
    Unknown,
}

/// Process-scoped event bus connecting container backends to window
/// managers. Passed by reference to everything that publishes or
/// subscribes, so the cross-window broadcast dependency is explicit.
pub struct EventBus {
    sender: broadcast::Sender<ContainerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ContainerEvent> {
        self.sender.subscribe()
    }

    /// Publish an event, returning the number of subscribers that
    /// received it. Zero subscribers is not an error.
    pub fn publish(&self, event: ContainerEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}
