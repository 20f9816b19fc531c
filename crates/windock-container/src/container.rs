use async_trait::async_trait;
use windock_common::{EventBus, Result, WindowId};

use crate::window::WindowHandle;

/// One desktop-shell integration: window enumeration, main-window
/// identification, and the event bus its backend publishes on.
#[async_trait]
pub trait Container: Send + Sync {
    /// The process-scoped bus this container publishes
    /// [`windock_common::ContainerEvent`]s on.
    fn events(&self) -> &EventBus;

    /// All currently open windows.
    async fn get_all_windows(&self) -> Result<Vec<WindowHandle>>;

    /// Look up one window by id. `None` when no such window is open.
    async fn get_window_by_id(&self, id: &WindowId) -> Result<Option<WindowHandle>>;

    /// The container's main window, when it has one.
    async fn get_main_window(&self) -> Option<WindowHandle>;
}
