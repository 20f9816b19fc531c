use std::sync::Arc;

use async_trait::async_trait;
use windock_common::{Rect, Result, WindowId};

use crate::capabilities::WindowCapabilities;
use crate::options::WindowOptions;

/// Shared handle to a window. Windows are referenced from managers,
/// groups, and event handlers simultaneously, so they live behind
/// `Arc`.
pub type WindowHandle = Arc<dyn ContainerWindow>;

/// Portable handle over exactly one native window.
///
/// Every operation is async: the native call may cross a process
/// boundary, so callers must tolerate other events arriving while a
/// call is outstanding. The handle does not own the native window —
/// the windowing system does — which is why any query can fail with
/// [`windock_common::WindowError::Closed`] at any time.
#[async_trait]
pub trait ContainerWindow: Send + Sync {
    /// Backend-assigned id, unique among currently open windows.
    fn id(&self) -> &WindowId;

    /// Window name; equals the id on backends that don't distinguish.
    fn name(&self) -> &str;

    /// Static capability declaration for this window's backend.
    fn capabilities(&self) -> WindowCapabilities;

    /// Whether group operations are available at all.
    fn allow_grouping(&self) -> bool {
        self.capabilities().native_grouping
    }

    /// Current bounds; reflects the live position during a drag.
    async fn get_bounds(&self) -> Result<Rect>;

    /// Reposition/resize. Resolves when the request has been issued
    /// to the backend, not necessarily rendered.
    async fn set_bounds(&self, bounds: Rect) -> Result<()>;

    /// Creation-time options, as the backend recorded them.
    async fn get_options(&self) -> Result<WindowOptions>;

    /// All windows in this window's group, including this window, by
    /// backend convention. Empty when ungrouped. Backends maintain
    /// the group as a symmetric relation; callers must tolerate
    /// transient asymmetry while a join is in flight.
    async fn get_group(&self) -> Result<Vec<WindowHandle>>;

    /// Join `target`'s group. No-op when `target` is this window;
    /// rejects with `NotSupported` when grouping is unavailable.
    async fn join_group(&self, target: &dyn ContainerWindow) -> Result<()>;

    /// Leave the current group. No-op when ungrouped. A group left
    /// with a single member dissolves.
    async fn leave_group(&self) -> Result<()>;

    async fn minimize(&self) -> Result<()>;

    async fn restore(&self) -> Result<()>;

    async fn show(&self) -> Result<()>;

    async fn hide(&self) -> Result<()>;

    async fn focus(&self) -> Result<()>;

    async fn close(&self) -> Result<()>;

    /// Enable or disable native frame dragging. Managers call this
    /// with `false` on `frameless_drag` backends to take over drag
    /// positioning. Only meaningful when the capability is declared.
    async fn set_frame_drag_enabled(&self, enabled: bool) -> Result<()> {
        let _ = enabled;
        Err(windock_common::WindowError::NotSupported.into())
    }

    /// Toggle the snap-target highlight. Backends without the
    /// `snap_hint` capability ignore this; absence of the hook is a
    /// capability gap, not an error.
    async fn set_snap_hint(&self, on: bool) -> Result<()> {
        let _ = on;
        Ok(())
    }
}
