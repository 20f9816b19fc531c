//! In-memory container backend.
//!
//! Implements the full window contract without a desktop shell:
//! windows are plain records, grouping is a shared token, and gesture
//! events are published on the container's bus. Used by tests and the
//! demo binary, and doubles as the reference for what a real adapter
//! must provide.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use windock_common::{ContainerEvent, EventBus, Rect, Result, WindowError, WindowId};

use crate::capabilities::WindowCapabilities;
use crate::container::Container;
use crate::event_map::{LogicalEvent, NativeEventSpec};
use crate::options::WindowOptions;
use crate::window::{ContainerWindow, WindowHandle};

struct SimState {
    bus: EventBus,
    /// Open windows in creation order.
    windows: Mutex<Vec<Arc<SimWindow>>>,
    main_id: Mutex<Option<WindowId>>,
    next_window: AtomicU32,
    next_group: AtomicU64,
}

struct Inner {
    bounds: Rect,
    minimized: bool,
    visible: bool,
    closed: bool,
    snap_hint: bool,
    frame_drag_enabled: bool,
    /// Group token shared by all members of this window's group.
    group: Option<u64>,
    /// Test hook: artificial latency for `set_bounds`, to exercise
    /// handlers that interleave with an in-flight move.
    set_bounds_delay: Option<Duration>,
}

/// One simulated window. Obtainable as a [`WindowHandle`] through the
/// container, or directly for state assertions in tests.
pub struct SimWindow {
    id: WindowId,
    name: String,
    capabilities: WindowCapabilities,
    options: WindowOptions,
    state: Weak<SimState>,
    inner: Mutex<Inner>,
}

impl SimWindow {
    fn ensure_open(&self) -> Result<()> {
        if self.inner.lock().unwrap().closed {
            return Err(WindowError::Closed(self.id.clone()).into());
        }
        Ok(())
    }

    fn container_state(&self) -> Result<Arc<SimState>> {
        self.state
            .upgrade()
            .ok_or_else(|| WindowError::Backend("container dropped".into()).into())
    }

    pub fn is_minimized(&self) -> bool {
        self.inner.lock().unwrap().minimized
    }

    pub fn is_visible(&self) -> bool {
        self.inner.lock().unwrap().visible
    }

    pub fn snap_hint_active(&self) -> bool {
        self.inner.lock().unwrap().snap_hint
    }

    pub fn frame_drag_enabled(&self) -> bool {
        self.inner.lock().unwrap().frame_drag_enabled
    }

    pub fn group_token(&self) -> Option<u64> {
        self.inner.lock().unwrap().group
    }

    /// Make subsequent `set_bounds` calls take this long to settle.
    pub fn set_bounds_delay(&self, delay: Duration) {
        self.inner.lock().unwrap().set_bounds_delay = Some(delay);
    }
}

/// Drop the token from a group that has shrunk to one member: a group
/// of size 1 is not a group.
fn dissolve_if_singleton(state: &SimState, token: u64) {
    let windows = state.windows.lock().unwrap();
    let members: Vec<&Arc<SimWindow>> = windows
        .iter()
        .filter(|w| w.inner.lock().unwrap().group == Some(token))
        .collect();
    if let [only] = members.as_slice() {
        only.inner.lock().unwrap().group = None;
    }
}

#[async_trait]
impl ContainerWindow for SimWindow {
    fn id(&self) -> &WindowId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> WindowCapabilities {
        self.capabilities
    }

    async fn get_bounds(&self) -> Result<Rect> {
        self.ensure_open()?;
        Ok(self.inner.lock().unwrap().bounds)
    }

    async fn set_bounds(&self, bounds: Rect) -> Result<()> {
        self.ensure_open()?;
        let (changed, delay) = {
            let inner = self.inner.lock().unwrap();
            (inner.bounds != bounds, inner.set_bounds_delay)
        };
        // Native systems report the move while the request is still in
        // flight; mirror that so the re-entrancy guard has something
        // to guard against. Unchanged bounds fire no event.
        if changed {
            if let Some(state) = self.state.upgrade() {
                state.bus.publish(ContainerEvent::WindowMoving {
                    id: self.id.clone(),
                    bounds: Some(bounds),
                });
            }
        }
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.ensure_open()?;
        if changed {
            self.inner.lock().unwrap().bounds = bounds;
        }
        Ok(())
    }

    async fn get_options(&self) -> Result<WindowOptions> {
        self.ensure_open()?;
        Ok(self.options.clone())
    }

    async fn get_group(&self) -> Result<Vec<WindowHandle>> {
        self.ensure_open()?;
        if !self.allow_grouping() {
            return Ok(Vec::new());
        }
        let token = match self.inner.lock().unwrap().group {
            Some(token) => token,
            None => return Ok(Vec::new()),
        };
        let state = self.container_state()?;
        let windows = state.windows.lock().unwrap();
        Ok(windows
            .iter()
            .filter(|w| w.inner.lock().unwrap().group == Some(token))
            .map(|w| Arc::clone(w) as WindowHandle)
            .collect())
    }

    async fn join_group(&self, target: &dyn ContainerWindow) -> Result<()> {
        if target.id() == self.id() {
            return Ok(());
        }
        self.ensure_open()?;
        if !self.allow_grouping() || !target.allow_grouping() {
            return Err(WindowError::NotSupported.into());
        }
        let state = self.container_state()?;
        let target_win = {
            let windows = state.windows.lock().unwrap();
            windows
                .iter()
                .find(|w| w.id() == target.id())
                .map(Arc::clone)
                .ok_or_else(|| WindowError::Closed(target.id().clone()))?
        };
        let token = {
            let mut target_inner = target_win.inner.lock().unwrap();
            match target_inner.group {
                Some(token) => token,
                None => {
                    let token = state.next_group.fetch_add(1, Ordering::SeqCst);
                    target_inner.group = Some(token);
                    token
                }
            }
        };
        let previous = {
            let mut inner = self.inner.lock().unwrap();
            std::mem::replace(&mut inner.group, Some(token))
        };
        // Leaving the old group may have stranded a single member.
        if let Some(old) = previous {
            if old != token {
                dissolve_if_singleton(&state, old);
            }
        }
        debug!(window = %self.id, target = %target.id(), "joined group");
        Ok(())
    }

    async fn leave_group(&self) -> Result<()> {
        self.ensure_open()?;
        if !self.allow_grouping() {
            return Err(WindowError::NotSupported.into());
        }
        let previous = self.inner.lock().unwrap().group.take();
        if let Some(token) = previous {
            let state = self.container_state()?;
            dissolve_if_singleton(&state, token);
            debug!(window = %self.id, "left group");
        }
        Ok(())
    }

    async fn minimize(&self) -> Result<()> {
        self.ensure_open()?;
        let changed = {
            let mut inner = self.inner.lock().unwrap();
            !std::mem::replace(&mut inner.minimized, true)
        };
        if changed {
            if let Some(state) = self.state.upgrade() {
                state.bus.publish(ContainerEvent::WindowMinimized(self.id.clone()));
            }
        }
        Ok(())
    }

    async fn restore(&self) -> Result<()> {
        self.ensure_open()?;
        let changed = {
            let mut inner = self.inner.lock().unwrap();
            std::mem::replace(&mut inner.minimized, false)
        };
        if changed {
            if let Some(state) = self.state.upgrade() {
                state.bus.publish(ContainerEvent::WindowRestored(self.id.clone()));
            }
        }
        Ok(())
    }

    async fn show(&self) -> Result<()> {
        self.ensure_open()?;
        self.inner.lock().unwrap().visible = true;
        Ok(())
    }

    async fn hide(&self) -> Result<()> {
        self.ensure_open()?;
        self.inner.lock().unwrap().visible = false;
        Ok(())
    }

    async fn focus(&self) -> Result<()> {
        self.ensure_open()?;
        debug!(window = %self.id, "focused");
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let previous_group = {
            let mut inner = self.inner.lock().unwrap();
            if inner.closed {
                return Ok(());
            }
            inner.closed = true;
            inner.group.take()
        };
        if let Some(state) = self.state.upgrade() {
            state
                .windows
                .lock()
                .unwrap()
                .retain(|w| w.id() != &self.id);
            if let Some(token) = previous_group {
                dissolve_if_singleton(&state, token);
            }
            state.bus.publish(ContainerEvent::WindowClosed(self.id.clone()));
        }
        debug!(window = %self.id, "closed");
        Ok(())
    }

    async fn set_frame_drag_enabled(&self, enabled: bool) -> Result<()> {
        self.ensure_open()?;
        if !self.capabilities.frameless_drag {
            return Err(WindowError::NotSupported.into());
        }
        self.inner.lock().unwrap().frame_drag_enabled = enabled;
        Ok(())
    }

    async fn set_snap_hint(&self, on: bool) -> Result<()> {
        self.ensure_open()?;
        if self.capabilities.snap_hint {
            self.inner.lock().unwrap().snap_hint = on;
        }
        Ok(())
    }
}

/// In-memory [`Container`]. The first window created becomes the main
/// window unless [`SimContainer::set_main`] says otherwise.
pub struct SimContainer {
    state: Arc<SimState>,
}

impl SimContainer {
    pub fn new() -> Self {
        Self {
            state: Arc::new(SimState {
                bus: EventBus::new(64),
                windows: Mutex::new(Vec::new()),
                main_id: Mutex::new(None),
                next_window: AtomicU32::new(1),
                next_group: AtomicU64::new(1),
            }),
        }
    }

    /// Capabilities of a fully featured sim window.
    pub fn default_capabilities() -> WindowCapabilities {
        WindowCapabilities {
            native_grouping: true,
            frameless_drag: false,
            snap_hint: true,
            inline_move_bounds: true,
        }
    }

    pub fn create_window(&self, options: WindowOptions) -> Arc<SimWindow> {
        self.create_window_with(options, Self::default_capabilities())
    }

    pub fn create_window_with(
        &self,
        options: WindowOptions,
        capabilities: WindowCapabilities,
    ) -> Arc<SimWindow> {
        let n = self.state.next_window.fetch_add(1, Ordering::SeqCst);
        let id = WindowId::new(format!("win-{n}"));
        let name = options.name.clone().unwrap_or_else(|| id.to_string());
        let bounds = options
            .bounds
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 800.0, 600.0));
        let window = Arc::new(SimWindow {
            id: id.clone(),
            name,
            capabilities,
            options,
            state: Arc::downgrade(&self.state),
            inner: Mutex::new(Inner {
                bounds,
                minimized: false,
                visible: true,
                closed: false,
                snap_hint: false,
                frame_drag_enabled: true,
                group: None,
                set_bounds_delay: None,
            }),
        });
        self.state.windows.lock().unwrap().push(Arc::clone(&window));
        let mut main_id = self.state.main_id.lock().unwrap();
        if main_id.is_none() {
            *main_id = Some(id.clone());
        }
        drop(main_id);
        debug!(window = %id, "window created");
        self.state.bus.publish(ContainerEvent::WindowCreated(id));
        window
    }

    pub fn set_main(&self, id: &WindowId) {
        *self.state.main_id.lock().unwrap() = Some(id.clone());
    }

    /// Direct lookup for tests; the trait lookup is async.
    pub fn window(&self, id: &WindowId) -> Option<Arc<SimWindow>> {
        self.state
            .windows
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id() == id)
            .map(Arc::clone)
    }

    /// Publish an in-progress move, as a user drag would.
    pub fn emit_moving(&self, id: &WindowId, bounds: Option<Rect>) {
        self.state.bus.publish(ContainerEvent::WindowMoving {
            id: id.clone(),
            bounds,
        });
    }

    /// Publish a drag-end signal.
    pub fn emit_moved(&self, id: &WindowId) {
        self.state
            .bus
            .publish(ContainerEvent::WindowMoved(id.clone()));
    }
}

impl Default for SimContainer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Container for SimContainer {
    fn events(&self) -> &EventBus {
        &self.state.bus
    }

    async fn get_all_windows(&self) -> Result<Vec<WindowHandle>> {
        let windows = self.state.windows.lock().unwrap();
        Ok(windows.iter().map(|w| Arc::clone(w) as WindowHandle).collect())
    }

    async fn get_window_by_id(&self, id: &WindowId) -> Result<Option<WindowHandle>> {
        Ok(self.window(id).map(|w| w as WindowHandle))
    }

    async fn get_main_window(&self) -> Option<WindowHandle> {
        let main_id = self.state.main_id.lock().unwrap().clone()?;
        self.window(&main_id).map(|w| w as WindowHandle)
    }
}

/// The sim's nominal native event surface: a combined
/// "bounds-changing" signal for move and resize, tagged by a
/// `changeType` payload field (0 = move, 1 = resize). The typed
/// events on the bus are what this mapping would produce.
pub fn event_mapper(event: LogicalEvent) -> Option<NativeEventSpec> {
    match event {
        LogicalEvent::Move => Some(NativeEventSpec::filtered("bounds-changing", |p| {
            p.get("changeType").and_then(serde_json::Value::as_u64) == Some(0)
        })),
        LogicalEvent::Resize => Some(NativeEventSpec::filtered("bounds-changing", |p| {
            p.get("changeType").and_then(serde_json::Value::as_u64) == Some(1)
        })),
        LogicalEvent::Moved => Some(NativeEventSpec::plain("move-end")),
        LogicalEvent::Minimize => Some(NativeEventSpec::plain("minimized")),
        LogicalEvent::Restore => Some(NativeEventSpec::plain("restored")),
        LogicalEvent::Created => Some(NativeEventSpec::plain("window-created")),
        LogicalEvent::Closed => Some(NativeEventSpec::plain("window-closed")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn group_membership_is_symmetric() {
        let container = SimContainer::new();
        let a = container.create_window(WindowOptions::named("a"));
        let b = container.create_window(WindowOptions::named("b"));

        a.join_group(b.as_ref()).await.unwrap();

        let group_a = a.get_group().await.unwrap();
        let group_b = b.get_group().await.unwrap();
        assert_eq!(group_a.len(), 2);
        assert_eq!(group_b.len(), 2);
        assert!(group_a.iter().any(|w| w.id() == b.id()));
        assert!(group_b.iter().any(|w| w.id() == a.id()));
    }

    #[tokio::test]
    async fn group_of_one_dissolves() {
        let container = SimContainer::new();
        let a = container.create_window(WindowOptions::named("a"));
        let b = container.create_window(WindowOptions::named("b"));

        a.join_group(b.as_ref()).await.unwrap();
        a.leave_group().await.unwrap();

        // b is the lone remaining member; its group is gone too.
        assert!(a.get_group().await.unwrap().is_empty());
        assert!(b.get_group().await.unwrap().is_empty());
        assert_eq!(b.group_token(), None);
    }

    #[tokio::test]
    async fn join_self_is_noop() {
        let container = SimContainer::new();
        let a = container.create_window(WindowOptions::named("a"));
        a.join_group(a.as_ref()).await.unwrap();
        assert!(a.get_group().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn grouping_rejected_without_capability() {
        let container = SimContainer::new();
        let caps = WindowCapabilities::default();
        let a = container.create_window_with(WindowOptions::named("a"), caps);
        let b = container.create_window(WindowOptions::named("b"));

        assert!(!a.allow_grouping());
        let err = a.join_group(b.as_ref()).await.unwrap_err();
        assert!(err.is_not_supported());
        // Group queries on such windows resolve empty, not error.
        assert!(a.get_group().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn joining_new_group_dissolves_stranded_old_group() {
        let container = SimContainer::new();
        let a = container.create_window(WindowOptions::named("a"));
        let b = container.create_window(WindowOptions::named("b"));
        let c = container.create_window(WindowOptions::named("c"));
        let d = container.create_window(WindowOptions::named("d"));

        a.join_group(b.as_ref()).await.unwrap();
        c.join_group(d.as_ref()).await.unwrap();
        // a abandons b for the c/d group.
        a.join_group(c.as_ref()).await.unwrap();

        assert_eq!(a.get_group().await.unwrap().len(), 3);
        assert!(b.get_group().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn closed_window_queries_fail() {
        let container = SimContainer::new();
        let a = container.create_window(WindowOptions::named("a"));
        a.close().await.unwrap();

        assert!(a.get_bounds().await.is_err());
        assert!(a.get_options().await.is_err());
        assert!(a.set_bounds(Rect::new(0.0, 0.0, 1.0, 1.0)).await.is_err());
        assert!(container.window(a.id()).is_none());
    }

    #[tokio::test]
    async fn close_removes_member_and_dissolves_pair() {
        let container = SimContainer::new();
        let a = container.create_window(WindowOptions::named("a"));
        let b = container.create_window(WindowOptions::named("b"));
        a.join_group(b.as_ref()).await.unwrap();

        a.close().await.unwrap();
        assert!(b.get_group().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_bounds_publishes_moving_only_on_change() {
        let container = SimContainer::new();
        let a = container.create_window(
            WindowOptions::named("a").with_bounds(Rect::new(0.0, 0.0, 100.0, 100.0)),
        );
        let mut rx = container.events().subscribe();

        a.set_bounds(Rect::new(50.0, 0.0, 100.0, 100.0)).await.unwrap();
        let event = rx.recv().await.unwrap();
        assert!(matches!(event, ContainerEvent::WindowMoving { ref id, .. } if id == a.id()));

        // Same bounds again: silent.
        a.set_bounds(Rect::new(50.0, 0.0, 100.0, 100.0)).await.unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn minimize_is_idempotent_on_the_bus() {
        let container = SimContainer::new();
        let a = container.create_window(WindowOptions::named("a"));
        let mut rx = container.events().subscribe();

        a.minimize().await.unwrap();
        a.minimize().await.unwrap();

        assert!(matches!(
            rx.recv().await.unwrap(),
            ContainerEvent::WindowMinimized(_)
        ));
        assert!(rx.try_recv().is_err());
        assert!(a.is_minimized());
    }

    #[tokio::test]
    async fn show_hide_and_focus() {
        let container = SimContainer::new();
        let a = container.create_window(WindowOptions::named("a"));

        assert!(a.is_visible());
        a.hide().await.unwrap();
        assert!(!a.is_visible());
        a.show().await.unwrap();
        assert!(a.is_visible());
        a.focus().await.unwrap();
    }

    #[tokio::test]
    async fn first_window_is_main() {
        let container = SimContainer::new();
        let a = container.create_window(WindowOptions::named("a"));
        let b = container.create_window(WindowOptions::named("b"));

        let main = container.get_main_window().await.unwrap();
        assert_eq!(main.id(), a.id());

        container.set_main(b.id());
        let main = container.get_main_window().await.unwrap();
        assert_eq!(main.id(), b.id());
    }

    #[test]
    fn event_mapper_disambiguates_combined_event() {
        let move_spec = event_mapper(LogicalEvent::Move).unwrap();
        let resize_spec = event_mapper(LogicalEvent::Resize).unwrap();
        assert_eq!(move_spec.name, resize_spec.name);
        assert!(move_spec.accepts(&serde_json::json!({"changeType": 0})));
        assert!(!move_spec.accepts(&serde_json::json!({"changeType": 1})));
    }
}
