//! Magnetic edge-snapping and automatic grouping during drags.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use windock_common::{ContainerEvent, Rect, Result, WindowId};
use windock_container::{Container, WindowHandle};

use crate::geometry::SnapGeometry;
use crate::group::GroupWindowManager;
use crate::options::{GroupOptions, SnapOptions};

/// Transient per-drag state. Reset at the end of every completed
/// drag; nothing here survives between gestures.
#[derive(Default)]
struct DragState {
    /// Windows currently highlighted as snap targets, in the order
    /// they were first highlighted. The drag-end fan-out joins the
    /// first entry's group.
    targets: Vec<(WindowId, WindowHandle)>,
    /// The window this manager is itself repositioning right now.
    /// Move events for it are echoes of our own `set_bounds`, not
    /// user drags, and must be ignored.
    snapping_window: Option<WindowId>,
}

/// Extends [`GroupWindowManager`] with snap assist: while an
/// ungrouped window is dragged, its edges are tested against every
/// other window; close-enough edges pull the window into place and
/// highlight the target, and releasing the drag joins the highlighted
/// windows into one group.
pub struct SnapAssistWindowManager {
    group: GroupWindowManager,
    options: SnapOptions,
    geometry: SnapGeometry,
    /// Windows with snap hooks installed. Windows that opt out via
    /// `snap: false` are tracked by the base manager only.
    snap_attached: Mutex<HashMap<WindowId, WindowHandle>>,
    drag: Mutex<DragState>,
}

impl SnapAssistWindowManager {
    pub fn new(container: Arc<dyn Container>, options: SnapOptions) -> Self {
        Self {
            group: GroupWindowManager::new(
                container,
                GroupOptions {
                    tracking: options.tracking,
                },
            ),
            geometry: SnapGeometry::new(options.snap_threshold, options.snap_offset),
            options,
            snap_attached: Mutex::new(HashMap::new()),
            drag: Mutex::new(DragState::default()),
        }
    }

    pub fn container(&self) -> &Arc<dyn Container> {
        self.group.container()
    }

    pub fn options(&self) -> &SnapOptions {
        &self.options
    }

    /// Whether snap hooks are installed for this window.
    pub fn is_attached(&self, id: &WindowId) -> bool {
        self.snap_attached.lock().unwrap().contains_key(id)
    }

    /// Ids of the currently highlighted snap targets, in highlight
    /// order.
    pub fn targets(&self) -> Vec<WindowId> {
        self.drag
            .lock()
            .unwrap()
            .targets
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn target_count(&self) -> usize {
        self.drag.lock().unwrap().targets.len()
    }

    /// The window currently being repositioned by this manager, if
    /// any.
    pub fn snapping_window(&self) -> Option<WindowId> {
        self.drag.lock().unwrap().snapping_window.clone()
    }

    /// Hook every currently open window.
    pub async fn attach_all(&self) {
        let windows = match self.container().get_all_windows().await {
            Ok(windows) => windows,
            Err(e) => {
                warn!(error = %e, "window enumeration failed");
                return;
            }
        };
        for window in &windows {
            self.attach(window).await;
        }
    }

    /// Base attach (state tracking), then snap hooks unless the
    /// window opted out at creation time.
    pub async fn attach(&self, window: &WindowHandle) {
        self.group.attach(window).await;
        let options = match window.get_options().await {
            Ok(options) => options,
            Err(e) => {
                warn!(window = %window.id(), error = %e, "options query failed, skipping snap hooks");
                return;
            }
        };
        if !options.snap {
            return;
        }
        if window.capabilities().frameless_drag {
            // This host drags via the manager, not the native frame.
            if let Err(e) = window.set_frame_drag_enabled(false).await {
                warn!(window = %window.id(), error = %e, "could not take over frame dragging");
            }
        }
        self.snap_attached
            .lock()
            .unwrap()
            .insert(window.id().clone(), Arc::clone(window));
    }

    fn detach(&self, id: &WindowId) {
        self.snap_attached.lock().unwrap().remove(id);
        self.group.detach(id);
        // A closed window cannot stay a snap target; its highlight
        // died with it.
        self.drag
            .lock()
            .unwrap()
            .targets
            .retain(|(target_id, _)| target_id != id);
    }

    /// Dispatch one container event.
    pub async fn handle_event(&self, event: ContainerEvent) {
        match event {
            ContainerEvent::WindowCreated(id) => {
                if let Ok(Some(window)) = self.container().get_window_by_id(&id).await {
                    self.attach(&window).await;
                }
            }
            ContainerEvent::WindowClosed(id) => self.detach(&id),
            ContainerEvent::WindowMoving { id, bounds } => self.on_moving(&id, bounds).await,
            ContainerEvent::WindowMoved(id) => {
                let window = self.snap_attached.lock().unwrap().get(&id).cloned();
                if let Some(window) = window {
                    self.on_moved(&window).await;
                }
            }
            other => self.group.handle_event(other).await,
        }
    }

    /// Attach to all current windows and keep dispatching bus events
    /// until the container goes away.
    pub async fn start(self: Arc<Self>) -> JoinHandle<()> {
        self.attach_all().await;
        self.spawn()
    }

    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        let mgr = self;
        let mut rx = mgr.container().events().subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => mgr.handle_event(event).await,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "event bus lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    /// Per-frame drag handler. `inline_bounds` is the live position
    /// when the backend reports it in the event payload; otherwise
    /// the window is queried.
    pub async fn on_moving(&self, id: &WindowId, inline_bounds: Option<Rect>) {
        // An echo of our own set_bounds, not a user drag.
        if self.drag.lock().unwrap().snapping_window.as_ref() == Some(id) {
            return;
        }
        let window = match self.snap_attached.lock().unwrap().get(id).cloned() {
            Some(window) => window,
            None => return,
        };
        match window.get_options().await {
            Ok(options) if !options.snap => return,
            Err(e) => {
                debug!(window = %id, error = %e, "options query failed mid-drag");
                return;
            }
            Ok(_) => {}
        }
        let group = match window.get_group().await {
            Ok(group) => group,
            Err(e) => {
                debug!(window = %id, error = %e, "group query failed mid-drag");
                return;
            }
        };
        let bounds = match inline_bounds {
            Some(bounds) => bounds,
            None => match window.get_bounds().await {
                Ok(bounds) => bounds,
                Err(e) => {
                    debug!(window = %id, error = %e, "bounds query failed mid-drag");
                    return;
                }
            },
        };
        let managed_drag = window.capabilities().frameless_drag;

        if !group.is_empty() {
            // Grouped windows move as a rigid unit through the
            // backend's own group-follow; no new snapping or
            // grouping. Hosts without native dragging still need the
            // position forced through.
            if managed_drag {
                if let Err(e) = self.move_window(&window, bounds).await {
                    warn!(window = %id, error = %e, "group drag reposition failed");
                }
            }
            return;
        }

        let all = match self.container().get_all_windows().await {
            Ok(all) => all,
            Err(e) => {
                warn!(error = %e, "window enumeration failed mid-drag");
                return;
            }
        };
        // Snap adjustments compose: each matched candidate updates
        // the bounds the next candidate is tested against.
        let mut current = bounds;
        let mut snapped = false;
        for candidate in all.iter().filter(|w| w.id() != id) {
            // Queries are isolated per candidate: a window closing
            // mid-scan degrades to a non-candidate instead of
            // aborting the pass.
            let candidate_options = match candidate.get_options().await {
                Ok(options) => options,
                Err(_) => continue,
            };
            if !candidate_options.snap {
                continue;
            }
            let candidate_bounds = match candidate.get_bounds().await {
                Ok(bounds) => bounds,
                Err(_) => continue,
            };
            if let Some(snapped_bounds) = self.geometry.snap_bounds(&current, &candidate_bounds) {
                self.mark_target(candidate).await;
                if let Err(e) = self.move_window(&window, snapped_bounds).await {
                    warn!(window = %id, error = %e, "snap reposition failed");
                }
                current = snapped_bounds;
                snapped = true;
            } else {
                self.clear_target(candidate.id()).await;
            }
        }
        if !snapped && managed_drag {
            // Native dragging is off on this host; without a snap the
            // window still has to follow the pointer.
            if let Err(e) = self.move_window(&window, bounds).await {
                warn!(window = %id, error = %e, "drag reposition failed");
            }
        }
    }

    /// Drag-end handler. Folds the highlighted targets into one group
    /// with the dragged window, then clears every highlight whether
    /// or not any join happened.
    pub async fn on_moved(&self, window: &WindowHandle) {
        let targets: Vec<(WindowId, WindowHandle)> =
            std::mem::take(&mut self.drag.lock().unwrap().targets);
        if self.options.auto_grouping {
            let mut joined = false;
            for (_, target) in &targets {
                let target_group = target.get_group().await.unwrap_or_default();
                if !joined {
                    match window.join_group(target.as_ref()).await {
                        Ok(()) => joined = true,
                        Err(e) => {
                            warn!(window = %window.id(), target = %target.id(), error = %e, "group join failed")
                        }
                    }
                } else if target_group.is_empty() {
                    // Fan a multi-way snap into one shared group.
                    if let Err(e) = target.join_group(window.as_ref()).await {
                        warn!(window = %target.id(), error = %e, "group join failed");
                    }
                }
            }
        }
        for (_, target) in &targets {
            if target.capabilities().snap_hint {
                let _ = target.set_snap_hint(false).await;
            }
        }
    }

    /// Programmatic reposition with the re-entrancy guard around it.
    /// The guard is cleared once the call settles, success or not.
    pub(crate) async fn move_window(&self, window: &WindowHandle, bounds: Rect) -> Result<()> {
        self.drag.lock().unwrap().snapping_window = Some(window.id().clone());
        let result = window.set_bounds(bounds).await;
        self.drag.lock().unwrap().snapping_window = None;
        result
    }

    async fn mark_target(&self, window: &WindowHandle) {
        let inserted = {
            let mut drag = self.drag.lock().unwrap();
            if drag.targets.iter().any(|(id, _)| id == window.id()) {
                false
            } else {
                drag.targets
                    .push((window.id().clone(), Arc::clone(window)));
                true
            }
        };
        if inserted {
            debug!(target = %window.id(), "snap target highlighted");
            if window.capabilities().snap_hint {
                let _ = window.set_snap_hint(true).await;
            }
        }
    }

    async fn clear_target(&self, id: &WindowId) {
        let removed = {
            let mut drag = self.drag.lock().unwrap();
            match drag.targets.iter().position(|(target_id, _)| target_id == id) {
                Some(index) => Some(drag.targets.remove(index).1),
                None => None,
            }
        };
        if let Some(window) = removed {
            if window.capabilities().snap_hint {
                let _ = window.set_snap_hint(false).await;
            }
        }
    }
}
