//! Minimize/restore synchronization across a main window or a group.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use windock_common::{ContainerEvent, WindowId};
use windock_container::{Container, WindowHandle};

use crate::options::{GroupOptions, WindowStateTracking};

#[derive(Clone, Copy)]
enum StateChange {
    Minimize,
    Restore,
}

/// Attaches to every window of a container (current and future) and
/// propagates minimize/restore according to the configured tracking
/// policy. Propagation is best effort: one window's failure never
/// blocks or rolls back the others.
pub struct GroupWindowManager {
    container: Arc<dyn Container>,
    options: GroupOptions,
    attached: Mutex<HashSet<WindowId>>,
}

impl GroupWindowManager {
    pub fn new(container: Arc<dyn Container>, options: GroupOptions) -> Self {
        Self {
            container,
            options,
            attached: Mutex::new(HashSet::new()),
        }
    }

    pub fn container(&self) -> &Arc<dyn Container> {
        &self.container
    }

    pub fn tracking(&self) -> WindowStateTracking {
        self.options.tracking
    }

    pub fn is_attached(&self, id: &WindowId) -> bool {
        self.attached.lock().unwrap().contains(id)
    }

    /// Enumeration-mode attach: hook every currently open window.
    pub async fn attach_all(&self) {
        let windows = match self.container.get_all_windows().await {
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

    /// Per-window attach: subscribe this window's minimize/restore
    /// events to the tracking policy.
    pub async fn attach(&self, window: &WindowHandle) {
        if self.attached.lock().unwrap().insert(window.id().clone()) {
            debug!(window = %window.id(), "attached for state tracking");
        }
    }

    pub(crate) fn detach(&self, id: &WindowId) {
        self.attached.lock().unwrap().remove(id);
    }

    /// Dispatch one container event. Auto-attaches created windows,
    /// drops closed ones, and propagates state changes of attached
    /// windows.
    pub async fn handle_event(&self, event: ContainerEvent) {
        match event {
            ContainerEvent::WindowCreated(id) => {
                if let Ok(Some(window)) = self.container.get_window_by_id(&id).await {
                    self.attach(&window).await;
                }
            }
            ContainerEvent::WindowClosed(id) => self.detach(&id),
            ContainerEvent::WindowMinimized(id) if self.is_attached(&id) => {
                self.propagate(&id, StateChange::Minimize).await;
            }
            ContainerEvent::WindowRestored(id) if self.is_attached(&id) => {
                self.propagate(&id, StateChange::Restore).await;
            }
            _ => {}
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
        let mut rx = mgr.container.events().subscribe();
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

    async fn propagate(&self, id: &WindowId, change: StateChange) {
        // Main-window tracking and group tracking are independent
        // policies; both may fire for the same event.
        if self.options.tracking.contains(WindowStateTracking::MAIN) {
            if let Some(main) = self.container.get_main_window().await {
                if main.id() == id {
                    match self.container.get_all_windows().await {
                        Ok(windows) => {
                            for window in &windows {
                                apply(window, change).await;
                            }
                        }
                        Err(e) => warn!(error = %e, "window enumeration failed"),
                    }
                }
            }
        }
        if self.options.tracking.contains(WindowStateTracking::GROUP) {
            let window = match self.container.get_window_by_id(id).await {
                Ok(Some(window)) => window,
                _ => return,
            };
            match window.get_group().await {
                Ok(group) => {
                    for member in &group {
                        apply(member, change).await;
                    }
                }
                Err(e) => warn!(window = %id, error = %e, "group query failed"),
            }
        }
    }
}

async fn apply(window: &WindowHandle, change: StateChange) {
    let result = match change {
        StateChange::Minimize => window.minimize().await,
        StateChange::Restore => window.restore().await,
    };
    if let Err(e) = result {
        warn!(window = %window.id(), error = %e, "state sync failed");
    }
}
