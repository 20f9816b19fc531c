//! Window grouping and snap assist.
//!
//! [`GroupWindowManager`] keeps minimize/restore state in sync across
//! a container's main window or a window's group.
//! [`SnapAssistWindowManager`] builds on it: while a window is
//! dragged it magnetically snaps edges against other windows and, on
//! release, folds the highlighted snap targets into one group.
//!
//! Both managers are driven by the container's event bus. Attach them
//! with [`GroupWindowManager::start`] /
//! [`SnapAssistWindowManager::start`], which hook every open window
//! and keep hooking windows as the container creates them.

pub mod assist;
pub mod geometry;
pub mod group;
pub mod options;

pub use assist::SnapAssistWindowManager;
pub use geometry::SnapGeometry;
pub use group::GroupWindowManager;
pub use options::{GroupOptions, SnapOptions, WindowStateTracking};
