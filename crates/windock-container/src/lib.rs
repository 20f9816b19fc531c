//! Portable window and container abstractions.
//!
//! A [`Container`] represents one desktop-shell integration: it
//! enumerates windows, names the main window, and publishes lifecycle
//! events on an injected [`windock_common::EventBus`]. A
//! [`ContainerWindow`] wraps exactly one native window behind an async
//! contract; it does not own the native window's lifetime.
//!
//! Backends declare what they can do up front via
//! [`WindowCapabilities`] instead of being probed per call. The
//! in-memory [`sim`] backend implements the full contract for tests
//! and demos.

pub mod capabilities;
pub mod container;
pub mod event_map;
pub mod options;
pub mod sim;
pub mod window;

pub use capabilities::WindowCapabilities;
pub use container::Container;
pub use event_map::{LogicalEvent, NativeEventSpec};
pub use options::WindowOptions;
pub use window::{ContainerWindow, WindowHandle};
