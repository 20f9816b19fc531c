pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{WindockError, WindowError};
pub use events::{ContainerEvent, EventBus};
pub use id::WindowId;
pub use types::Rect;

pub type Result<T> = std::result::Result<T, WindockError>;
