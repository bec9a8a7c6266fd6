//! In-memory reference host: a viewer, a window type with a menu
//! contribution point, and the application wiring around them.

mod context;
mod error;
mod viewer_state;
mod window;


pub use context::{AppContext, ToolRun};
pub use error::{AppError, Result};
pub use viewer_state::ViewerState;
pub use window::{DEFAULT_MENUS, HostApp, ViewerWindow};
