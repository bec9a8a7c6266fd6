//! Builds the two-level tools menu from a registry snapshot and dispatches
//! leaf activations.

mod builder;
mod dispatch;
mod error;
mod tree;


pub use builder::{MenuBuild, SkippedEntry, build_menu};
pub use dispatch::{Activation, Dispatcher};
pub use error::{DispatchError, Result};
pub use tree::{MenuCategory, MenuLeaf, MenuTree};
