//! Contracts the tools menu expects from the host viewer application.
//!
//! Nothing in here is a toolkit: the host supplies the implementations
//! (see `runtime` for the in-memory reference host).

mod error;
mod menubar;
mod viewer;
mod window;

#[cfg(test)]
mod tests;

pub use error::{HostError, Result};
pub use menubar::{Menu, MenuAction, MenuBar, MenuItem, OutlineItem, Trigger};
pub use viewer::{
    DockArea, DockPanel, DockedWidget, Viewer, ViewerHandle, ViewerRef, Widget, WidgetContext,
    WidgetHandle, WorkflowTracker,
};
pub use window::{HostWindow, MenuContributor, MenuContributors, MenuHost};
