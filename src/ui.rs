//! Native viewer window on top of the in-memory host.

mod app;
mod menu_bar;


use serde_json::Value;

pub use app::{ToolsViewerApp, run};

/// Deferred user input, applied after the frame is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Full menu path: bar title, submenu titles, leaf label.
    Activate(Vec<String>),
    SetValue {
        dock: usize,
        name: String,
        value: Value,
    },
    CallForm(usize),
    ClickWidget(usize),
    /// Position in the viewer's dock list.
    CloseDock(usize),
}
