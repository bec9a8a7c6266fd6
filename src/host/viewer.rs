use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::form::FormHandle;
use crate::model::{FormArguments, Layer, LayerData, LayerId, LayerProps};

use super::{HostError, Result};

/// The viewer data model as seen by the tools menu.
pub trait Viewer {
    fn layers(&self) -> &[Layer];

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer>;

    /// Adds a layer of the category matching `data` and returns its id.
    fn add_layer(&mut self, data: LayerData, props: LayerProps) -> LayerId;

    /// World-space size of the currently displayed range, per axis.
    fn display_extent(&self) -> Vec<f64>;

    fn add_dock_widget(
        &mut self,
        widget: DockedWidget,
        area: DockArea,
        name: &str,
    ) -> Result<&mut DockPanel>;

    /// Install-or-fetch accessor for the optional workflow tracker.
    fn workflow_tracker(&mut self) -> Option<&mut dyn WorkflowTracker> {
        None
    }

    fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers().iter().find(|layer| layer.id == id)
    }
}

/// Receives provenance for every layer a generated form writes.
pub trait WorkflowTracker {
    fn update(&mut self, layer: LayerId, function: &str, args: &FormArguments);
}

pub type ViewerHandle = Rc<RefCell<dyn Viewer>>;

/// Non-owning viewer reference held by menus, forms and widgets.
#[derive(Clone)]
pub struct ViewerRef(Weak<RefCell<dyn Viewer>>);

impl ViewerRef {
    pub fn new(handle: &ViewerHandle) -> Self {
        Self(Rc::downgrade(handle))
    }

    pub fn upgrade(&self) -> Option<ViewerHandle> {
        self.0.upgrade()
    }

    pub fn with<R>(&self, f: impl FnOnce(&dyn Viewer) -> R) -> Result<R> {
        let handle = self.upgrade().ok_or(HostError::ViewerClosed)?;
        let viewer = handle.try_borrow().map_err(|_| HostError::ViewerBusy)?;
        Ok(f(&*viewer))
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut dyn Viewer) -> R) -> Result<R> {
        let handle = self.upgrade().ok_or(HostError::ViewerClosed)?;
        let mut viewer = handle.try_borrow_mut().map_err(|_| HostError::ViewerBusy)?;
        Ok(f(&mut *viewer))
    }
}

impl fmt::Debug for ViewerRef {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ViewerRef")
            .field("alive", &(self.0.strong_count() > 0))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockArea {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
}

/// A pre-built widget docked by a `DockWidget` entry.
pub trait Widget {
    fn describe(&self) -> String;

    /// Primary button of the widget, if it has one.
    fn click(&mut self) -> Option<String> {
        None
    }
}

/// Constructor input for widget factories.
#[derive(Debug, Clone, Default)]
pub struct WidgetContext {
    pub viewer: Option<ViewerRef>,
}

pub type WidgetHandle = Rc<RefCell<Box<dyn Widget>>>;

pub enum DockedWidget {
    Form(FormHandle),
    Widget(WidgetHandle),
}

impl DockedWidget {
    pub fn as_form(&self) -> Option<&FormHandle> {
        match self {
            Self::Form(form) => Some(form),
            Self::Widget(_) => None,
        }
    }

    pub fn as_widget(&self) -> Option<&WidgetHandle> {
        match self {
            Self::Form(_) => None,
            Self::Widget(widget) => Some(widget),
        }
    }
}

impl fmt::Debug for DockedWidget {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Form(form) => match form.try_borrow() {
                Ok(form) => write!(formatter, "Form({})", form.title()),
                Err(_) => formatter.write_str("Form(<busy>)"),
            },
            Self::Widget(widget) => match widget.try_borrow() {
                Ok(widget) => write!(formatter, "Widget({})", widget.describe()),
                Err(_) => formatter.write_str("Widget(<busy>)"),
            },
        }
    }
}

#[derive(Debug)]
pub struct DockPanel {
    pub name: String,
    pub area: DockArea,
    pub closable: bool,
    pub widget: DockedWidget,
}
