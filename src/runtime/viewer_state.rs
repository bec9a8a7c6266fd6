use std::cell::RefCell;
use std::rc::Rc;

use crate::form::FormHandle;
use crate::host::{
    DockArea, DockPanel, DockedWidget, HostError, Viewer, WorkflowTracker,
};
use crate::model::{Layer, LayerData, LayerId, LayerProps};
use crate::workflow::WorkflowLog;

#[derive(Debug, Default)]
pub struct ViewerState {
    layers: Vec<Layer>,
    docks: Vec<DockPanel>,
    next_layer: u64,
    tracking: bool,
    workflow: Option<WorkflowLog>,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `workflow_tracker` install a `WorkflowLog` on first use.
    pub fn with_workflow_tracking(mut self) -> Self {
        self.tracking = true;
        self
    }

    pub fn into_shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        let index = self.layers.iter().position(|layer| layer.id == id)?;
        Some(self.layers.remove(index))
    }

    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    pub fn docks(&self) -> &[DockPanel] {
        &self.docks
    }

    /// Most recently docked panel with this name.
    pub fn dock(&self, name: &str) -> Option<&DockPanel> {
        self.docks.iter().rev().find(|panel| panel.name == name)
    }

    pub fn dock_mut(&mut self, name: &str) -> Option<&mut DockPanel> {
        self.docks.iter_mut().rev().find(|panel| panel.name == name)
    }

    pub fn docked_form(&self, name: &str) -> Option<FormHandle> {
        self.dock(name)
            .and_then(|panel| panel.widget.as_form())
            .map(Rc::clone)
    }

    pub fn close_dock_at(&mut self, index: usize) -> Option<DockPanel> {
        (index < self.docks.len()).then(|| self.docks.remove(index))
    }

    pub fn workflow(&self) -> Option<&WorkflowLog> {
        self.workflow.as_ref()
    }
}

impl Viewer for ViewerState {
    fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    fn add_layer(&mut self, data: LayerData, props: LayerProps) -> LayerId {
        self.next_layer += 1;
        let id = LayerId(self.next_layer);
        self.layers.push(Layer::new(id, data, props));
        id
    }

    /// Per-axis maximum of the layers' world extents, aligned on trailing axes.
    fn display_extent(&self) -> Vec<f64> {
        let ndim = self
            .layers
            .iter()
            .map(|layer| layer.data.ndim())
            .max()
            .unwrap_or(0);
        let mut extent = vec![0.0_f64; ndim];
        for layer in &self.layers {
            let world = layer.world_extent();
            let offset = ndim - world.len();
            for (axis, value) in world.into_iter().enumerate() {
                let slot = &mut extent[offset + axis];
                *slot = slot.max(value);
            }
        }
        extent
    }

    fn add_dock_widget(
        &mut self,
        widget: DockedWidget,
        area: DockArea,
        name: &str,
    ) -> crate::host::Result<&mut DockPanel> {
        if name.trim().is_empty() {
            return Err(HostError::DockRejected(
                "dock widgets need a name".to_string(),
            ));
        }
        tracing::debug!(name, ?area, "docking widget");
        let index = self.docks.len();
        self.docks.push(DockPanel {
            name: name.to_string(),
            area,
            closable: true,
            widget,
        });
        Ok(&mut self.docks[index])
    }

    fn workflow_tracker(&mut self) -> Option<&mut dyn WorkflowTracker> {
        if !self.tracking {
            return None;
        }
        let log: &mut dyn WorkflowTracker = self.workflow.get_or_insert_with(WorkflowLog::new);
        Some(log)
    }
}
