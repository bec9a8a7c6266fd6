use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::config::MenuConfig;
use crate::extension::{self, PatchOutcome, ToolsMenuContributor};
use crate::form::FunctionOutput;
use crate::host::{Viewer, ViewerHandle};
use crate::model::{LayerData, LayerProps};
use crate::plugins::{SAMPLE_LAYER, sample_image};
use crate::registry::{normalize_path, split_path};

use super::{AppError, HostApp, Result, ViewerState, ViewerWindow};

#[derive(Debug)]
pub struct AppContext {
    config: MenuConfig,
    host: HostApp,
}

/// Viewer state left behind by one headless tool invocation.
#[derive(Debug)]
pub struct ToolRun {
    pub viewer: Rc<RefCell<ViewerState>>,
    pub output: Option<FunctionOutput>,
}

impl AppContext {
    pub fn new(config: MenuConfig) -> Self {
        Self::with_host(config, HostApp::new())
    }

    pub fn with_host(config: MenuConfig, host: HostApp) -> Self {
        Self { config, host }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Attaches the tools menu backed by the process-wide registry.
    pub fn install_tools_menu(&mut self) -> PatchOutcome {
        self.install_contributor(ToolsMenuContributor::global(self.config.clone()))
    }

    pub fn install_contributor(&mut self, contributor: ToolsMenuContributor) -> PatchOutcome {
        extension::install(&mut self.host, contributor)
    }

    pub fn open_window(&self, viewer: ViewerHandle) -> ViewerWindow {
        self.host.open_window(viewer)
    }

    /// Opens a window on a fresh viewer holding the sample image and clicks
    /// the tools menu entry at `path`. Function entries get `params` applied
    /// to their form and are called once.
    pub fn run_tool(
        &self,
        path: &str,
        params: &Map<String, Value>,
        track_workflow: bool,
    ) -> Result<ToolRun> {
        let normalized = normalize_path(path);
        let (category, label) = split_path(&normalized).ok_or_else(|| {
            AppError::Usage(format!("`{path}` is not of the form 'Main menu>Sub menu'"))
        })?;

        let mut state = ViewerState::new();
        if track_workflow {
            state = state.with_workflow_tracking();
        }
        state.add_layer(
            LayerData::Image(sample_image()),
            LayerProps {
                name: SAMPLE_LAYER.to_string(),
                ..LayerProps::default()
            },
        );
        let viewer = state.into_shared();
        let handle: ViewerHandle = viewer.clone();
        let window = self.open_window(handle);

        window.activate(&[self.config.title.as_str(), category, label])?;

        let form = viewer.borrow().docked_form(label);
        let output = match form {
            Some(form) => {
                let mut form = form.borrow_mut();
                for (name, value) in params {
                    form.set_json(name, value.clone())?;
                }
                form.call()?
            }
            None => {
                if !params.is_empty() {
                    tracing::warn!(path = %normalized, "entry has no form, parameters ignored");
                }
                None
            }
        };

        Ok(ToolRun { viewer, output })
    }
}
