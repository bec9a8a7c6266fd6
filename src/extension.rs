//! Attaches the tools menu to the host's menu construction.
//!
//! This is the only module that knows how the host builds its menu bar: it
//! registers a contributor under a marker so that every new window gets the
//! tools menu right before the reference menu.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::MenuConfig;
use crate::host::{HostWindow, MenuContributor, MenuHost, Result, ViewerRef};
use crate::menu::build_menu;
use crate::registry::{ToolsRegistry, global_snapshot};

#[cfg(test)]
mod tests;

pub const TOOLS_MENU_MARKER: &str = "image-tools-menu";

static WARNED_UNSUPPORTED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Installed,
    AlreadyInstalled,
    /// The host has no contribution point; its default menus stay as they are.
    Unsupported,
}

/// Builds the tools menu from a fresh registry snapshot for every window.
pub struct ToolsMenuContributor {
    snapshot: Box<dyn Fn() -> ToolsRegistry>,
    config: MenuConfig,
}

impl ToolsMenuContributor {
    pub fn new(snapshot: impl Fn() -> ToolsRegistry + 'static, config: MenuConfig) -> Self {
        Self {
            snapshot: Box::new(snapshot),
            config,
        }
    }

    /// Reads the process-wide registry.
    pub fn global(config: MenuConfig) -> Self {
        Self::new(global_snapshot, config)
    }

    /// Always uses the given registry contents.
    pub fn fixed(registry: ToolsRegistry, config: MenuConfig) -> Self {
        Self::new(move || registry.clone(), config)
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }
}

impl MenuContributor for ToolsMenuContributor {
    fn contribute(&self, window: &mut dyn HostWindow) -> Result<()> {
        let registry = (self.snapshot)();
        let viewer = ViewerRef::new(&window.viewer());
        let build = build_menu(&registry, viewer, &self.config);
        let menu = build.tree.into_menu(&self.config, registry);

        if !window
            .menu_bar_mut()
            .insert_before(&self.config.reference_menu, menu)
        {
            tracing::warn!(
                reference = %self.config.reference_menu,
                "reference menu not found, appended tools menu at the end"
            );
        }
        Ok(())
    }
}

impl fmt::Debug for ToolsMenuContributor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ToolsMenuContributor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Hooks `contributor` into `host` once; repeated calls are no-ops.
pub fn install(host: &mut dyn MenuHost, contributor: ToolsMenuContributor) -> PatchOutcome {
    let Some(contributors) = host.menu_contributors() else {
        if !WARNED_UNSUPPORTED.swap(true, Ordering::Relaxed) {
            tracing::warn!(
                "host does not expose a menu contribution point, the tools menu is unavailable"
            );
        }
        return PatchOutcome::Unsupported;
    };
    if contributors.contains(TOOLS_MENU_MARKER) {
        return PatchOutcome::AlreadyInstalled;
    }
    contributors.push(TOOLS_MENU_MARKER, Rc::new(contributor));
    tracing::debug!("tools menu contributor installed");
    PatchOutcome::Installed
}
