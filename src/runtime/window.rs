use std::fmt;
use std::rc::Rc;

use crate::host::{HostWindow, Menu, MenuBar, MenuContributors, MenuHost, ViewerHandle};
use crate::menu::DispatchError;

/// Menus every window starts with, in bar order.
pub const DEFAULT_MENUS: [&str; 5] = ["File", "View", "Window", "Plugins", "Help"];

/// The window type of the reference host. Contributors registered here run
/// for every window opened afterwards.
#[derive(Debug)]
pub struct HostApp {
    contributors: Option<MenuContributors>,
}

impl Default for HostApp {
    fn default() -> Self {
        Self {
            contributors: Some(MenuContributors::new()),
        }
    }
}

impl HostApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host build without a menu contribution point.
    pub fn without_contribution_point() -> Self {
        Self { contributors: None }
    }

    pub fn open_window(&self, viewer: ViewerHandle) -> ViewerWindow {
        let mut window = ViewerWindow {
            viewer,
            menu_bar: default_menu_bar(),
        };
        if let Some(contributors) = &self.contributors {
            for (marker, contributor) in contributors.iter() {
                if let Err(error) = contributor.contribute(&mut window) {
                    tracing::warn!(marker, %error, "menu contributor failed");
                }
            }
        }
        tracing::debug!(menus = ?window.menu_bar.titles(), "opened viewer window");
        window
    }
}

impl MenuHost for HostApp {
    fn menu_contributors(&mut self) -> Option<&mut MenuContributors> {
        self.contributors.as_mut()
    }
}

fn default_menu_bar() -> MenuBar {
    let mut bar = MenuBar::new();
    for title in DEFAULT_MENUS {
        let mut menu = Menu::new(title);
        if title == "Help" {
            menu.add_action(
                "About",
                Rc::new(|| {
                    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                    Ok(())
                }),
            );
        }
        bar.add_menu(menu);
    }
    bar
}

pub struct ViewerWindow {
    viewer: ViewerHandle,
    menu_bar: MenuBar,
}

impl ViewerWindow {
    pub fn menu_bar(&self) -> &MenuBar {
        &self.menu_bar
    }

    pub fn activate(&self, path: &[&str]) -> Result<(), DispatchError> {
        self.menu_bar.activate(path)
    }
}

impl HostWindow for ViewerWindow {
    fn viewer(&self) -> ViewerHandle {
        Rc::clone(&self.viewer)
    }

    fn menu_bar_mut(&mut self) -> &mut MenuBar {
        &mut self.menu_bar
    }
}

impl fmt::Debug for ViewerWindow {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ViewerWindow")
            .field("menus", &self.menu_bar.titles())
            .finish_non_exhaustive()
    }
}
