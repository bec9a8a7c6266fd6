use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::host::{MenuHost, Viewer};
use crate::registry::ToolsRegistry;
use crate::runtime::{HostApp, ViewerState};

fn add_marker_layer(viewer: &mut dyn Viewer) {
    viewer.add_layer(
        crate::model::LayerData::Labels(ndarray::ArrayD::zeros(ndarray::IxDyn(&[1]))),
        crate::model::LayerProps::default(),
    );
}

fn registry() -> ToolsRegistry {
    let mut registry = ToolsRegistry::new();
    registry.register_action("Utilities > Action", add_marker_layer);
    registry
}

#[test]
fn install_is_idempotent() {
    let mut host = HostApp::new();
    let config = MenuConfig::default();
    assert_eq!(
        install(&mut host, ToolsMenuContributor::fixed(registry(), config.clone())),
        PatchOutcome::Installed
    );
    assert_eq!(
        install(&mut host, ToolsMenuContributor::fixed(registry(), config)),
        PatchOutcome::AlreadyInstalled
    );
    let contributors = host.menu_contributors().expect("contribution point");
    assert_eq!(contributors.len(), 1);
    assert!(contributors.contains(TOOLS_MENU_MARKER));
}

#[test]
fn hosts_without_contribution_point_are_left_alone() {
    let mut host = HostApp::without_contribution_point();
    for _ in 0..2 {
        assert_eq!(
            install(&mut host, ToolsMenuContributor::global(MenuConfig::default())),
            PatchOutcome::Unsupported
        );
    }
}

#[test]
fn tools_menu_lands_before_help_and_dispatches() {
    let mut host = HostApp::new();
    install(
        &mut host,
        ToolsMenuContributor::fixed(registry(), MenuConfig::default()),
    );
    let viewer = ViewerState::new().into_shared();
    let window = host.open_window(viewer.clone());

    let titles = window.menu_bar().titles();
    let tools = titles.iter().position(|title| *title == "Tools");
    let help = titles.iter().position(|title| *title == "Help");
    assert_eq!(tools.map(|index| index + 1), help);

    window
        .activate(&["Tools", "Utilities", "Action"])
        .expect("activate");
    assert_eq!(viewer.borrow().layers().len(), 1);
}

#[test]
fn missing_reference_menu_appends_tools_menu() {
    let mut host = HostApp::new();
    let config = MenuConfig {
        reference_menu: "Nonexistent".to_string(),
        ..MenuConfig::default()
    };
    install(&mut host, ToolsMenuContributor::fixed(registry(), config));
    let window = host.open_window(ViewerState::new().into_shared());
    assert_eq!(window.menu_bar().titles().last(), Some(&"Tools"));
}

#[test]
fn every_window_reads_a_fresh_snapshot() {
    let shared = Rc::new(RefCell::new(registry()));
    let source = Rc::clone(&shared);
    let mut host = HostApp::new();
    install(
        &mut host,
        ToolsMenuContributor::new(move || source.borrow().clone(), MenuConfig::default()),
    );

    let first = host.open_window(ViewerState::new().into_shared());
    shared
        .borrow_mut()
        .register_action("Utilities > Later", add_marker_layer);
    let second = host.open_window(ViewerState::new().into_shared());

    let labels = |window: &crate::runtime::ViewerWindow| {
        window
            .menu_bar()
            .menu("Tools")
            .and_then(|menu| menu.submenu("Utilities"))
            .map(|menu| menu.item_labels().len())
    };
    assert_eq!(labels(&first), Some(1));
    assert_eq!(labels(&second), Some(2));
}
