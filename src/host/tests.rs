use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;

use super::*;
use crate::menu::DispatchError;
use crate::runtime::ViewerState;

fn bar(titles: &[&str]) -> MenuBar {
    let mut bar = MenuBar::new();
    for title in titles {
        bar.add_menu(Menu::new(*title));
    }
    bar
}

#[test]
fn insert_before_places_menu_ahead_of_reference() {
    let mut bar = bar(&["File", "View", "Help"]);
    assert!(bar.insert_before("Help", Menu::new("Tools")));
    assert_eq!(bar.titles(), vec!["File", "View", "Tools", "Help"]);
}

#[test]
fn insert_before_appends_when_reference_is_missing() {
    let mut bar = bar(&["File", "View"]);
    assert!(!bar.insert_before("Help", Menu::new("Tools")));
    assert_eq!(bar.titles(), vec!["File", "View", "Tools"]);
}

#[test]
fn activate_walks_nested_submenus() {
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    let mut leaf_menu = Menu::new("Utilities");
    leaf_menu.add_action(
        "Action",
        Rc::new(move || {
            counter.set(counter.get() + 1);
            Ok(())
        }),
    );
    let mut tools = Menu::new("Tools");
    tools.add_menu(leaf_menu);
    let mut bar = MenuBar::new();
    bar.add_menu(tools);

    bar.activate(&["Tools", "Utilities", "Action"]).expect("activate");
    assert_eq!(hits.get(), 1);

    let error = bar
        .activate(&["Tools", "Utilities", "Missing"])
        .expect_err("missing leaf");
    assert!(matches!(
        error,
        DispatchError::Host(HostError::UnknownMenuItem(path)) if path == "Tools > Utilities > Missing"
    ));
    assert!(bar.activate(&[]).is_err());
}

#[test]
fn outline_serializes_with_type_tags() {
    let mut menu = Menu::new("Tools");
    let mut utilities = Menu::new("Utilities");
    utilities.add_action("Action", Rc::new(|| Ok(())));
    menu.add_menu(utilities);
    menu.add_separator();
    menu.add_action("Tools Info", Rc::new(|| Ok(())));

    assert_eq!(menu.item_labels(), vec!["Utilities", "---", "Tools Info"]);
    let value = serde_json::to_value(menu.outline()).expect("serialize");
    assert_eq!(
        value,
        json!({
            "type": "submenu",
            "title": "Tools",
            "items": [
                {"type": "submenu", "title": "Utilities", "items": [{"type": "action", "label": "Action"}]},
                {"type": "separator"},
                {"type": "action", "label": "Tools Info"}
            ]
        })
    );
}

#[test]
fn viewer_ref_reports_closed_and_busy_viewers() {
    let handle: ViewerHandle = ViewerState::new().into_shared();
    let viewer = ViewerRef::new(&handle);
    assert_eq!(viewer.with(|viewer| viewer.layers().len()).expect("alive"), 0);

    {
        let _guard = handle.borrow_mut();
        assert!(matches!(viewer.with(|_| ()), Err(HostError::ViewerBusy)));
    }

    drop(handle);
    assert!(matches!(viewer.with_mut(|_| ()), Err(HostError::ViewerClosed)));
    assert!(format!("{viewer:?}").contains("alive: false"));
}

struct Noop;

impl MenuContributor for Noop {
    fn contribute(&self, _window: &mut dyn HostWindow) -> Result<()> {
        Ok(())
    }
}

#[test]
fn contributors_are_looked_up_by_marker() {
    let mut contributors = MenuContributors::new();
    assert!(contributors.is_empty());
    contributors.push("first", Rc::new(Noop));
    contributors.push("second", Rc::new(Noop));
    assert!(contributors.contains("second"));
    assert!(!contributors.contains("third"));
    assert_eq!(contributors.len(), 2);
    assert_eq!(format!("{contributors:?}"), r#"["first", "second"]"#);
}
