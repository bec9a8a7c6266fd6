use image_tools_menu::config::MenuConfig;
use image_tools_menu::extension::PatchOutcome;
use image_tools_menu::host::Viewer;
use image_tools_menu::plugins::register_builtin_globally;
use image_tools_menu::registry::{global_snapshot, register_action};
use image_tools_menu::runtime::{AppContext, ViewerState};
use image_tools_menu::workflow::{load_report, save_report};
use serde_json::{Map, json};

fn count_layers(viewer: &mut dyn Viewer) {
    let _ = viewer.layers().len();
}

#[test]
fn plugin_registration_shows_up_in_new_windows() {
    register_builtin_globally();
    let returned = register_action("Integration > Count layers", count_layers);
    let mut state = ViewerState::new();
    returned(&mut state);

    let mut app = AppContext::new(MenuConfig::default());
    assert_eq!(app.install_tools_menu(), PatchOutcome::Installed);
    assert_eq!(app.install_tools_menu(), PatchOutcome::AlreadyInstalled);

    let window = app.open_window(ViewerState::new().into_shared());
    let tools = window.menu_bar().menu("Tools").expect("tools menu");
    let labels = tools.item_labels();
    assert!(labels.contains(&"Integration"));
    assert!(labels.contains(&"Utilities"));
    assert_eq!(labels.last(), Some(&"Tools Info"));

    let listing = global_snapshot().list_registered();
    let entry = listing
        .iter()
        .find(|entry| entry.path == "Integration>Count layers")
        .expect("listed");
    assert_eq!(entry.module, "tools_menu");
}

#[test]
fn headless_run_writes_a_workflow_report() {
    register_builtin_globally();
    let mut app = AppContext::new(MenuConfig::default());
    app.install_tools_menu();

    let mut params = Map::new();
    params.insert("radius".to_string(), json!(3));
    let run = app
        .run_tool("Measurement > Local maxima", &params, true)
        .expect("run");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("workflow.yaml");
    let report = run
        .viewer
        .borrow()
        .workflow()
        .map(|log| log.report(Some("maxima".to_string())))
        .expect("tracked");
    save_report(&path, &report).expect("save");

    let loaded = load_report(&path).expect("load");
    assert_eq!(loaded, report);
    assert_eq!(loaded.steps.len(), 1);
    assert_eq!(loaded.steps[0].function, "local_maxima");
}
