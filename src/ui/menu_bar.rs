use eframe::egui;

use crate::host::{Menu, MenuBar, MenuItem};

use super::UiAction;

pub(crate) fn draw_menu_bar(ui: &mut egui::Ui, bar: &MenuBar, actions: &mut Vec<UiAction>) {
    egui::menu::bar(ui, |ui| {
        for menu in bar.menus() {
            ui.menu_button(&menu.title, |ui| {
                let mut path = vec![menu.title.clone()];
                draw_menu_items(ui, menu, &mut path, actions);
            });
        }
    });
}

fn draw_menu_items(
    ui: &mut egui::Ui,
    menu: &Menu,
    path: &mut Vec<String>,
    actions: &mut Vec<UiAction>,
) {
    for item in &menu.items {
        match item {
            MenuItem::Separator => {
                ui.separator();
            }
            MenuItem::Submenu(submenu) => {
                ui.menu_button(&submenu.title, |ui| {
                    path.push(submenu.title.clone());
                    draw_menu_items(ui, submenu, path, actions);
                    path.pop();
                });
            }
            MenuItem::Action(action) => {
                if ui.button(&action.label).clicked() {
                    let mut full = path.clone();
                    full.push(action.label.clone());
                    actions.push(UiAction::Activate(full));
                    ui.close_menu();
                }
            }
        }
    }
}
