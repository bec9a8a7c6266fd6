use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui;
use serde_json::{Value, json};

use crate::config::MenuConfig;
use crate::form::{FormHandle, FunctionForm, FunctionOutput, ParamKind};
use crate::host::{DockedWidget, Viewer, WidgetHandle};
use crate::model::Argument;
use crate::plugins::{add_sample_image, register_builtin_globally};
use crate::runtime::{AppContext, AppError, Result, ViewerState, ViewerWindow};

use super::UiAction;
use super::menu_bar::draw_menu_bar;

const WINDOW_TITLE: &str = "image-tools";
const MIN_WINDOW_SIZE: [f32; 2] = [960.0, 640.0];

pub struct ToolsViewerApp {
    viewer: Rc<RefCell<ViewerState>>,
    window: ViewerWindow,
    status: String,
}

impl ToolsViewerApp {
    pub fn new(context: &AppContext) -> Self {
        let viewer = ViewerState::new().with_workflow_tracking().into_shared();
        add_sample_image(&mut *viewer.borrow_mut());
        let window = context.open_window(viewer.clone());
        Self {
            viewer,
            window,
            status: "Ready".to_string(),
        }
    }

    pub fn viewer(&self) -> &Rc<RefCell<ViewerState>> {
        &self.viewer
    }

    pub fn window(&self) -> &ViewerWindow {
        &self.window
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn apply(&mut self, action: UiAction) {
        match self.execute(action) {
            Ok(message) => self.status = message,
            Err(error) => {
                tracing::warn!(%error, "ui action failed");
                self.status = error.to_string();
            }
        }
    }

    fn execute(&mut self, action: UiAction) -> Result<String> {
        match action {
            UiAction::Activate(path) => {
                let segments = path.iter().map(String::as_str).collect::<Vec<_>>();
                self.window.activate(&segments)?;
                Ok(path.join(" > "))
            }
            UiAction::SetValue { dock, name, value } => {
                self.form_at(dock)?.borrow_mut().set_json(&name, value)?;
                Ok(format!("{name} updated"))
            }
            UiAction::CallForm(dock) => {
                let output = self.form_at(dock)?.borrow_mut().call()?;
                Ok(match output {
                    Some(FunctionOutput::Value(value)) => format!("returned {value}"),
                    Some(FunctionOutput::Data(data)) => format!("returned {}", data.describe()),
                    None => "done".to_string(),
                })
            }
            UiAction::ClickWidget(dock) => {
                let widget = self.widget_at(dock)?;
                let message = widget.borrow_mut().click();
                Ok(message.unwrap_or_default())
            }
            UiAction::CloseDock(dock) => {
                let panel = self.viewer.borrow_mut().close_dock_at(dock);
                let panel = panel.ok_or_else(|| {
                    AppError::Usage(format!("no panel docked at position {dock}"))
                })?;
                Ok(format!("closed {}", panel.name))
            }
        }
    }

    fn form_at(&self, dock: usize) -> Result<FormHandle> {
        let viewer = self.viewer.borrow();
        let form = viewer
            .docks()
            .get(dock)
            .and_then(|panel| panel.widget.as_form())
            .cloned();
        form.ok_or_else(|| AppError::Usage(format!("no form docked at position {dock}")))
    }

    fn widget_at(&self, dock: usize) -> Result<WidgetHandle> {
        let viewer = self.viewer.borrow();
        let widget = viewer
            .docks()
            .get(dock)
            .and_then(|panel| panel.widget.as_widget())
            .cloned();
        widget.ok_or_else(|| AppError::Usage(format!("no widget docked at position {dock}")))
    }
}

impl eframe::App for ToolsViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("viewer-header").show(ctx, |ui| {
            draw_menu_bar(ui, self.window.menu_bar(), &mut actions);
        });

        egui::TopBottomPanel::bottom("viewer-status").show(ctx, |ui| {
            ui.label(&self.status);
        });

        egui::SidePanel::right("viewer-docks")
            .resizable(true)
            .show(ctx, |ui| {
                draw_docks(ui, &self.viewer.borrow(), &mut actions);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            draw_layers(ui, &self.viewer.borrow());
        });

        for action in actions {
            self.apply(action);
        }
    }
}

fn draw_layers(ui: &mut egui::Ui, viewer: &ViewerState) {
    ui.heading("Layers");
    if viewer.layers().is_empty() {
        ui.label("No layers. Try Tools > Utilities > Add sample image.");
    }
    for layer in viewer.layers() {
        let mut line = format!("{} {}: {}", layer.id, layer.name, layer.data.describe());
        if let Some(size) = layer.point_size {
            line.push_str(&format!(", point size {size:.2}"));
        }
        ui.label(line);
    }
    if let Some(workflow) = viewer.workflow() {
        ui.separator();
        ui.label(format!("{} recorded workflow steps", workflow.len()));
    }
}

fn draw_docks(ui: &mut egui::Ui, viewer: &ViewerState, actions: &mut Vec<UiAction>) {
    for (index, panel) in viewer.docks().iter().enumerate() {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.strong(&panel.name);
                if panel.closable && ui.small_button("x").clicked() {
                    actions.push(UiAction::CloseDock(index));
                }
            });
            match &panel.widget {
                DockedWidget::Form(form) => match form.try_borrow() {
                    Ok(form) => draw_form(ui, index, &form, viewer, actions),
                    Err(_) => {
                        ui.label("running...");
                    }
                },
                DockedWidget::Widget(widget) => {
                    let caption = widget
                        .try_borrow()
                        .map(|widget| widget.describe())
                        .unwrap_or_default();
                    if ui.button(caption).clicked() {
                        actions.push(UiAction::ClickWidget(index));
                    }
                }
            }
        });
    }
}

fn draw_form(
    ui: &mut egui::Ui,
    dock: usize,
    form: &FunctionForm,
    viewer: &ViewerState,
    actions: &mut Vec<UiAction>,
) {
    for param in &form.spec().params {
        let current = form.value(&param.name);
        let raw = current.and_then(Argument::as_value);
        let mut changed: Option<Value> = None;

        ui.horizontal(|ui| {
            ui.label(&param.name);
            match param.kind {
                ParamKind::Float => {
                    let mut value = raw.and_then(Value::as_f64).unwrap_or_default();
                    if ui.add(egui::DragValue::new(&mut value).speed(0.1)).changed() {
                        changed = Some(json!(value));
                    }
                }
                ParamKind::Int => {
                    let mut value = raw.and_then(Value::as_i64).unwrap_or_default();
                    if ui.add(egui::DragValue::new(&mut value)).changed() {
                        changed = Some(json!(value));
                    }
                }
                ParamKind::Bool => {
                    let mut value = raw.and_then(Value::as_bool).unwrap_or_default();
                    if ui.checkbox(&mut value, "").changed() {
                        changed = Some(json!(value));
                    }
                }
                ParamKind::Text => {
                    let mut value = raw.and_then(Value::as_str).unwrap_or_default().to_string();
                    if ui.text_edit_singleline(&mut value).changed() {
                        changed = Some(json!(value));
                    }
                }
                ParamKind::Layer(kind) => {
                    let selected = current.and_then(Argument::as_layer);
                    let selected_text = selected
                        .and_then(|id| viewer.layer(id))
                        .map(|layer| layer.name.clone())
                        .unwrap_or_else(|| "<none>".to_string());
                    egui::ComboBox::from_id_salt((dock, param.name.as_str()))
                        .selected_text(selected_text)
                        .show_ui(ui, |ui| {
                            for layer in viewer.layers().iter().filter(|layer| layer.kind() == kind) {
                                if ui
                                    .selectable_label(selected == Some(layer.id), &layer.name)
                                    .clicked()
                                {
                                    changed = Some(json!(layer.id.0));
                                }
                            }
                        });
                }
            }
        });

        if let Some(value) = changed {
            actions.push(UiAction::SetValue {
                dock,
                name: param.name.clone(),
                value,
            });
        }
    }

    ui.horizontal(|ui| {
        if ui.button("Run").clicked() {
            actions.push(UiAction::CallForm(dock));
        }
        if form.dismissable() && ui.button("Dismiss").clicked() {
            actions.push(UiAction::CloseDock(dock));
        }
    });
}

pub fn run(config: MenuConfig) -> std::result::Result<(), String> {
    register_builtin_globally();
    let mut context = AppContext::new(config);
    context.install_tools_menu();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(MIN_WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE)
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(ToolsViewerApp::new(&context)))),
    )
    .map_err(|error| error.to_string())
}
