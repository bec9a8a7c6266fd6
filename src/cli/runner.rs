use std::path::Path;

use clap::Parser;
use serde_json::{Map, Value};

use crate::config::{MenuConfig, load_config};
use crate::form::FunctionOutput;
use crate::host::Viewer;
use crate::plugins::register_builtin_globally;
use crate::registry::global_snapshot;
use crate::runtime::{AppContext, AppError, Result, ViewerState};
use crate::workflow::save_report;

use super::types::{Cli, Commands, LayerSummary, RunSummary};

pub fn run_cli() -> std::result::Result<(), String> {
    let cli = Cli::parse();
    register_builtin_globally();
    execute(cli.command).map_err(|error| error.to_string())
}

fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::List { json } => {
            let registry = global_snapshot();
            if json {
                print_json(&registry.list_registered())?;
            } else {
                print!("{}", registry.listing_text());
            }
        }
        Commands::Menu { config } => {
            let mut app = AppContext::new(read_config(config.as_deref())?);
            app.install_tools_menu();
            let viewer = ViewerState::new().into_shared();
            let window = app.open_window(viewer);
            let outline = window
                .menu_bar()
                .menus()
                .iter()
                .map(|menu| menu.outline())
                .collect::<Vec<_>>();
            print_json(&outline)?;
        }
        Commands::Run {
            path,
            params,
            config,
            report,
        } => {
            let params = parse_params(params.as_deref())?;
            let mut app = AppContext::new(read_config(config.as_deref())?);
            app.install_tools_menu();
            let run = app.run_tool(&path, &params, report.is_some())?;

            let viewer = run.viewer.borrow();
            if let Some(report_path) = report {
                let report = viewer
                    .workflow()
                    .map(|log| log.report(Some(path.clone())))
                    .unwrap_or_default();
                save_report(&report_path, &report)?;
                tracing::info!(path = %report_path.display(), steps = report.steps.len(), "saved workflow report");
            }

            let summary = RunSummary {
                entry: path,
                output: run.output.map(|output| match output {
                    FunctionOutput::Value(value) => value,
                    FunctionOutput::Data(data) => Value::String(data.describe()),
                }),
                layers: viewer
                    .layers()
                    .iter()
                    .map(|layer| LayerSummary {
                        id: layer.id,
                        name: layer.name.clone(),
                        kind: layer.kind(),
                        data: layer.data.describe(),
                        scale: layer.scale.clone(),
                        point_size: layer.point_size,
                    })
                    .collect(),
                docks: viewer.docks().iter().map(|panel| panel.name.clone()).collect(),
            };
            print_json(&summary)?;
        }
        Commands::View { config } => {
            let config = read_config(config.as_deref())?;
            crate::ui::run(config).map_err(AppError::Usage)?;
        }
    }

    Ok(())
}

fn read_config(path: Option<&Path>) -> Result<MenuConfig> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None => Ok(MenuConfig::default()),
    }
}

fn parse_params(raw: Option<&str>) -> Result<Map<String, Value>> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(params)) => Ok(params),
        Ok(other) => Err(AppError::Usage(format!(
            "`--params` must be a JSON object, got {other}"
        ))),
        Err(error) => Err(AppError::Usage(format!("invalid `--params` JSON: {error}"))),
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|error| AppError::Usage(format!("failed to render output: {error}")))?;
    println!("{rendered}");
    Ok(())
}
