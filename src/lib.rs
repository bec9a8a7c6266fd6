pub mod cli;
pub mod config;
pub mod extension;
pub mod form;
pub mod host;
pub mod menu;
pub mod model;
pub mod plugins;
pub mod registry;
pub mod runtime;
pub mod ui;
pub mod workflow;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
