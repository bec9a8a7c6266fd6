use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use crate::model::{DataKind, LayerId};

#[derive(Debug, Parser)]
#[command(
    name = "image-tools",
    version,
    about = "Image viewer with a registrable tools menu"
)]
pub(super) struct Cli {
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Prints every registered tools menu entry with its defining module.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Prints the menu bar of a new window as JSON.
    Menu {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Clicks one tools menu entry on a viewer holding the sample image.
    Run {
        /// Entry path, e.g. "Filtering > Gaussian blur".
        path: String,
        /// JSON object of form values for function entries.
        #[arg(long)]
        params: Option<String>,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Writes the workflow recorded during the run.
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Launches the native viewer window.
    View {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
pub(super) struct LayerSummary {
    pub(super) id: LayerId,
    pub(super) name: String,
    pub(super) kind: DataKind,
    pub(super) data: String,
    pub(super) scale: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) point_size: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(super) struct RunSummary {
    pub(super) entry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) output: Option<Value>,
    pub(super) layers: Vec<LayerSummary>,
    pub(super) docks: Vec<String>,
}
