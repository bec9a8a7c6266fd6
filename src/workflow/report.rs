use serde::{Deserialize, Serialize};

use crate::model::{FormArguments, LayerId};

/// How one layer was produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowStep {
    pub layer: LayerId,
    pub function: String,
    pub args: FormArguments,
}

impl WorkflowStep {
    /// Layers this step read from.
    pub fn sources(&self) -> Vec<LayerId> {
        self.args
            .values()
            .filter_map(|argument| argument.as_layer())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WorkflowReport {
    pub name: Option<String>,
    pub steps: Vec<WorkflowStep>,
}
