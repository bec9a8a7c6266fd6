use std::collections::BTreeMap;

use crate::host::WorkflowTracker;
use crate::model::{FormArguments, LayerId};

use super::{WorkflowReport, WorkflowStep};

/// In-memory workflow tracker: remembers the latest step producing each layer.
#[derive(Debug, Clone, Default)]
pub struct WorkflowLog {
    steps: BTreeMap<LayerId, WorkflowStep>,
}

impl WorkflowLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self, layer: LayerId) -> Option<&WorkflowStep> {
        self.steps.get(&layer)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Layers used as inputs that no recorded step produced.
    pub fn roots(&self) -> Vec<LayerId> {
        let mut roots = self
            .steps
            .values()
            .flat_map(WorkflowStep::sources)
            .filter(|layer| !self.steps.contains_key(layer))
            .collect::<Vec<_>>();
        roots.sort();
        roots.dedup();
        roots
    }

    pub fn report(&self, name: Option<String>) -> WorkflowReport {
        WorkflowReport {
            name,
            steps: self.steps.values().cloned().collect(),
        }
    }
}

impl WorkflowTracker for WorkflowLog {
    fn update(&mut self, layer: LayerId, function: &str, args: &FormArguments) {
        tracing::debug!(layer = %layer, function = function, "workflow step recorded");
        self.steps.insert(
            layer,
            WorkflowStep {
                layer,
                function: function.to_string(),
                args: args.clone(),
            },
        );
    }
}
