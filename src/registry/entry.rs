use std::collections::BTreeMap;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::form::{FunctionInputs, FunctionOutput, FunctionSpec};
use crate::host::{Viewer, Widget, WidgetContext};

pub type ActionTarget = Arc<dyn Fn(&mut dyn Viewer) + Send + Sync>;

pub type FunctionTarget =
    Arc<dyn Fn(&FunctionInputs) -> crate::form::Result<Option<FunctionOutput>> + Send + Sync>;

pub type WidgetFactory =
    Arc<dyn Fn(WidgetContext) -> crate::host::Result<Box<dyn Widget>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Action,
    Function,
    DockWidget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WidgetSpec {
    /// Hand the live viewer to the factory.
    pub needs_viewer: bool,
}

impl WidgetSpec {
    pub fn with_viewer() -> Self {
        Self { needs_viewer: true }
    }
}

/// Opaque arguments stored alongside an entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntryArgs {
    #[serde(default)]
    pub positional: Vec<Value>,
    #[serde(default)]
    pub named: BTreeMap<String, Value>,
}

impl EntryArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

#[derive(Clone)]
pub enum EntryTarget {
    Action(ActionTarget),
    Function {
        target: FunctionTarget,
        spec: Arc<FunctionSpec>,
    },
    DockWidget {
        factory: WidgetFactory,
        spec: WidgetSpec,
    },
}

impl EntryTarget {
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Action(_) => EntryKind::Action,
            Self::Function { .. } => EntryKind::Function,
            Self::DockWidget { .. } => EntryKind::DockWidget,
        }
    }
}

/// Where a registered target was defined.
#[derive(Debug, Clone, Copy)]
pub struct TargetOrigin {
    pub type_name: &'static str,
    pub location: &'static Location<'static>,
}

impl TargetOrigin {
    pub fn of<T>(location: &'static Location<'static>) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            location,
        }
    }

    /// Module path owning the target: the type path without its item name
    /// and without any `{{closure}}` segments.
    pub fn module(&self) -> &'static str {
        let mut path = self.type_name;
        while let Some(stripped) = path.strip_suffix("::{{closure}}") {
            path = stripped;
        }
        match path.rfind("::") {
            Some(index) => &path[..index],
            None => path,
        }
    }
}

impl fmt::Display for TargetOrigin {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} ({}:{})",
            self.type_name,
            self.location.file(),
            self.location.line()
        )
    }
}

#[derive(Clone)]
pub struct RegisteredEntry {
    pub target: EntryTarget,
    pub args: EntryArgs,
    pub origin: TargetOrigin,
}

impl RegisteredEntry {
    pub fn kind(&self) -> EntryKind {
        self.target.kind()
    }
}

impl fmt::Debug for RegisteredEntry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegisteredEntry")
            .field("kind", &self.kind())
            .field("args", &self.args)
            .field("origin", &self.origin)
            .finish()
    }
}
