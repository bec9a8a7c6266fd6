use std::collections::HashMap;
use std::fmt::Write as _;
use std::panic::Location;
use std::sync::Arc;

use serde::Serialize;

use crate::form::{FunctionInputs, FunctionOutput, FunctionSpec};
use crate::host::{Viewer, Widget, WidgetContext};

use super::{EntryArgs, EntryKind, EntryTarget, RegisteredEntry, TargetOrigin, WidgetSpec};
use super::normalize_path;

/// One line group of the diagnostic listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegistryListing {
    pub path: String,
    pub kind: EntryKind,
    pub module: String,
    pub target: String,
    pub location: String,
}

#[derive(Debug, Clone, Default)]
pub struct ToolsRegistry {
    entries: HashMap<String, RegisteredEntry>,
}

impl ToolsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked with the viewer. Returns `target`.
    #[track_caller]
    pub fn register_action<F>(&mut self, path: &str, target: F) -> F
    where
        F: Fn(&mut dyn Viewer) + Clone + Send + Sync + 'static,
    {
        let origin = TargetOrigin::of::<F>(Location::caller());
        self.insert(
            path,
            EntryTarget::Action(Arc::new(target.clone())),
            EntryArgs::default(),
            origin,
        );
        target
    }

    /// Registers a function shown as a generated form. Returns `target`.
    #[track_caller]
    pub fn register_function<F>(
        &mut self,
        path: &str,
        target: F,
        spec: FunctionSpec,
        args: EntryArgs,
    ) -> F
    where
        F: Fn(&FunctionInputs) -> crate::form::Result<Option<FunctionOutput>>
            + Clone
            + Send
            + Sync
            + 'static,
    {
        let origin = TargetOrigin::of::<F>(Location::caller());
        self.insert(
            path,
            EntryTarget::Function {
                target: Arc::new(target.clone()),
                spec: Arc::new(spec),
            },
            args,
            origin,
        );
        target
    }

    /// Registers a widget factory whose product is docked. Returns `factory`.
    #[track_caller]
    pub fn register_dock_widget<F>(
        &mut self,
        path: &str,
        factory: F,
        spec: WidgetSpec,
        args: EntryArgs,
    ) -> F
    where
        F: Fn(WidgetContext) -> crate::host::Result<Box<dyn Widget>>
            + Clone
            + Send
            + Sync
            + 'static,
    {
        let origin = TargetOrigin::of::<F>(Location::caller());
        self.insert(
            path,
            EntryTarget::DockWidget {
                factory: Arc::new(factory.clone()),
                spec,
            },
            args,
            origin,
        );
        factory
    }

    pub(crate) fn insert(
        &mut self,
        path: &str,
        target: EntryTarget,
        args: EntryArgs,
        origin: TargetOrigin,
    ) {
        let key = normalize_path(path);
        let kind = target.kind();
        let entry = RegisteredEntry {
            target,
            args,
            origin,
        };
        if self.entries.insert(key.clone(), entry).is_some() {
            tracing::debug!(path = %key, ?kind, "replacing tools menu entry");
        } else {
            tracing::debug!(path = %key, ?kind, module = origin.module(), "registered tools menu entry");
        }
    }

    pub fn get(&self, path: &str) -> Option<&RegisteredEntry> {
        self.entries.get(&normalize_path(path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in menu display order (lexicographic by path).
    pub fn sorted_entries(&self) -> Vec<(&str, &RegisteredEntry)> {
        let mut entries = self
            .entries
            .iter()
            .map(|(path, entry)| (path.as_str(), entry))
            .collect::<Vec<_>>();
        entries.sort_by(|left, right| left.0.cmp(right.0));
        entries
    }

    pub fn list_registered(&self) -> Vec<RegistryListing> {
        self.sorted_entries()
            .into_iter()
            .map(|(path, entry)| RegistryListing {
                path: path.to_string(),
                kind: entry.kind(),
                module: entry.origin.module().to_string(),
                target: entry.origin.type_name.to_string(),
                location: format!(
                    "{}:{}",
                    entry.origin.location.file(),
                    entry.origin.location.line()
                ),
            })
            .collect()
    }

    pub fn listing_text(&self) -> String {
        let mut out = String::new();
        for listing in self.list_registered() {
            let _ = writeln!(out, "{}", listing.path);
            let _ = writeln!(out, "   {}", listing.module);
            let _ = writeln!(out, "   {} ({})", listing.target, listing.location);
        }
        out
    }
}
