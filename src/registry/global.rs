use std::panic::Location;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::form::{FunctionInputs, FunctionOutput, FunctionSpec};
use crate::host::{Viewer, Widget, WidgetContext};

use super::{EntryArgs, EntryTarget, TargetOrigin, ToolsRegistry, WidgetSpec};

fn registry() -> &'static Mutex<ToolsRegistry> {
    static REGISTRY: OnceLock<Mutex<ToolsRegistry>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(ToolsRegistry::new()))
}

/// Runs `f` against the process-wide registry used by application wiring.
pub fn with_global_registry<R>(f: impl FnOnce(&mut ToolsRegistry) -> R) -> R {
    let mut guard = registry().lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

pub fn global_snapshot() -> ToolsRegistry {
    with_global_registry(|registry| registry.clone())
}

#[track_caller]
pub fn register_action<F>(path: &str, target: F) -> F
where
    F: Fn(&mut dyn Viewer) + Clone + Send + Sync + 'static,
{
    let origin = TargetOrigin::of::<F>(Location::caller());
    let stored = EntryTarget::Action(Arc::new(target.clone()));
    with_global_registry(|registry| registry.insert(path, stored, EntryArgs::default(), origin));
    target
}

#[track_caller]
pub fn register_function<F>(path: &str, target: F, spec: FunctionSpec, args: EntryArgs) -> F
where
    F: Fn(&FunctionInputs) -> crate::form::Result<Option<FunctionOutput>>
        + Clone
        + Send
        + Sync
        + 'static,
{
    let origin = TargetOrigin::of::<F>(Location::caller());
    let stored = EntryTarget::Function {
        target: Arc::new(target.clone()),
        spec: Arc::new(spec),
    };
    with_global_registry(|registry| registry.insert(path, stored, args, origin));
    target
}

#[track_caller]
pub fn register_dock_widget<F>(path: &str, factory: F, spec: WidgetSpec, args: EntryArgs) -> F
where
    F: Fn(WidgetContext) -> crate::host::Result<Box<dyn Widget>> + Clone + Send + Sync + 'static,
{
    let origin = TargetOrigin::of::<F>(Location::caller());
    let stored = EntryTarget::DockWidget {
        factory: Arc::new(factory.clone()),
        spec,
    };
    with_global_registry(|registry| registry.insert(path, stored, args, origin));
    factory
}
