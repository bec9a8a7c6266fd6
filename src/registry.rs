//! Menu path → entry bookkeeping filled in by plugins at load time.

mod entry;
mod global;
mod path;
mod store;


pub use entry::{
    ActionTarget, EntryArgs, EntryKind, EntryTarget, FunctionTarget, RegisteredEntry,
    TargetOrigin, WidgetFactory, WidgetSpec,
};
pub use global::{
    global_snapshot, register_action, register_dock_widget, register_function,
    with_global_registry,
};
pub use path::{MENU_SEPARATOR, normalize_path, segment_count, split_path};
pub use store::{RegistryListing, ToolsRegistry};
