//! Entries shipped with the application. Each category exercises one entry
//! kind or one producible data kind.

mod filters;
mod util;
mod utilities;

#[cfg(test)]
mod tests;

use crate::registry::{EntryArgs, ToolsRegistry, WidgetSpec, with_global_registry};

pub use filters::{gaussian_blur, local_maxima, otsu_threshold, threshold_otsu};
pub use utilities::{ExampleWidget, SAMPLE_LAYER, add_sample_image, sample_image};

pub fn register_builtin(registry: &mut ToolsRegistry) {
    registry.register_action("Utilities > Action", utilities::report_layers);
    registry.register_function(
        "Utilities > Function",
        utilities::example_function,
        utilities::example_function_spec(),
        EntryArgs::new(),
    );
    registry.register_dock_widget(
        "Utilities > Widget",
        utilities::example_widget,
        WidgetSpec::with_viewer(),
        EntryArgs::new(),
    );
    registry.register_action("Utilities > Add sample image", utilities::add_sample_image);

    registry.register_function(
        "Filtering > Gaussian blur",
        filters::gaussian_blur_tool,
        filters::gaussian_blur_spec(),
        EntryArgs::new(),
    );
    registry.register_function(
        "Segmentation > Threshold (Otsu)",
        filters::threshold_otsu_tool,
        filters::threshold_otsu_spec(),
        EntryArgs::new(),
    );
    registry.register_function(
        "Measurement > Local maxima",
        filters::local_maxima_tool,
        filters::local_maxima_spec(),
        EntryArgs::new(),
    );
}

/// Adds the built-in entries to the process-wide registry.
pub fn register_builtin_globally() {
    with_global_registry(register_builtin);
}
