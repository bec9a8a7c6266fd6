
use ndarray::{ArrayD, IxDyn};
use serde_json::json;

use crate::form::{FunctionInputs, FunctionOutput, FunctionSpec, ParamSpec};
use crate::host::{HostError, Viewer, ViewerRef, Widget, WidgetContext};
use crate::model::{LayerData, LayerProps};

pub const SAMPLE_LAYER: &str = "sample";

const SAMPLE_SHAPE: [usize; 2] = [64, 64];
const SAMPLE_BLOBS: [(f32, f32, f32); 3] = [(16.0, 16.0, 1.0), (40.0, 24.0, 0.8), (28.0, 48.0, 0.6)];

pub fn report_layers(viewer: &mut dyn Viewer) {
    let count = viewer.layers().len();
    tracing::info!(layers = count, "example action");
    println!("hello, the viewer has {count} layers");
}

pub fn example_function_spec() -> FunctionSpec {
    FunctionSpec::new("example_function").param(ParamSpec::float("sigma", 0.5))
}

pub fn example_function(inputs: &FunctionInputs) -> crate::form::Result<Option<FunctionOutput>> {
    let sigma = inputs.float_or("sigma", 0.5);
    println!("sigma {sigma}");
    Ok(Some(FunctionOutput::Value(json!(sigma))))
}

/// Button widget reporting the number of layers in its viewer.
#[derive(Debug)]
pub struct ExampleWidget {
    viewer: ViewerRef,
    clicks: usize,
}

impl ExampleWidget {
    pub fn new(context: WidgetContext) -> crate::host::Result<Self> {
        let viewer = context
            .viewer
            .ok_or_else(|| HostError::Widget("example widget needs the viewer".to_string()))?;
        Ok(Self { viewer, clicks: 0 })
    }

    pub fn clicks(&self) -> usize {
        self.clicks
    }

    pub fn layer_count(&self) -> crate::host::Result<usize> {
        self.viewer.with(|viewer| viewer.layers().len())
    }
}

impl Widget for ExampleWidget {
    fn describe(&self) -> String {
        "Click me!".to_string()
    }

    fn click(&mut self) -> Option<String> {
        self.clicks += 1;
        let message = match self.layer_count() {
            Ok(count) => format!("viewer has {count} layers"),
            Err(error) => error.to_string(),
        };
        tracing::info!(clicks = self.clicks, "{message}");
        Some(message)
    }
}

pub fn example_widget(context: WidgetContext) -> crate::host::Result<Box<dyn Widget>> {
    Ok(Box::new(ExampleWidget::new(context)?))
}

/// Synthetic 64x64 image with three Gaussian spots on a dim background.
pub fn sample_image() -> ArrayD<f32> {
    ArrayD::from_shape_fn(IxDyn(&SAMPLE_SHAPE), |index| {
        let (row, col) = (index[0] as f32, index[1] as f32);
        SAMPLE_BLOBS
            .iter()
            .map(|(center_row, center_col, peak)| {
                let distance = (row - center_row).powi(2) + (col - center_col).powi(2);
                peak * (-distance / (2.0 * 16.0)).exp()
            })
            .sum::<f32>()
            + 0.05
    })
}

pub fn add_sample_image(viewer: &mut dyn Viewer) {
    let id = viewer.add_layer(
        LayerData::Image(sample_image()),
        LayerProps {
            name: SAMPLE_LAYER.to_string(),
            ..LayerProps::default()
        },
    );
    tracing::info!(layer = %id, "added sample image");
}
