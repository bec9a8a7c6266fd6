use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use serde_json::Value;

use crate::config::MenuConfig;
use crate::host::{Viewer, ViewerRef};
use crate::model::{Argument, DataKind, FormArguments, FormId, LayerData, LayerId, LayerProps};
use crate::registry::{EntryArgs, FunctionTarget};

use super::{
    FormError, FunctionInputs, FunctionOutput, FunctionSpec, InputLayer, InputValue, ParamKind,
    Result, align_scale, point_size,
};

pub type FormHandle = Rc<RefCell<FunctionForm>>;

/// A live form wrapping one registered function, bound to one viewer.
///
/// Results of the declared `produces` kind land in a layer tagged with this
/// form's id; later calls overwrite that same layer while it still exists.
pub struct FunctionForm {
    id: FormId,
    title: String,
    spec: Arc<FunctionSpec>,
    target: FunctionTarget,
    viewer: ViewerRef,
    values: FormArguments,
    options: EntryArgs,
    last_layer: Option<LayerId>,
    point_size_fraction: f64,
    dismissable: bool,
}

impl FunctionForm {
    pub fn new(
        title: impl Into<String>,
        spec: Arc<FunctionSpec>,
        target: FunctionTarget,
        viewer: ViewerRef,
        options: EntryArgs,
        config: &MenuConfig,
    ) -> Self {
        let mut values = FormArguments::new();
        for param in &spec.params {
            let named = options.named.get(&param.name).cloned().and_then(|value| {
                let argument = param.coerce(value);
                if argument.is_none() {
                    tracing::debug!(
                        function = %spec.name,
                        param = %param.name,
                        "ignoring registration argument that does not fit the parameter"
                    );
                }
                argument
            });
            let initial = named.or_else(|| {
                param
                    .default
                    .clone()
                    .and_then(|value| param.coerce(value))
            });
            if let Some(argument) = initial {
                values.insert(param.name.clone(), argument);
            }
        }
        preselect_layers(&spec, &viewer, &mut values);

        Self {
            id: FormId::next(),
            title: title.into(),
            spec,
            target,
            viewer,
            values,
            options,
            last_layer: None,
            point_size_fraction: config.point_size_fraction,
            dismissable: true,
        }
    }

    pub fn into_handle(self) -> FormHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> FormId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn spec(&self) -> &FunctionSpec {
        &self.spec
    }

    pub fn values(&self) -> &FormArguments {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&Argument> {
        self.values.get(name)
    }

    /// Stored registration arguments, kept as form options.
    pub fn options(&self) -> &EntryArgs {
        &self.options
    }

    pub fn last_layer(&self) -> Option<LayerId> {
        self.last_layer
    }

    /// Whether the form shows its own dismiss button. The host panel's close
    /// control is separate and unaffected.
    pub fn dismissable(&self) -> bool {
        self.dismissable
    }

    pub fn disable_dismiss(&mut self) {
        self.dismissable = false;
    }

    pub fn set(&mut self, name: &str, argument: Argument) -> Result<()> {
        let param = self
            .spec
            .param_spec(name)
            .ok_or_else(|| FormError::UnknownParameter(name.to_string()))?;
        if !param.accepts(&argument) {
            return Err(FormError::invalid(
                name,
                format!("{argument:?} does not fit a {:?} parameter", param.kind),
            ));
        }
        self.values.insert(name.to_string(), argument);
        Ok(())
    }

    pub fn set_json(&mut self, name: &str, value: Value) -> Result<()> {
        let param = self
            .spec
            .param_spec(name)
            .ok_or_else(|| FormError::UnknownParameter(name.to_string()))?;
        let argument = param.coerce(value.clone()).ok_or_else(|| {
            FormError::invalid(name, format!("{value} does not fit a {:?} parameter", param.kind))
        })?;
        self.values.insert(name.to_string(), argument);
        Ok(())
    }

    /// Runs the function with the current values.
    ///
    /// Returns the raw output for functions without a declared layer kind
    /// and `None` once a layer absorbed the result.
    pub fn call(&mut self) -> Result<Option<FunctionOutput>> {
        let inputs = self.viewer.with(|viewer| self.resolve_inputs(viewer))??;
        tracing::debug!(function = %self.spec.name, form = self.id.get(), "invoking generated form");

        let Some(output) = (self.target)(&inputs)? else {
            return Ok(None);
        };
        let Some(expected) = self.spec.produces else {
            return Ok(Some(output));
        };
        let data = match output {
            FunctionOutput::Data(data) if data.kind() == expected => data,
            other => {
                return Err(FormError::ReturnMismatch {
                    function: self.spec.name.clone(),
                    expected,
                    actual: other.describe(),
                });
            }
        };

        let viewer = self.viewer.clone();
        viewer.with_mut(|viewer| {
            let layer = self.absorb(viewer, data, &inputs);
            if let Some(tracker) = viewer.workflow_tracker() {
                tracker.update(layer, &self.spec.name, &self.values);
            }
        })?;
        Ok(None)
    }

    fn resolve_inputs(&self, viewer: &dyn Viewer) -> Result<FunctionInputs> {
        let mut inputs = FunctionInputs::new();
        for param in &self.spec.params {
            let value = match self.values.get(&param.name) {
                Some(Argument::Layer(id)) => {
                    let layer = viewer.layer(*id).ok_or(FormError::MissingLayer(*id))?;
                    if let ParamKind::Layer(expected) = param.kind {
                        if layer.kind() != expected {
                            return Err(FormError::LayerKind {
                                name: param.name.clone(),
                                expected,
                                actual: layer.kind(),
                            });
                        }
                    }
                    InputValue::Layer(InputLayer {
                        id: layer.id,
                        name: layer.name.clone(),
                        data: layer.data.clone(),
                        scale: layer.scale.clone(),
                    })
                }
                Some(Argument::Value(value)) => InputValue::Value(value.clone()),
                None if param.required => {
                    return Err(FormError::MissingParameter(param.name.clone()));
                }
                None => continue,
            };
            inputs.insert(param.name.clone(), value);
        }
        Ok(inputs)
    }

    fn absorb(
        &mut self,
        viewer: &mut dyn Viewer,
        data: LayerData,
        inputs: &FunctionInputs,
    ) -> LayerId {
        let name = format!("Result of {}", self.spec.name);
        let size = (data.kind() == DataKind::Points).then(|| {
            point_size(
                &viewer.display_extent(),
                &data.extent(),
                self.point_size_fraction,
            )
        });

        if let Some(id) = self.last_layer {
            if let Some(layer) = viewer.layer_mut(id) {
                if layer.origin == Some(self.id) {
                    layer.data = data;
                    layer.name = name;
                    if size.is_some() {
                        layer.point_size = size;
                    }
                    tracing::debug!(layer = %id, function = %self.spec.name, "updated result layer");
                    return id;
                }
            }
        }

        let scale = inputs
            .layers()
            .find(|source| source.data.kind() == data.kind())
            .map(|source| align_scale(&source.scale, data.ndim()));
        let id = viewer.add_layer(
            data,
            LayerProps {
                name,
                scale,
                point_size: size,
                origin: Some(self.id),
            },
        );
        tracing::info!(layer = %id, function = %self.spec.name, "added result layer");
        self.last_layer = Some(id);
        id
    }
}

/// Layer pickers start on the first viewer layer of the requested kind.
fn preselect_layers(spec: &FunctionSpec, viewer: &ViewerRef, values: &mut FormArguments) {
    for param in &spec.params {
        let ParamKind::Layer(kind) = param.kind else {
            continue;
        };
        if values.contains_key(&param.name) {
            continue;
        }
        let first = viewer.with(|viewer| {
            viewer
                .layers()
                .iter()
                .find(|layer| layer.kind() == kind)
                .map(|layer| layer.id)
        });
        if let Ok(Some(id)) = first {
            values.insert(param.name.clone(), Argument::Layer(id));
        }
    }
}

impl fmt::Debug for FunctionForm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FunctionForm")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("function", &self.spec.name)
            .field("values", &self.values)
            .field("last_layer", &self.last_layer)
            .finish_non_exhaustive()
    }
}
