use std::collections::BTreeMap;

use ndarray::{Array2, ArrayD};
use serde_json::Value;

use crate::model::{DataKind, LayerData, LayerId, SurfaceMesh};

use super::{FormError, Result};

/// A layer argument copied out of the viewer for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct InputLayer {
    pub id: LayerId,
    pub name: String,
    pub data: LayerData,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Value(Value),
    Layer(InputLayer),
}

/// Resolved form values handed to a registered function.
#[derive(Debug, Clone, Default)]
pub struct FunctionInputs {
    values: BTreeMap<String, InputValue>,
    order: Vec<String>,
}

impl FunctionInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: InputValue) {
        let name = name.into();
        if self.values.insert(name.clone(), value).is_none() {
            self.order.push(name);
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: InputValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&InputValue> {
        self.values.get(name)
    }

    fn value(&self, name: &str) -> Option<&Value> {
        match self.values.get(name)? {
            InputValue::Value(value) => Some(value),
            InputValue::Layer(_) => None,
        }
    }

    pub fn float(&self, name: &str) -> Result<f64> {
        self.value(name)
            .and_then(Value::as_f64)
            .ok_or_else(|| FormError::invalid(name, "missing float parameter"))
    }

    pub fn float_or(&self, name: &str, default: f64) -> f64 {
        self.value(name).and_then(Value::as_f64).unwrap_or(default)
    }

    pub fn int_or(&self, name: &str, default: i64) -> i64 {
        self.value(name).and_then(Value::as_i64).unwrap_or(default)
    }

    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        self.value(name).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn text(&self, name: &str) -> Result<&str> {
        self.value(name)
            .and_then(Value::as_str)
            .ok_or_else(|| FormError::invalid(name, "missing text parameter"))
    }

    pub fn layer(&self, name: &str) -> Result<&InputLayer> {
        match self.values.get(name) {
            Some(InputValue::Layer(layer)) => Ok(layer),
            Some(InputValue::Value(_)) => Err(FormError::invalid(name, "expected a layer")),
            None => Err(FormError::MissingParameter(name.to_string())),
        }
    }

    pub fn image(&self, name: &str) -> Result<&ArrayD<f32>> {
        let layer = self.layer(name)?;
        match &layer.data {
            LayerData::Image(data) => Ok(data),
            other => Err(kind_error(name, DataKind::Image, other)),
        }
    }

    pub fn labels(&self, name: &str) -> Result<&ArrayD<u32>> {
        let layer = self.layer(name)?;
        match &layer.data {
            LayerData::Labels(data) => Ok(data),
            other => Err(kind_error(name, DataKind::Labels, other)),
        }
    }

    pub fn points(&self, name: &str) -> Result<&Array2<f64>> {
        let layer = self.layer(name)?;
        match &layer.data {
            LayerData::Points(data) => Ok(data),
            other => Err(kind_error(name, DataKind::Points, other)),
        }
    }

    pub fn surface(&self, name: &str) -> Result<&SurfaceMesh> {
        let layer = self.layer(name)?;
        match &layer.data {
            LayerData::Surface(mesh) => Ok(mesh),
            other => Err(kind_error(name, DataKind::Surface, other)),
        }
    }

    /// Layer arguments in parameter declaration order.
    pub fn layers(&self) -> impl Iterator<Item = &InputLayer> {
        self.order
            .iter()
            .filter_map(|name| match self.values.get(name) {
                Some(InputValue::Layer(layer)) => Some(layer),
                _ => None,
            })
    }
}

fn kind_error(name: &str, expected: DataKind, data: &LayerData) -> FormError {
    FormError::LayerKind {
        name: name.to_string(),
        expected,
        actual: data.kind(),
    }
}
