use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::model::{Argument, DataKind, LayerData, LayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Float,
    Int,
    Bool,
    Text,
    Layer(DataKind),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub kind: ParamKind,
    #[serde(default)]
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            required: false,
            kind,
            default: None,
        }
    }

    pub fn float(name: impl Into<String>, default: f64) -> Self {
        Self::new(name, ParamKind::Float).with_default(json!(default))
    }

    pub fn int(name: impl Into<String>, default: i64) -> Self {
        Self::new(name, ParamKind::Int).with_default(json!(default))
    }

    pub fn bool(name: impl Into<String>, default: bool) -> Self {
        Self::new(name, ParamKind::Bool).with_default(json!(default))
    }

    pub fn text(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Text).with_default(Value::String(default.into()))
    }

    /// A layer picker; layer inputs are always required.
    pub fn layer(name: impl Into<String>, kind: DataKind) -> Self {
        Self {
            required: true,
            ..Self::new(name, ParamKind::Layer(kind))
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn accepts(&self, argument: &Argument) -> bool {
        match (self.kind, argument) {
            (ParamKind::Layer(_), Argument::Layer(_)) => true,
            (ParamKind::Float, Argument::Value(value)) => value.is_number(),
            (ParamKind::Int, Argument::Value(value)) => value.is_i64() || value.is_u64(),
            (ParamKind::Bool, Argument::Value(value)) => value.is_boolean(),
            (ParamKind::Text, Argument::Value(value)) => value.is_string(),
            _ => false,
        }
    }

    /// Interprets a raw JSON value for this parameter; layer parameters take
    /// a layer id.
    pub fn coerce(&self, value: Value) -> Option<Argument> {
        let argument = match self.kind {
            ParamKind::Layer(_) => Argument::Layer(LayerId(value.as_u64()?)),
            _ => Argument::Value(value),
        };
        self.accepts(&argument).then_some(argument)
    }
}

/// Declared contract of a registered function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    /// Category of data the function returns, if it should become a layer.
    #[serde(default)]
    pub produces: Option<DataKind>,
}

impl FunctionSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            params: Vec::new(),
            produces: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a parameter, replacing any earlier one with the same name.
    pub fn param(mut self, param: ParamSpec) -> Self {
        match self
            .params
            .iter_mut()
            .find(|existing| existing.name == param.name)
        {
            Some(existing) => *existing = param,
            None => self.params.push(param),
        }
        self
    }

    pub fn produces(mut self, kind: DataKind) -> Self {
        self.produces = Some(kind);
        self
    }

    pub fn param_spec(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|param| param.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionOutput {
    Data(LayerData),
    Value(Value),
}

impl FunctionOutput {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Data(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<&LayerData> {
        match self {
            Self::Data(data) => Some(data),
            Self::Value(_) => None,
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Data(data) => format!("{} data", data.kind()),
            Self::Value(_) => "a plain value".to_string(),
        }
    }
}

impl From<LayerData> for FunctionOutput {
    fn from(data: LayerData) -> Self {
        Self::Data(data)
    }
}
