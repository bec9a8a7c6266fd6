use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::LayerId;

/// A value bound to one form parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Argument {
    Layer(LayerId),
    Value(Value),
}

impl Argument {
    pub fn as_layer(&self) -> Option<LayerId> {
        match self {
            Self::Layer(id) => Some(*id),
            Self::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Layer(_) => None,
            Self::Value(value) => Some(value),
        }
    }
}

impl From<LayerId> for Argument {
    fn from(id: LayerId) -> Self {
        Self::Layer(id)
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

pub type FormArguments = BTreeMap<String, Argument>;
