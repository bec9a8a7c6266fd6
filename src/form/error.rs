use crate::host::HostError;
use crate::model::{DataKind, LayerId, ModelError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormError>;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("missing required parameter `{0}`")]
    MissingParameter(String),

    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    #[error("invalid value for parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("layer {0} is not present in the viewer")]
    MissingLayer(LayerId),

    #[error("parameter `{name}` expects a {expected} layer but got {actual}")]
    LayerKind {
        name: String,
        expected: DataKind,
        actual: DataKind,
    },

    #[error("`{function}` declares {expected} output but returned {actual}")]
    ReturnMismatch {
        function: String,
        expected: DataKind,
        actual: String,
    },

    #[error("function failed: {0}")]
    Failed(String),

    #[error("host error: {0}")]
    Host(#[from] HostError),

    #[error("layer data error: {0}")]
    Model(#[from] ModelError),
}

impl FormError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
