use crate::config::ConfigError;
use crate::form::FormError;
use crate::host::HostError;
use crate::menu::DispatchError;
use crate::model::ModelError;
use crate::workflow::WorkflowError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("host error: {0}")]
    Host(#[from] HostError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("form error: {0}")]
    Form(#[from] FormError),

    #[error("layer data error: {0}")]
    Model(#[from] ModelError),

    #[error("workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("{0}")]
    Usage(String),
}
