use crate::form::FormError;
use crate::host::HostError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DispatchError>;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("host error: {0}")]
    Host(#[from] HostError),

    #[error("form error: {0}")]
    Form(#[from] FormError),
}
