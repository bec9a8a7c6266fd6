use thiserror::Error;

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("viewer is no longer available")]
    ViewerClosed,

    #[error("viewer is busy handling another request")]
    ViewerBusy,

    #[error("dock widget rejected: {0}")]
    DockRejected(String),

    #[error("no menu item at `{0}`")]
    UnknownMenuItem(String),

    #[error("widget construction failed: {0}")]
    Widget(String),
}
