use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorkflowError>;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("workflow I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("workflow serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("workflow YAML serialization failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),
}
