use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("config JSON failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("config YAML failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
