use cogex_staircase::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExperimentError {
    #[error("invalid staircase configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to read config file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("observer failed: {0}")]
    Observer(String),

    #[error("failed to write results: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}
