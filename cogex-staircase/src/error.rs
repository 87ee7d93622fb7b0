use thiserror::Error;

/// Rejected staircase parameters. Raised at construction only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("step_sizes must contain at least one step")]
    EmptyStepSizes,

    #[error("step size #{index} ({value}) must be a finite positive number")]
    InvalidStepSize { index: usize, value: f64 },

    #[error("{field} ({value}) must be a finite number")]
    NonFinite { field: &'static str, value: f64 },

    #[error("min_value ({min}) cannot be greater than max_value ({max})")]
    InvertedBounds { min: f64, max: f64 },

    #[error("start_value ({start}) lies outside [{min}, {max}]")]
    StartOutOfRange { start: f64, min: f64, max: f64 },

    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },
}
