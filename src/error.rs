use thiserror::Error;

/// Top-level error type for wall detection.
#[derive(Debug, Error)]
pub enum WallsenseError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Statistics(#[from] StatisticsError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("no points supplied")]
    EmptyInput,

    #[error("non-finite coordinate in point {index}")]
    NonFinite { index: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the normality test.
#[derive(Debug, Error)]
pub enum StatisticsError {
    #[error("significance level {0} is outside (0, 1)")]
    InvalidSignificanceLevel(f64),
}

/// Errors related to loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Convenience type alias for results using [`WallsenseError`].
pub type Result<T> = std::result::Result<T, WallsenseError>;
