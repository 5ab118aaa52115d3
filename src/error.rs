use thiserror::Error;

pub type AxisResult<T> = Result<T, AxisError>;

#[derive(Debug, Error)]
pub enum AxisError {
    #[error("unsupported axis orientation `{0}` (expected left, right, top or bottom)")]
    InvalidOrientation(String),

    #[error("invalid axis configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid plot area: width={width}, height={height}")]
    InvalidPlotArea { width: f64, height: f64 },

    #[error("drawing surface error: {0}")]
    Backend(String),
}
