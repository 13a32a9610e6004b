use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewStateError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Logging error: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, ViewStateError>;

// Helper conversions
impl From<config::ConfigError> for ViewStateError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<serde_json::Error> for ViewStateError {
    fn from(e: serde_json::Error) -> Self { Self::Json(e.to_string()) }
}
