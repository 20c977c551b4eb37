use deepfake_detector_common::{DispatchError, ValidationError, WorkflowError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Input error: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] deepfake_detector_common::Error),
}

pub type Result<T> = std::result::Result<T, DetectorError>;
