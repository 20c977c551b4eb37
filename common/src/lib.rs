//! Deepfake Detector Common Library
//!
//! CLIとWeb(WASM)で共有される型とワークフロー

pub mod types;
pub mod error;
pub mod intake;
pub mod request;
pub mod response;
pub mod render;
pub mod busy;
pub mod workflow;

pub use types::{AnalysisResult, ContactMessage, ContactOutcome, DetectionMethod, UploadState};
pub use error::{format_size_limit, DispatchError, Error, Result, ValidationError, WorkflowError};
pub use intake::{
    decode_data_uri, encode_data_uri, select_file, validate_metadata, IntakeLimits, SelectedFile,
};
pub use request::{prepare_analysis, AnalysisRequest, ApiConfig, Prepared};
pub use response::{interpret_analysis_response, interpret_contact_response, transport_failure};
pub use render::{render, PanelKind, ResultView, SourceLabels};
pub use busy::{BusyFlag, BusyGuard};
pub use workflow::{Phase, Workflow};
