use crate::app::View;
use std::path::PathBuf;
use thiserror::Error;

/// The only message shown to the user when an analysis fails
pub const ANALYSIS_FAILURE_NOTICE: &str =
    "AI analysis failed. Please check your API key and try again.";

/// Main error type for ReviewIQ
#[derive(Error, Debug)]
pub enum ReviewIqError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid configuration value
    #[error("Invalid configuration value at {path}: {message}")]
    InvalidConfigValue { path: String, message: String },

    /// Input rejected before any external call was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The external analysis call failed as a whole
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisFailure),

    /// A view was requested that is not reachable in the current state
    #[error("View '{0}' is not available until an analysis exists")]
    ViewUnavailable(View),

    /// History record not found
    #[error("History record not found: {id}")]
    HistoryNotFound { id: String },

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// JSON errors
    #[error("JSON error: {context}: {source}")]
    Json {
        source: serde_json::Error,
        context: String,
    },

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReviewIqError {
    /// Whether this error came from the external analysis call
    pub fn is_analysis_failure(&self) -> bool {
        matches!(self, ReviewIqError::Analysis(_))
    }

    /// Line printed on stderr before exiting. Analysis failures never show
    /// their cause here; it is logged where the submission fails.
    pub fn user_message(&self) -> String {
        if self.is_analysis_failure() {
            ANALYSIS_FAILURE_NOTICE.to_string()
        } else {
            format!("Error: {}", self)
        }
    }
}

/// Cause of a failed analysis call.
///
/// Every variant is terminal for the submission that produced it; the cause
/// is kept for logging and for the retry decision only.
#[derive(Error, Debug)]
pub enum AnalysisFailure {
    /// Network level failure (DNS, connect, reset)
    #[error("transport error: {0}")]
    Transport(String),

    /// The attempt exceeded the configured timeout
    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Non-success HTTP status from the model endpoint
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// API key environment variable missing or empty
    #[error("API key not configured (set {env_var})")]
    MissingApiKey { env_var: String },

    /// The endpoint answered but returned no candidate text
    #[error("model returned no content")]
    EmptyResponse,

    /// Reply text was not a valid analysis document
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// `individualAnalysis` indices do not cover the input exactly once
    #[error("individual analysis does not match input: {0}")]
    IndexMismatch(String),
}

impl AnalysisFailure {
    /// Whether another attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            AnalysisFailure::Transport(_) | AnalysisFailure::Timeout { .. } => true,
            AnalysisFailure::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the configuration key that failed validation
    pub path: String,
    /// Error message describing the validation failure
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for ReviewIQ operations
pub type Result<T> = std::result::Result<T, ReviewIqError>;
