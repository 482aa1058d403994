use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColdMailError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Catalog source unavailable: {message}")]
    SourceUnavailable { message: String },

    #[error("LLM request failed: {message}")]
    LlmError { message: String },

    #[error("Context too big. Unable to parse jobs: {message}")]
    ExtractionParseError { message: String },

    #[error("No job details could be extracted from {url}")]
    NoJobsExtracted { url: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Parsing,
    Configuration,
    Llm,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ColdMailError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ColdMailError::HttpError(_) => ErrorCategory::Network,
            ColdMailError::IoError(_) | ColdMailError::SourceUnavailable { .. } => {
                ErrorCategory::Io
            }
            ColdMailError::CsvError(_)
            | ColdMailError::SerializationError(_)
            | ColdMailError::ExtractionParseError { .. } => ErrorCategory::Parsing,
            ColdMailError::ConfigError { .. }
            | ColdMailError::MissingConfigError { .. }
            | ColdMailError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ColdMailError::LlmError { .. } | ColdMailError::NoJobsExtracted { .. } => {
                ErrorCategory::Llm
            }
            ColdMailError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ColdMailError::SourceUnavailable { .. } => ErrorSeverity::Low,
            ColdMailError::HttpError(_)
            | ColdMailError::LlmError { .. }
            | ColdMailError::NoJobsExtracted { .. } => ErrorSeverity::Medium,
            ColdMailError::CsvError(_)
            | ColdMailError::SerializationError(_)
            | ColdMailError::ExtractionParseError { .. }
            | ColdMailError::ValidationError { .. } => ErrorSeverity::High,
            ColdMailError::IoError(_)
            | ColdMailError::ConfigError { .. }
            | ColdMailError::MissingConfigError { .. }
            | ColdMailError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ColdMailError::HttpError(e) if e.is_timeout() => {
                "The request timed out while loading the job posting.".to_string()
            }
            ColdMailError::HttpError(_) => {
                "Could not load the job posting or reach the language model.".to_string()
            }
            ColdMailError::NoJobsExtracted { .. } => {
                "No job details could be extracted from the URL.".to_string()
            }
            ColdMailError::ExtractionParseError { .. } => {
                "The job posting is too large or the model reply was not valid JSON.".to_string()
            }
            ColdMailError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing.", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the URL and your network connection, then try again.",
            ErrorCategory::Io => "Check that the file exists and is readable.",
            ErrorCategory::Parsing => "Try a page with a single job posting or less content.",
            ErrorCategory::Configuration => {
                "Set GROQ_API_KEY or fix the configuration file and try again."
            }
            ErrorCategory::Llm => "Check the URL and try again. If the problem persists, contact support.",
            ErrorCategory::Validation => "Correct the input values and try again.",
        }
    }
}

pub type Result<T> = std::result::Result<T, ColdMailError>;
