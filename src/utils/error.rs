use thiserror::Error;

#[derive(Error, Debug)]
pub enum TierError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Subscription configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TierError {
    pub fn configuration(message: impl Into<String>) -> Self {
        TierError::ConfigurationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TierError::IoError(_) => ErrorCategory::Io,
            TierError::SerializationError(_) => ErrorCategory::Data,
            TierError::ConfigurationError { .. }
            | TierError::ConfigValidationError { .. }
            | TierError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TierError::IoError(_) => ErrorSeverity::Critical,
            TierError::SerializationError(_) => ErrorSeverity::High,
            TierError::ConfigurationError { .. } => ErrorSeverity::High,
            TierError::ConfigValidationError { .. } => ErrorSeverity::High,
            TierError::InvalidConfigValueError { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TierError::IoError(_) => "Check that the file exists and is readable",
            TierError::SerializationError(_) => {
                "Check that the catalog snapshot is valid JSON produced by the billing sync"
            }
            TierError::ConfigurationError { .. } => {
                "Review the tier configuration and re-sync products and prices from the billing provider"
            }
            TierError::ConfigValidationError { .. } => {
                "Make sure the tier configuration is valid TOML with [billing] and [[tiers]] sections"
            }
            TierError::InvalidConfigValueError { .. } => {
                "Fix the highlighted value in the tier configuration"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TierError::IoError(e) => format!("Could not read input: {}", e),
            TierError::SerializationError(e) => format!("Could not parse catalog data: {}", e),
            TierError::ConfigurationError { message } => message.clone(),
            TierError::ConfigValidationError { field, message } => {
                format!("Invalid configuration ({}): {}", field, message)
            }
            TierError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid value for {}: {}", value, field, reason),
        }
    }
}

pub type Result<T> = std::result::Result<T, TierError>;
