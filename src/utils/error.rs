use thiserror::Error;

#[derive(Error, Debug)]
pub enum PokedexError {
    #[error("{record} does not conform: {message}")]
    Conformance { record: String, message: String },

    #[error("Invalid {record}.{field}: {message}")]
    ValidationError {
        record: String,
        field: String,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PokedexError {
    pub fn validation(
        record: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ValidationError {
            record: record.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Conformance { .. } | Self::ValidationError { .. } | Self::SerializationError(_) => {
                ErrorCategory::Data
            }
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } => ErrorSeverity::Medium,
            Self::Conformance { .. } | Self::SerializationError(_) => ErrorSeverity::High,
            _ => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Conformance { .. } => {
                "Check that the payload has exactly the expected fields with the expected types"
            }
            Self::ValidationError { .. } => "Fix the reported field values and check again",
            Self::SerializationError(_) => "Make sure the input is well-formed JSON",
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file and flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Conformance { record, .. } => format!("The input is not a valid {}", record),
            Self::ValidationError { record, field, .. } => {
                format!("The {} has an invalid '{}' value", record, field)
            }
            Self::IoError(e) => format!("Could not access a file: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PokedexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering_drives_exit_codes() {
        let validation = PokedexError::validation("favorite", "pokemon_name", "empty");
        let conformance = PokedexError::Conformance {
            record: "favorite".to_string(),
            message: "missing field `id`".to_string(),
        };
        let io = PokedexError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));

        assert_eq!(validation.severity(), ErrorSeverity::Medium);
        assert_eq!(conformance.severity(), ErrorSeverity::High);
        assert_eq!(io.severity(), ErrorSeverity::Critical);
        assert_eq!(io.category(), ErrorCategory::System);
    }

    #[test]
    fn test_messages() {
        let err = PokedexError::validation("favorite", "updated_at", "earlier than created_at");
        assert_eq!(
            err.to_string(),
            "Invalid favorite.updated_at: earlier than created_at"
        );
        assert_eq!(
            err.user_friendly_message(),
            "The favorite has an invalid 'updated_at' value"
        );
    }
}
