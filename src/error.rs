use std::fmt;

/// Result type alias for parsing and mutation operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while parsing manifests or mutating INI files
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The caller handed the parser an unusable body (e.g. empty text)
    InvalidInput { message: String },

    /// Parse error from pest
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    /// File or directory I/O error, wrapping the original OS message
    IoError { path: String, message: String },

    /// The pre-write backup copy failed; the mutation write was not attempted
    BackupFailed { path: String, message: String },

    /// A typed accessor did not find the field it expected in a parsed tree
    MissingField { path: String },
}

impl ConfigError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ConfigError::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        ConfigError::ParseError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a backup failure error
    pub fn backup(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::BackupFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(path: impl Into<String>) -> Self {
        ConfigError::MissingField { path: path.into() }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            ConfigError::ParseError {
                line,
                column,
                message,
            } => {
                write!(
                    f,
                    "Parse error at line {}, column {}: {}",
                    line, column, message
                )
            }
            ConfigError::IoError { path, message } => {
                write!(f, "I/O error for '{}': {}", path, message)
            }
            ConfigError::BackupFailed { path, message } => {
                write!(f, "Backup to '{}' failed, write aborted: {}", path, message)
            }
            ConfigError::MissingField { path } => {
                write!(f, "Field '{}' not found in parsed manifest", path)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError {
            path: String::new(),
            message: err.to_string(),
        }
    }
}

impl<R: pest::RuleType> From<pest::error::Error<R>> for ConfigError {
    fn from(err: pest::error::Error<R>) -> Self {
        let (line, column) = match err.line_col {
            pest::error::LineColLocation::Pos((line, col)) => (line, col),
            pest::error::LineColLocation::Span((line, col), _) => (line, col),
        };

        ConfigError::ParseError {
            line,
            column,
            message: err.variant.to_string(),
        }
    }
}
