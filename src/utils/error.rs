use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Invalid pattern for section '{section}': {source}")]
    PatternError {
        section: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration parse error in {field}: {message}")]
    ConfigParseError { field: String, message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

impl SplitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SplitError::InputNotFound { .. } => ErrorCategory::Input,
            SplitError::IoError(_) => ErrorCategory::System,
            SplitError::PatternError { .. }
            | SplitError::ConfigParseError { .. }
            | SplitError::InvalidConfigValueError { .. }
            | SplitError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SplitError::InputNotFound { path } => format!("Error: {} not found", path),
            SplitError::IoError(e) => format!("File system error: {}", e),
            SplitError::PatternError { section, .. } => {
                format!("Section '{}' has an invalid search pattern", section)
            }
            SplitError::ConfigParseError { field, .. } => {
                format!("Could not read configuration ({})", field)
            }
            SplitError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            SplitError::MissingConfigError { field } => {
                format!("Missing setting: {}", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Run the tool from the directory containing the source file or pass --input",
            ErrorCategory::Configuration => "Check the TOML file and command line flags",
            ErrorCategory::System => "Check file permissions and free disk space in the output directory",
        }
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;
