use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Missing API credential: environment variable {var} is not set")]
    MissingCredential { var: String },

    #[error("Provider rejected the credential (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Provider response contained no choices")]
    EmptyChoices,

    #[error("Malformed provider response: {message}")]
    MalformedResponse { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
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
    Configuration,
    Transport,
    Provider,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::MissingCredential { .. }
            | PlannerError::Authentication { .. }
            | PlannerError::ConfigError { .. }
            | PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PlannerError::Transport(_) => ErrorCategory::Transport,
            PlannerError::Provider { .. }
            | PlannerError::EmptyChoices
            | PlannerError::MalformedResponse { .. } => ErrorCategory::Provider,
            PlannerError::IoError(_) | PlannerError::SerializationError(_) => {
                ErrorCategory::Input
            }
        }
    }

    /// Transport failures and throttling may succeed on a later run; bad
    /// configuration will not.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PlannerError::Transport(_) => ErrorSeverity::Medium,
            PlannerError::Provider { status, .. } if *status == 429 || *status >= 500 => {
                ErrorSeverity::Medium
            }
            PlannerError::Provider { .. }
            | PlannerError::EmptyChoices
            | PlannerError::MalformedResponse { .. }
            | PlannerError::IoError(_)
            | PlannerError::SerializationError(_) => ErrorSeverity::High,
            _ => ErrorSeverity::Critical,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::MissingCredential { var } => {
                format!("No API key found in {var}")
            }
            PlannerError::Authentication { .. } => {
                "The completion provider rejected the API key".to_string()
            }
            PlannerError::Transport(_) => "Could not reach the completion provider".to_string(),
            PlannerError::Provider { status, message } => {
                format!("The completion provider returned an error ({status}): {message}")
            }
            PlannerError::EmptyChoices | PlannerError::MalformedResponse { .. } => {
                "The completion provider returned no usable plan".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Set API_KEY (or the configured api_key_env) in the environment or a .env file and check the configuration values"
            }
            ErrorCategory::Transport => "Check network connectivity and the api_base URL, then run again",
            ErrorCategory::Provider => {
                "Check the model name and account limits with the provider, then run again"
            }
            ErrorCategory::Input => "Check that the config and profile files exist and are valid TOML",
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
