use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to fetch data from Gist: {status_text}")]
    GistStatusError { status: u16, status_text: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Template rendering error: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl SiteError {
    /// Short message suitable for printing to a terminal.
    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::HttpError(e) if e.is_timeout() => {
                "The content host did not answer in time".to_string()
            }
            SiteError::HttpError(_) => "Could not reach the content host".to_string(),
            SiteError::GistStatusError { status, status_text } => {
                format!("The content host answered {} {}", status, status_text)
            }
            SiteError::SerializationError(_) => {
                "The content host returned data that is not valid JSON for this section".to_string()
            }
            SiteError::IoError(e) => format!("File system error: {}", e),
            SiteError::TemplateError(_) => "A page could not be rendered".to_string(),
            SiteError::ConfigError { .. }
            | SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. } => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SiteError::HttpError(_) => "Check network access and the configured gist URLs",
            SiteError::GistStatusError { .. } => {
                "Check that the gist URL points at the raw JSON file and is public"
            }
            SiteError::SerializationError(_) => {
                "Compare the gist JSON with the expected section shape"
            }
            SiteError::IoError(_) => "Check file paths and permissions",
            SiteError::TemplateError(_) => "Inspect the server log for the failing template",
            SiteError::ConfigError { .. }
            | SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. } => {
                "Review the command line flags, the TOML file and the environment"
            }
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SiteError::ConfigError { .. }
                | SiteError::ConfigValidationError { .. }
                | SiteError::InvalidConfigValueError { .. }
                | SiteError::MissingConfigError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
