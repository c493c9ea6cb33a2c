use crate::constants::exit_codes;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Ctrl-C, or Escape with no binding to handle it.
    #[error("Prompt cancelled.")]
    Cancelled,

    /// Unwinds a prompt into the survey's undo handling. Never leaves `Survey::run`.
    #[error("Go back requested outside of a survey.")]
    GoBack,

    /// Represents validation failures in user input or data
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// The prompter was built without an input or output stream, or a request
    /// cannot be rendered at all.
    #[error("Configuration error: {0}.")]
    ConfigurationError(String),

    #[error("Failed to parse JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YAMLParseError(#[from] serde_yaml::Error),

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("No survey file found in '{survey_dir}'. Tried: {config_files}.")]
    ConfigNotFound { survey_dir: String, config_files: String },

    #[error("Invalid survey definition: {0}.")]
    ConfigValidation(String),

    #[error("Unknown question '{0}'.")]
    UnknownQuestion(String),
}

impl Error {
    /// Whether the error is the user backing out of a prompt.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

/// Convenience type alias for Results with parley's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1, or 130
/// when the user cancelled a prompt.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    let code =
        if err.is_cancelled() { exit_codes::CANCELLED } else { exit_codes::FAILURE };
    std::process::exit(code);
}
