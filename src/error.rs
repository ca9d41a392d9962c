//! Error handling for create-native-module.
//! Defines the error type and result alias used throughout the application.

use std::io;
use thiserror::Error;

/// Errors that can occur while scaffolding a module.
///
/// Every step of the pipeline returns this type; the first error aborts the run.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Errors raised by the template engine while parsing or rendering
    #[error("Template error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors in template acquisition or processing
    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Template directory does not exist: {template_dir}")]
    TemplateDoesNotExistError { template_dir: String },

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Represents validation failures in user input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Invalid ignore pattern
    #[error("Ignore pattern error: {0}")]
    GlobSetError(#[from] globset::Error),

    #[error("Failed to walk template directory: {0}")]
    WalkDirError(#[from] walkdir::Error),

    /// Transport level failures talking to the package registry
    #[error("HTTP error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    /// The registry answered, but not with what we need
    #[error("Registry error: {0}")]
    RegistryError(String),

    /// An external command (package manager, example generator) failed
    #[error("Command `{command}` failed with {status}")]
    CommandError { command: String, status: std::process::ExitStatus },

    /// The user interrupted a prompt or declined to continue
    #[error("Operation cancelled")]
    Cancelled,
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit status for an error: 0 for cancellation, 1 otherwise.
pub fn exit_code(err: &Error) -> i32 {
    match err {
        Error::Cancelled => 0,
        _ => 1,
    }
}

/// Default error handler that prints the error and exits the program.
///
/// Cancellation is not a failure: it prints a notice instead of the error.
/// The exit status comes from [`exit_code`].
pub fn default_error_handler(err: Error) {
    match &err {
        Error::Cancelled => println!("Cancelled."),
        err => eprintln!("{err}"),
    }
    std::process::exit(exit_code(&err));
}
