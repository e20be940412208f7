//! CLI-specific error types and mappings.
//!
//! Maps core errors to exit codes and user-facing messages.

use thiserror::Error;

use mcpm_core::ports::{ProcessError, RegistryError};
use mcpm_core::services::{LifecycleError, RegistryServiceError};

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument or input validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Record not found.
    #[error("{0}")]
    NotFound(String),

    /// Registry/config file error.
    #[error("Registry error: {0}")]
    Registry(String),

    /// Process launch/signal error.
    #[error("Process error: {0}")]
    Process(String),

    /// The operation completed but verification failed.
    #[error("{0}")]
    Unverified(String),

    /// IO error (stdin prompt, terminal).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Specific categories (see sysexits.h)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) | Self::Unverified(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Registry(_) => 78, // EX_CONFIG
            Self::Process(_) => 71,  // EX_OSERR
            Self::Io(_) => 74,       // EX_IOERR
        }
    }
}

impl From<RegistryServiceError> for CliError {
    fn from(err: RegistryServiceError) -> Self {
        match err {
            RegistryServiceError::Validation(msg) => Self::Arguments(msg),
            RegistryServiceError::Duplicate(id) => {
                Self::Arguments(format!("server already exists: {id}"))
            }
            RegistryServiceError::NotFound(id) => Self::NotFound(format!("server not found: {id}")),
            RegistryServiceError::Store(e) => e.into(),
        }
    }
}

impl From<LifecycleError> for CliError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::Process(e) => Self::Process(e.to_string()),
            LifecycleError::StartUnverified(name) => {
                Self::Unverified(format!("could not verify that server '{name}' started"))
            }
            LifecycleError::Store(e) => e.into(),
        }
    }
}

impl From<RegistryError> for CliError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => Self::NotFound(format!("server not found: {id}")),
            other => Self::Registry(other.to_string()),
        }
    }
}

impl From<ProcessError> for CliError {
    fn from(err: ProcessError) -> Self {
        Self::Process(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_sysexits() {
        assert_eq!(CliError::Arguments("x".into()).exit_code(), 2);
        assert_eq!(CliError::Registry("x".into()).exit_code(), 78);
        assert_eq!(CliError::Process("x".into()).exit_code(), 71);
        assert_eq!(CliError::NotFound("x".into()).exit_code(), 1);
    }

    #[test]
    fn prompt_io_failure_maps_to_ex_ioerr() {
        let err = CliError::from(std::io::Error::other("stdin closed"));
        assert_eq!(err.exit_code(), 74);
    }

    #[test]
    fn duplicate_maps_to_usage_error() {
        let err: CliError = RegistryServiceError::Duplicate("srv".into()).into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unverified_start_is_a_plain_failure() {
        let err: CliError = LifecycleError::StartUnverified("srv".into()).into();
        assert_eq!(err.exit_code(), 1);
    }
}
