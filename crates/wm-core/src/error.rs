//! Error types for wm-core

use thiserror::Error;

/// Core error type for Waymark
#[derive(Error, Debug)]
pub enum CoreError {
    /// W001: Configuration file not found
    #[error("[W001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// W002: Failed to parse configuration file
    #[error("[W002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// W003: Invalid configuration value
    #[error("[W003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// W010: Version text does not match `YYYY-MM-DD-hh:mm:ss`
    #[error("[W010] Invalid migration version '{value}': expected YYYY-MM-DD-hh:mm:ss")]
    InvalidVersion { value: String },

    /// W011: Unknown migration direction token
    #[error("[W011] Invalid migration direction '{value}': expected 'up' or 'down'")]
    InvalidDirection { value: String },

    /// W012: Migration file name does not follow `<version>_<name>.<direction>.sql`
    #[error("[W012] Invalid migration file name '{file_name}': {reason}")]
    InvalidFileName { file_name: String, reason: String },

    /// W013: Descriptive migration name is empty or contains unsupported characters
    #[error("[W013] Invalid migration name '{value}': {reason}")]
    InvalidName { value: String, reason: String },

    /// W016: IO error with file path context
    #[error("[W016] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
