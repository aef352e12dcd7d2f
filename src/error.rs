//! Custom error types for anime-earth.
//!
//! Navigation failures get their own small enum so callers can match on them
//! without pulling in the rest of the application errors.

use std::error::Error;
use std::fmt;
use std::io;

/// Errors raised by the view registry and navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// No view is registered under this identifier
    UnknownView(String),
    /// A view with this identifier was already registered
    DuplicateView(String),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::UnknownView(id) => write!(f, "Unknown view: '{}'", id),
            NavigationError::DuplicateView(id) => write!(f, "Duplicate view: '{}'", id),
        }
    }
}

impl Error for NavigationError {}

/// Application error types.
#[derive(Debug)]
pub enum AppError {
    /// Configuration errors
    Config(String),
    /// File I/O errors
    Io(io::Error),
    /// View registration or navigation errors
    Navigation(NavigationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::Io(err) => write!(f, "I/O error: {}", err),
            AppError::Navigation(err) => write!(f, "Navigation error: {}", err),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Io(err) => Some(err),
            AppError::Navigation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<NavigationError> for AppError {
    fn from(err: NavigationError) -> Self {
        AppError::Navigation(err)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
