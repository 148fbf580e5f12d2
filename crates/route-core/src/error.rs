//! Error types for typed route generation.
//!
//! A single error hierarchy is shared by every library crate in the
//! workspace. The CLI wraps it with `anyhow` context at the boundary.
//!
//! # Examples
//!
//! ```
//! use route_core::{Error, Result};
//!
//! fn require_input(dir: &str) -> Result<()> {
//!     if dir.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "input directory cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_input("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

/// Main error type for typed route generation.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    ///
    /// Raised when configuration is invalid, missing required fields,
    /// or cannot be parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Resource not found error.
    #[error("Resource not found: {resource}")]
    ResourceNotFound {
        /// Identifier of the missing resource
        resource: String,
    },

    /// A route path declares the same dynamic segment name twice.
    #[error("Route '{route}' declares parameter '{name}' more than once")]
    DuplicateParam {
        /// Canonical route path containing the duplicate
        route: String,
        /// The repeated parameter name
        name: String,
    },

    /// A dynamic segment name contains characters the `:name` marker
    /// grammar cannot hold (e.g. `[post-id]`).
    #[error("Route file '{path}' has unsupported parameter name '{name}'")]
    InvalidParamName {
        /// Relative route file path
        path: String,
        /// The offending name as written
        name: String,
    },

    /// Code generation failed.
    ///
    /// Raised when template registration or rendering fails.
    #[error("Code generation failed: {message}")]
    GenerationError {
        /// Description of the generation failure
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Reading an input file failed.
    #[error("I/O error at {path}")]
    IoError {
        /// Path that could not be read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing an output artifact failed.
    ///
    /// Fatal for the current invocation. No partial file is left behind.
    #[error("Failed to write {path}")]
    WriteFailed {
        /// Destination path of the artifact
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "unknown dialect".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a resource not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Returns `true` if this is a duplicate parameter error.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_core::Error;
    ///
    /// let err = Error::DuplicateParam {
    ///     route: "/a/:id/b/:id".to_string(),
    ///     name: "id".to_string(),
    /// };
    /// assert!(err.is_duplicate_param());
    /// ```
    #[must_use]
    pub const fn is_duplicate_param(&self) -> bool {
        matches!(self, Self::DuplicateParam { .. })
    }

    /// Returns `true` if a dynamic segment name was rejected.
    #[must_use]
    pub const fn is_invalid_param_name(&self) -> bool {
        matches!(self, Self::InvalidParamName { .. })
    }

    /// Returns `true` if this is a code generation error.
    #[must_use]
    pub const fn is_generation_error(&self) -> bool {
        matches!(self, Self::GenerationError { .. })
    }

    /// Returns `true` if writing an output artifact failed.
    #[must_use]
    pub const fn is_write_failure(&self) -> bool {
        matches!(self, Self::WriteFailed { .. })
    }
}

/// Result type alias for route generation operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_detection() {
        let err = Error::ConfigError {
            message: "Invalid configuration".to_string(),
        };
        assert!(err.is_config_error());
        assert!(!err.is_write_failure());
    }

    #[test]
    fn test_duplicate_param_display() {
        let err = Error::DuplicateParam {
            route: "/users/:id/posts/:id".to_string(),
            name: "id".to_string(),
        };
        assert!(err.is_duplicate_param());
        let display = err.to_string();
        assert!(display.contains("/users/:id/posts/:id"));
        assert!(display.contains("'id'"));
    }

    #[test]
    fn test_invalid_param_name_display() {
        let err = Error::InvalidParamName {
            path: "blog/[post-id]".to_string(),
            name: "post-id".to_string(),
        };
        assert!(err.is_invalid_param_name());
        assert!(!err.is_duplicate_param());
        assert_eq!(
            err.to_string(),
            "Route file 'blog/[post-id]' has unsupported parameter name 'post-id'"
        );
    }

    #[test]
    fn test_write_failure_keeps_source() {
        use std::error::Error as _;

        let err = Error::WriteFailed {
            path: "src/routes.ts".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert!(err.is_write_failure());
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Failed to write src/routes.ts");
    }

    #[test]
    fn test_generation_error_detection() {
        let err = Error::GenerationError {
            message: "template missing".to_string(),
            source: None,
        };
        assert!(err.is_generation_error());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_result_alias() {
        fn returns_err() -> Result<i32> {
            Err(Error::InvalidArgument("bad".to_string()))
        }

        assert!(returns_err().is_err());
    }
}
