//! Error types for the documentation generator.

use thiserror::Error;

/// Main error type for documentation runs.
#[derive(Error, Debug)]
pub enum DocgenError {
    /// Configuration error (invalid YAML, missing fields, unknown dialect, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Command-line usage error
    #[error("Usage error: {0}")]
    Usage(String),

    /// Catalog query failed (connection loss, malformed SQL, permission denied)
    #[error("{dialect} query failed while {context}: {message}")]
    Query {
        dialect: String,
        context: String,
        message: String,
    },

    /// Template document could not be read or is not a usable .docx
    #[error("Template {path}: {message}")]
    Template { path: String, message: String },

    /// Output document could not be written
    #[error("Output {path}: {message}")]
    Output { path: String, message: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Zip archive error while reading or writing a .docx
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl DocgenError {
    /// Create a Query error with the dialect and the step that failed.
    pub fn query(
        dialect: impl Into<String>,
        context: impl Into<String>,
        err: impl std::fmt::Display,
    ) -> Self {
        DocgenError::Query {
            dialect: dialect.into(),
            context: context.into(),
            message: err.to_string(),
        }
    }

    /// Create a Template error
    pub fn template(path: impl AsRef<std::path::Path>, message: impl std::fmt::Display) -> Self {
        DocgenError::Template {
            path: path.as_ref().display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create an Output error
    pub fn output(path: impl AsRef<std::path::Path>, message: impl std::fmt::Display) -> Self {
        DocgenError::Output {
            path: path.as_ref().display().to_string(),
            message: message.to_string(),
        }
    }

    /// Process exit code for this error category.
    pub fn exit_code(&self) -> u8 {
        match self {
            DocgenError::Config(_) | DocgenError::Usage(_) | DocgenError::Yaml(_) => 2,
            DocgenError::Query { .. } => 3,
            DocgenError::Template { .. }
            | DocgenError::Output { .. }
            | DocgenError::Io(_)
            | DocgenError::Zip(_) => 4,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for documentation operations.
pub type Result<T> = std::result::Result<T, DocgenError>;
