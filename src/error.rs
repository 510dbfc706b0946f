// file: src/error.rs
// version: 1.0.0
// guid: 7b2e4f91-c5d8-4a36-9e02-d14a8c6b5e77

use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, HardenError>;

/// Error types for the hardening agent
#[derive(Error, Debug)]
pub enum HardenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient privileges: {0}")]
    Privilege(String),

    #[error("Command '{command}' failed{}: {stderr}",
        .exit_code.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    Process {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Service error: {0}")]
    Service(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HardenError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new privilege error
    pub fn privilege(msg: impl Into<String>) -> Self {
        Self::Privilege(msg.into())
    }

    /// Create a new service error
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_error_display_with_exit_code() {
        let err = HardenError::Process {
            command: "ufw enable".to_string(),
            exit_code: Some(1),
            stderr: "permission denied".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ufw enable"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_process_error_display_without_exit_code() {
        let err = HardenError::Process {
            command: "apt-get update".to_string(),
            exit_code: None,
            stderr: "killed by signal".to_string(),
        };
        assert!(!err.to_string().contains("exit code"));
    }

    #[test]
    fn test_helper_constructors() {
        assert!(matches!(HardenError::config("x"), HardenError::Config(_)));
        assert!(matches!(HardenError::validation("x"), HardenError::Validation(_)));
        assert!(matches!(HardenError::privilege("x"), HardenError::Privilege(_)));
        assert!(matches!(HardenError::service("x"), HardenError::Service(_)));
    }
}
