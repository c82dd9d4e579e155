// Client errors
//
// `ApiError` is what every request returns on failure. The variants fall into
// two kinds: transport (nothing usable came back) and HTTP status (a response
// arrived but outside the 2xx range). The remaining helpers format
// configuration problems into actionable messages for the CLI.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Coarse classification of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, unreadable body, or body that is not JSON
    Transport,
    /// Response received with a non-success status code
    HttpStatus,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response from {url} (status {status}) is not valid JSON: {source}")]
    Decode {
        url: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP error! status: {status}")]
    HttpStatus {
        url: String,
        status: u16,
        /// Parsed response body, when it was valid JSON
        body: Option<Value>,
    },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::HttpStatus { .. } => ErrorKind::HttpStatus,
            ApiError::Client(_)
            | ApiError::Encode(_)
            | ApiError::Transport { .. }
            | ApiError::Decode { .. } => ErrorKind::Transport,
        }
    }

    /// Status code of the response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } | ApiError::Decode { status, .. } => Some(*status),
            ApiError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// URL the failing request was sent to
    pub fn url(&self) -> Option<&str> {
        match self {
            ApiError::Transport { url, .. }
            | ApiError::Decode { url, .. }
            | ApiError::HttpStatus { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Messages of this error and every error in its source chain, outermost first
    pub fn chain(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            messages.push(err.to_string());
            source = err.source();
        }
        messages
    }
}

/// Format a missing-configuration error with setup instructions
pub fn config_missing_error(config_path: impl fmt::Display, env_var: &str) -> String {
    format!(
        "No API base URL configured\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Create a config file at {}:\n\
           \x1b[36mapi_base_url = \"http://localhost:8080\"\x1b[0m\n\n\
        2. Or set the environment variable (it wins over the file):\n\
           \x1b[36mexport {}=\"http://localhost:8080\"\x1b[0m\n\n\
        3. Or pass it on the command line:\n\
           \x1b[36mdhclient --base-url http://localhost:8080 tasks\x1b[0m",
        config_path, env_var
    )
}

/// Format a config parse error with helpful suggestions
pub fn config_parse_error(config_path: impl fmt::Display, error: &str) -> String {
    format!(
        "Failed to parse config file {}\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check the file only contains TOML key/value pairs:\n\
           \x1b[36mapi_base_url = \"http://localhost:8080\"\x1b[0m\n\
           \x1b[36muser_id = \"user_001\"\x1b[0m\n\n\
        2. Common mistakes:\n\
           • Missing quotes around strings\n\
           • Misspelled key names",
        config_path, error
    )
}
