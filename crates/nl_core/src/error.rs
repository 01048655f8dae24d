use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{service} unavailable: {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("No content extracted from {0}")]
    NoContent(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            message: message.into(),
        }
    }

    /// Coarse category used by callers to pick a status code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::InvalidInput(_) | Error::InvalidUrl(_) => ErrorKind::InvalidInput,
            Error::Upstream { .. }
            | Error::Extraction(_)
            | Error::Inference(_)
            | Error::Http(_) => ErrorKind::UpstreamUnavailable,
            Error::NoContent(_) => ErrorKind::NoContent,
            Error::Io(_) | Error::Serialization(_) => ErrorKind::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    InvalidInput,
    UpstreamUnavailable,
    NoContent,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Config => "configuration_error",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::UpstreamUnavailable => "upstream_unavailable",
            ErrorKind::NoContent => "no_content",
            ErrorKind::Internal => "internal_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
