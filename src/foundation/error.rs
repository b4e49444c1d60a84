pub type AdmatResult<T> = Result<T, AdmatError>;

#[derive(thiserror::Error, Debug)]
pub enum AdmatError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("unknown layout '{0}'")]
    UnknownLayout(String),

    #[error("render backend failure: {0}")]
    Backend(String),

    #[error("capture failure: {0}")]
    Capture(String),

    #[error("external service failure ({service}{}): {message}", .status.map(|s| format!(" status {s}")).unwrap_or_default())]
    ExternalService {
        service: String,
        status: Option<u16>,
        message: String,
    },

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdmatError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub fn external(service: impl Into<String>, status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::ExternalService {
            service: service.into(),
            status,
            message: msg.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
