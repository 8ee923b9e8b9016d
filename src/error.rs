use thiserror::Error;

#[derive(Error, Debug)]
pub enum MixturaError {
    #[error("Unknown provider '{provider}' in '{token}'")]
    UnknownProvider { token: String, provider: String },

    #[error("Invalid package specifier '{token}': {reason}")]
    InvalidSpecifier { token: String, reason: String },

    #[error("No packages found for '{0}'")]
    PackageNotFound(String),

    #[error("Resolution of '{0}' was cancelled")]
    ResolutionCancelled(String),

    #[error("{provider}: {detail}")]
    Backend { provider: String, detail: String },

    /// Provider table is unusable; fatal at startup
    #[error("Provider registry misconfigured: {0}")]
    Registry(String),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Operation interrupted by user")]
    Interrupted,

    #[error("{0}")]
    Other(String),
}

impl MixturaError {
    pub fn backend(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Backend {
            provider: provider.into(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MixturaError>;
