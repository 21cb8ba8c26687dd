use thiserror::Error;

/// Fallback shown when a failure carries neither a service message nor its own text.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Erro desconhecido.";

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for the dossier client.
///
/// Credential variants are resolved locally by the session manager except on
/// an explicit login, where they are handed back so the caller can show a
/// message. Internal glue (config, CLI) keeps using `anyhow::Result`.
#[derive(Debug, Error)]
pub enum ClientError {
    // ── Credentials ──────────────────────────────────────────────────────
    #[error("malformed credential: {0}")]
    MalformedCredential(String),

    #[error("credential expired")]
    ExpiredCredential,

    // ── Remote service ───────────────────────────────────────────────────
    #[error("request failed: {0}")]
    RequestFailed(#[from] RequestFailure),

    #[error("forbidden: {0}")]
    Forbidden(String),

    // ── Local state ──────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("token storage: {0}")]
    Storage(String),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<CredentialError> for ClientError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Malformed(reason) => Self::MalformedCredential(reason),
            CredentialError::Expired => Self::ExpiredCredential,
        }
    }
}

// ─── Credential errors ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("malformed credential: {0}")]
    Malformed(String),

    #[error("credential expired")]
    Expired,
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Request failures ────────────────────────────────────────────────────────

/// A failed call to the remote service.
///
/// `service_message` is the `error` field of the response body when the
/// service answered with one; `message` is the failure's own text (the
/// transport error, or the status line for a non-2xx answer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.display_message())]
pub struct RequestFailure {
    pub status: Option<u16>,
    pub service_message: Option<String>,
    pub message: String,
}

impl RequestFailure {
    /// The service answered with a non-success status.
    pub fn service(status: u16, service_message: Option<String>) -> Self {
        Self {
            status: Some(status),
            service_message,
            message: format!("Request failed with status code {status}"),
        }
    }

    /// No response arrived (connection refused, DNS, TLS, body read...).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            service_message: None,
            message: message.into(),
        }
    }

    /// Whether the service produced a response at all.
    pub fn has_response(&self) -> bool {
        self.status.is_some()
    }

    /// Service message, then the failure's own text, then the fixed fallback.
    pub fn display_message(&self) -> String {
        self.service_message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .or_else(|| Some(self.message.trim()).filter(|m| !m.is_empty()))
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
            .to_string()
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
