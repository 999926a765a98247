//! Error types for adapting `http` crate requests.

use macauth_core::MacAuthError;

/// Errors raised while normalizing an `http` request into a signable view.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Neither the request URI nor the `Host` header names a host.
    #[error("request has no host in its URI or Host header")]
    MissingHost,

    /// The `Host` header is present but its bytes are not readable as a
    /// string.
    #[error("Host header is not valid ASCII")]
    InvalidHost,

    /// The request names no explicit port and carries no scheme to infer
    /// the default from.
    #[error("request names no explicit port and no scheme to infer one from")]
    MissingPort,

    /// The scheme has no default port known to this adapter.
    #[error("no default port for scheme: {0}")]
    UnknownScheme(String),

    /// A signing or verification failure from the core.
    #[error(transparent)]
    Auth(#[from] MacAuthError),
}
