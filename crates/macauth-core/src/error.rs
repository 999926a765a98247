//! Error types for MAC authentication.
//!
//! All signing and verification failures are represented by [`MacAuthError`],
//! which provides specific variants for each failure mode. A well-formed
//! header whose digest simply does not match is *not* an error; that case is
//! the `Ok(false)` result of
//! [`check_signature`](crate::verify::check_signature), kept distinct so
//! callers can log "not even attempted" and "attempted and wrong" separately
//! while still answering the client identically.

/// Errors that can occur during MAC request signing and verification.
#[derive(Debug, thiserror::Error)]
pub enum MacAuthError {
    /// The `Authorization` header is missing from the request.
    #[error("Missing Authorization header")]
    MissingAuthHeader,

    /// The `Authorization` header could not be parsed: wrong scheme, missing
    /// required parameter, bad quoting, or duplicate parameter keys.
    #[error("Malformed Authorization header: {0}")]
    MalformedHeader(String),

    /// The requested hash algorithm identifier is not recognized.
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The rendered `Authorization` header cannot be represented on the
    /// underlying request (e.g. the credential id contains control bytes).
    #[error("Invalid Authorization header value: {0}")]
    InvalidHeaderValue(String),
}
