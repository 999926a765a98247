//! MAC Access Authentication over the `http` crate's request types.
//!
//! This crate adapts [`http::Request`] and [`http::request::Parts`] to the
//! request-view traits of `macauth-core`, and wraps the three protocol
//! operations for callers that work with `http` types directly. The core
//! stays free of any HTTP-library dependency; this is the one concrete
//! adapter shipped with the workspace.
//!
//! # Usage
//!
//! ```rust
//! use macauth_core::HashAlgorithm;
//!
//! // Client side: sign an outgoing request.
//! let mut request = http::Request::builder()
//!     .method("GET")
//!     .uri("http://example.com/protected_resource")
//!     .body(())
//!     .unwrap();
//! macauth_http::sign_request(&mut request, "h480djs93hd8", b"489dks293j39", HashAlgorithm::Sha1)
//!     .unwrap();
//!
//! // Server side: identify the credential, look up its key, verify.
//! let (parts, ()) = request.into_parts();
//! assert_eq!(macauth_http::get_id(&parts).unwrap(), "h480djs93hd8");
//! assert!(
//!     macauth_http::check_signature(&parts, "http", b"489dks293j39", HashAlgorithm::Sha1)
//!         .unwrap()
//! );
//! ```
//!
//! # Modules
//!
//! - [`error`] - Adapter error types
//! - [`view`] - Request views over `http::Request` and `http::request::Parts`

pub mod error;
pub mod view;

pub use error::AdapterError;
pub use view::{HttpPartsView, HttpRequestView};

use macauth_core::HashAlgorithm;

/// Sign an outgoing request in place.
/// See [`macauth_core::sign_request`].
///
/// # Errors
///
/// Returns an [`AdapterError`] if the request cannot be normalized (no
/// host, no resolvable port) or the core refuses to sign it.
pub fn sign_request<B>(
    request: &mut http::Request<B>,
    id: &str,
    key: &[u8],
    algorithm: HashAlgorithm,
) -> Result<(), AdapterError> {
    let mut view = HttpRequestView::new(request)?;
    macauth_core::sign_request(&mut view, id, key, algorithm)?;
    Ok(())
}

/// Extract the claimed credential id from a received request's
/// `Authorization` header.
/// See [`macauth_core::get_id`].
///
/// Only the header is consulted, so no scheme is needed here.
///
/// # Errors
///
/// Returns [`macauth_core::MacAuthError::MissingAuthHeader`] (wrapped) if
/// the header is absent, or `MalformedHeader` if it is unparsable.
pub fn get_id(parts: &http::request::Parts) -> Result<String, AdapterError> {
    let header = match parts.headers.get(http::header::AUTHORIZATION) {
        None => return Err(macauth_core::MacAuthError::MissingAuthHeader.into()),
        Some(value) => value.to_str().map_err(|_| {
            macauth_core::MacAuthError::MalformedHeader(
                "Authorization header is not valid ASCII".to_owned(),
            )
        })?,
    };
    Ok(macauth_core::parse_authorization_header(header)?.id)
}

/// Verify a received request's signature with the given key.
/// See [`macauth_core::check_signature`].
///
/// `scheme` is the transport the server accepted the request on (`"http"`
/// or `"https"`), used to resolve the default port when the request names
/// none explicitly.
///
/// # Errors
///
/// Returns an [`AdapterError`] if the request cannot be normalized or its
/// header is missing or unparsable; a well-formed-but-wrong digest is
/// `Ok(false)`, not an error.
pub fn check_signature(
    parts: &http::request::Parts,
    scheme: &str,
    key: &[u8],
    algorithm: HashAlgorithm,
) -> Result<bool, AdapterError> {
    let view = HttpPartsView::new(parts, scheme)?;
    Ok(macauth_core::check_signature(&view, key, algorithm)?)
}
