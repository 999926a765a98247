//! The `(id, key)` pair identifying and authenticating a client.
//!
//! The core never stores or looks up credentials; lookup by id is the
//! integrating application's concern. This type is a convenience bundle for
//! callers that hold both halves, with thin wrappers over the signing and
//! verification entry points.

use std::fmt;

use crate::error::MacAuthError;
use crate::request::{RequestView, RequestViewMut};
use crate::sign::sign_request;
use crate::signature::HashAlgorithm;
use crate::verify::check_signature;

/// A MAC credential: public identifier plus secret HMAC key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    id: String,
    key: Vec<u8>,
}

impl Credential {
    /// Bundle an identifier and secret key.
    ///
    /// # Examples
    ///
    /// ```
    /// use macauth_core::Credential;
    ///
    /// let credential = Credential::new("h480djs93hd8", b"489dks293j39".to_vec());
    /// assert_eq!(credential.id(), "h480djs93hd8");
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, key: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
        }
    }

    /// The public credential identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The secret HMAC key.
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Sign a request with this credential.
    /// See [`sign_request`](crate::sign::sign_request).
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`sign_request`](crate::sign::sign_request).
    pub fn sign<V: RequestViewMut + ?Sized>(
        &self,
        view: &mut V,
        algorithm: HashAlgorithm,
    ) -> Result<(), MacAuthError> {
        sign_request(view, &self.id, &self.key, algorithm)
    }

    /// Verify a request's signature against this credential's key.
    /// See [`check_signature`](crate::verify::check_signature).
    ///
    /// # Errors
    ///
    /// Propagates the errors of
    /// [`check_signature`](crate::verify::check_signature).
    pub fn verify<V: RequestView + ?Sized>(
        &self,
        view: &V,
        algorithm: HashAlgorithm,
    ) -> Result<bool, MacAuthError> {
        check_signature(view, &self.key, algorithm)
    }
}

// The key never appears in logs or debug output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("key", &"<redacted>")
            .finish()
    }
}
