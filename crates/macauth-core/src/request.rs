//! Normalized request view consumed by the signer and verifier.
//!
//! The core never touches a concrete request type. Each integration supplies
//! an adapter implementing [`RequestView`] (and [`RequestViewMut`] on the
//! signing side) over whatever its framework or client library uses; the
//! `macauth-http` crate ships one for the `http` crate's request types.

use crate::error::MacAuthError;

/// Read access to the request fields that get signed, exactly as the wire
/// request carries them.
pub trait RequestView {
    /// The HTTP method, without case normalization.
    fn method(&self) -> &str;

    /// The request host, without the port.
    fn host(&self) -> &str;

    /// The request port as a decimal string. Adapters must resolve this
    /// before the core sees it: the explicit port when the request names
    /// one, otherwise the scheme default (80 or 443).
    fn port(&self) -> &str;

    /// The request path including any query string, verbatim.
    fn path_and_query(&self) -> &str;

    /// The current `Authorization` header value, if any.
    ///
    /// # Errors
    ///
    /// Returns [`MacAuthError::MalformedHeader`] if a header is present but
    /// its bytes cannot be read as a string.
    fn authorization(&self) -> Result<Option<&str>, MacAuthError>;
}

/// A request view that can also write the `Authorization` header, required
/// for signing.
pub trait RequestViewMut: RequestView {
    /// Replace the request's `Authorization` header with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`MacAuthError::InvalidHeaderValue`] if the underlying
    /// request cannot represent `value` as a header.
    fn set_authorization(&mut self, value: &str) -> Result<(), MacAuthError>;
}

/// In-memory request stand-in for exercising the signer and verifier.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct StubRequest {
    pub method: String,
    pub host: String,
    pub port: String,
    pub path_and_query: String,
    pub authorization: Option<String>,
}

#[cfg(test)]
impl StubRequest {
    pub fn get(path_and_query: &str) -> Self {
        Self {
            method: "GET".to_owned(),
            host: "example.com".to_owned(),
            port: "80".to_owned(),
            path_and_query: path_and_query.to_owned(),
            authorization: None,
        }
    }
}

#[cfg(test)]
impl RequestView for StubRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> &str {
        &self.port
    }

    fn path_and_query(&self) -> &str {
        &self.path_and_query
    }

    fn authorization(&self) -> Result<Option<&str>, MacAuthError> {
        Ok(self.authorization.as_deref())
    }
}

#[cfg(test)]
impl RequestViewMut for StubRequest {
    fn set_authorization(&mut self, value: &str) -> Result<(), MacAuthError> {
        self.authorization = Some(value.to_owned());
        Ok(())
    }
}
