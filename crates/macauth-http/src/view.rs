//! Request views over the `http` crate's request types.
//!
//! Host and port are resolved once, at view construction: from the URI
//! authority when the request carries one (client requests in absolute
//! form), otherwise from the `Host` header (server requests in origin
//! form). A request that names no explicit port is signed with the scheme's
//! default port — 80 for `http`, 443 for `https` — matching what the peer
//! will reconstruct on its side. Everything else is read verbatim from the
//! request.

use macauth_core::{MacAuthError, RequestView, RequestViewMut};

use crate::error::AdapterError;

/// Mutable view over an [`http::Request`], for signing on the client side.
///
/// The request URI is expected to be in absolute form (as client libraries
/// build it); the scheme-default port can only be inferred from a URI that
/// carries a scheme.
#[derive(Debug)]
pub struct HttpRequestView<'a, B> {
    request: &'a mut http::Request<B>,
    host: String,
    port: String,
}

impl<'a, B> HttpRequestView<'a, B> {
    /// Build a view over a request, resolving host and port.
    ///
    /// # Errors
    ///
    /// Returns an [`AdapterError`] if the host cannot be determined or no
    /// explicit or scheme-default port is available.
    pub fn new(request: &'a mut http::Request<B>) -> Result<Self, AdapterError> {
        let (host, port) = resolve_host_port(request.uri(), request.headers(), None)?;
        Ok(Self {
            request,
            host,
            port,
        })
    }
}

impl<B> RequestView for HttpRequestView<'_, B> {
    fn method(&self) -> &str {
        self.request.method().as_str()
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> &str {
        &self.port
    }

    fn path_and_query(&self) -> &str {
        self.request
            .uri()
            .path_and_query()
            .map_or("/", http::uri::PathAndQuery::as_str)
    }

    fn authorization(&self) -> Result<Option<&str>, MacAuthError> {
        read_authorization(self.request.headers())
    }
}

impl<B> RequestViewMut for HttpRequestView<'_, B> {
    fn set_authorization(&mut self, value: &str) -> Result<(), MacAuthError> {
        let value = http::HeaderValue::from_str(value).map_err(|_| {
            MacAuthError::InvalidHeaderValue(
                "contains bytes not permitted in an HTTP header".to_owned(),
            )
        })?;
        self.request
            .headers_mut()
            .insert(http::header::AUTHORIZATION, value);
        Ok(())
    }
}

/// Read-only view over [`http::request::Parts`], for verifying on the
/// server side.
///
/// Incoming requests usually carry an origin-form URI with no scheme, so
/// the server names its own scheme (`"http"` or `"https"`) and the default
/// port is taken from it when the request has no explicit one.
#[derive(Debug)]
pub struct HttpPartsView<'a> {
    parts: &'a http::request::Parts,
    host: String,
    port: String,
}

impl<'a> HttpPartsView<'a> {
    /// Build a view over received request parts, resolving host and port.
    ///
    /// `scheme` is the transport the server accepted the request on; it is
    /// only consulted when neither the URI nor the `Host` header names an
    /// explicit port, and the URI itself carries no scheme.
    ///
    /// # Errors
    ///
    /// Returns an [`AdapterError`] if the host cannot be determined or the
    /// scheme has no default port.
    pub fn new(parts: &'a http::request::Parts, scheme: &str) -> Result<Self, AdapterError> {
        let (host, port) = resolve_host_port(&parts.uri, &parts.headers, Some(scheme))?;
        Ok(Self { parts, host, port })
    }
}

impl RequestView for HttpPartsView<'_> {
    fn method(&self) -> &str {
        self.parts.method.as_str()
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> &str {
        &self.port
    }

    fn path_and_query(&self) -> &str {
        self.parts
            .uri
            .path_and_query()
            .map_or("/", http::uri::PathAndQuery::as_str)
    }

    fn authorization(&self) -> Result<Option<&str>, MacAuthError> {
        read_authorization(&self.parts.headers)
    }
}

fn read_authorization(headers: &http::HeaderMap) -> Result<Option<&str>, MacAuthError> {
    match headers.get(http::header::AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value.to_str().map(Some).map_err(|_| {
            MacAuthError::MalformedHeader("Authorization header is not valid ASCII".to_owned())
        }),
    }
}

/// Resolve the host and decimal port string a request is addressed to.
///
/// Host and explicit port come from the URI authority when present,
/// otherwise from the `Host` header. Without an explicit port, the default
/// is taken from the URI scheme, falling back to `fallback_scheme`.
fn resolve_host_port(
    uri: &http::Uri,
    headers: &http::HeaderMap,
    fallback_scheme: Option<&str>,
) -> Result<(String, String), AdapterError> {
    let (host, explicit_port) = if let Some(authority) = uri.authority() {
        (
            authority.host().to_owned(),
            authority.port_u16().map(|port| port.to_string()),
        )
    } else {
        let value = headers
            .get(http::header::HOST)
            .ok_or(AdapterError::MissingHost)?
            .to_str()
            .map_err(|_| AdapterError::InvalidHost)?;
        split_host_header(value)
    };

    if host.is_empty() {
        return Err(AdapterError::MissingHost);
    }

    let port = match explicit_port {
        Some(port) => port,
        None => default_port(uri.scheme_str().or(fallback_scheme))?.to_owned(),
    };

    Ok((host, port))
}

/// Split a `Host` header into host and optional decimal port, leaving IPv6
/// literals like `[::1]` intact.
fn split_host_header(value: &str) -> (String, Option<String>) {
    match value.rsplit_once(':') {
        Some((host, port))
            if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) =>
        {
            (host.to_owned(), Some(port.to_owned()))
        }
        _ => (value.to_owned(), None),
    }
}

fn default_port(scheme: Option<&str>) -> Result<&'static str, AdapterError> {
    match scheme {
        Some("http") => Ok("80"),
        Some("https") => Ok("443"),
        Some(other) => Err(AdapterError::UnknownScheme(other.to_owned())),
        None => Err(AdapterError::MissingPort),
    }
}
