//! Client-side request signing.
//!
//! [`sign_request`] is the whole client flow: generate a timestamp and
//! nonce, build the canonical string from the request view, digest it, and
//! write the rendered `Authorization` header back through the view.
//! [`request_signature`] is the digest step alone, shared with the verifier
//! and public for callers that assemble their own [`MacParameters`]
//! (the only way to sign with a non-empty `ext`).

use base64::Engine;
use chrono::Utc;
use rand::RngExt;
use tracing::debug;

use crate::canonical::build_canonical_string;
use crate::error::MacAuthError;
use crate::header::{MacParameters, render_authorization_header};
use crate::request::{RequestView, RequestViewMut};
use crate::signature::{HashAlgorithm, compute_mac};

/// Sign a request with the given credential.
///
/// Generates `ts` as the current Unix time in whole seconds and `nonce` as
/// 64 bits of fresh randomness, base64-encoded. Nonce *uniqueness* across
/// calls is the caller's replay-protection concern; this function only
/// guarantees freshly drawn randomness per call. Any pre-existing
/// `Authorization` header is overwritten, whatever its scheme.
///
/// This entry point always signs with an empty `ext`; callers that need one
/// compute [`request_signature`] over their own [`MacParameters`] and render
/// the header themselves.
///
/// # Errors
///
/// Returns [`MacAuthError::InvalidHeaderValue`] if the view cannot represent
/// the rendered header.
pub fn sign_request<V: RequestViewMut + ?Sized>(
    view: &mut V,
    id: &str,
    key: &[u8],
    algorithm: HashAlgorithm,
) -> Result<(), MacAuthError> {
    let ts = Utc::now().timestamp().to_string();
    let nonce = generate_nonce();
    let canonical = build_canonical_string(
        &ts,
        &nonce,
        view.method(),
        view.path_and_query(),
        view.host(),
        view.port(),
        "",
    );
    let mac = compute_mac(key, algorithm, canonical.as_bytes());
    let params = MacParameters::new(id, ts, nonce, mac, None);

    debug!(id = %params.id, ts = %params.ts, nonce = %params.nonce, %algorithm, "signing request");

    view.set_authorization(&render_authorization_header(&params))
}

/// Compute the digest for a request against caller-supplied parameters,
/// without touching the request's headers.
///
/// The canonical string is built from the parameters' `ts`, `nonce`, and
/// `ext` (absent signs as empty) plus the view's method, path, host, and
/// port.
#[must_use]
pub fn request_signature<V: RequestView + ?Sized>(
    view: &V,
    key: &[u8],
    algorithm: HashAlgorithm,
    params: &MacParameters,
) -> String {
    let canonical = build_canonical_string(
        &params.ts,
        &params.nonce,
        view.method(),
        view.path_and_query(),
        view.host(),
        view.port(),
        params.ext.as_deref().unwrap_or(""),
    );
    compute_mac(key, algorithm, canonical.as_bytes())
}

/// Draw a fresh 64-bit nonce, URL-safe base64 encoded.
fn generate_nonce() -> String {
    let mut rng = rand::rng();
    let mut buf = [0u8; 8];
    rng.fill(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}
