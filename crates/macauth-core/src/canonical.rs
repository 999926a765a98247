//! Canonical signing-string construction.
//!
//! Both signer and verifier digest the exact same byte sequence, built from
//! the request and the MAC parameters in a fixed order, each field terminated
//! by a single line feed (never CRLF):
//!
//! ```text
//! <ts>\n
//! <nonce>\n
//! <METHOD>\n
//! <path-with-query>\n
//! <host>\n
//! <port>\n
//! <ext>\n
//! ```
//!
//! The string is never transmitted; each side recomputes it independently,
//! so any deviation between the two (a missing trailing line feed, a
//! case-normalized method, a re-encoded query string) breaks interoperability.

/// Build the canonical string that gets signed.
///
/// Every field is included verbatim, even when empty: an absent `ext` is
/// signed as the empty string, and the field's terminating line feed is still
/// emitted. No case normalization or percent re-encoding is applied; the
/// method and path must be passed exactly as the wire request carries them,
/// and the port must already be resolved to a decimal string (the scheme
/// default when the request does not name one explicitly).
///
/// # Examples
///
/// ```
/// use macauth_core::canonical::build_canonical_string;
///
/// let canonical = build_canonical_string(
///     "1336363200",
///     "dj83hs9s",
///     "GET",
///     "/protected_resource",
///     "example.com",
///     "80",
///     "",
/// );
/// assert_eq!(
///     canonical,
///     "1336363200\ndj83hs9s\nGET\n/protected_resource\nexample.com\n80\n\n"
/// );
/// ```
#[must_use]
pub fn build_canonical_string(
    ts: &str,
    nonce: &str,
    method: &str,
    path_and_query: &str,
    host: &str,
    port: &str,
    ext: &str,
) -> String {
    format!("{ts}\n{nonce}\n{method}\n{path_and_query}\n{host}\n{port}\n{ext}\n")
}
