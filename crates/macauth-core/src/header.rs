//! `Authorization: MAC` header parsing and rendering.
//!
//! The wire format is the `MAC` scheme token followed by comma-separated
//! `key="value"` parameters:
//!
//! ```text
//! Authorization: MAC id="h480djs93hd8", ts="1336363200",
//!                    nonce="dj83hs9s", mac="SIBz/j9mI1Ba2Y+10wdwbQGv2Yk="
//! ```
//!
//! Parameter values are HTTP quoted-strings (`\"` and `\\` escapes; embedded
//! commas allowed inside quotes). Parameter order is insignificant, unknown
//! parameter keys are ignored, duplicate keys are rejected. Bare token values
//! without quotes are accepted on parse for interoperability; rendering
//! always quotes.

use crate::error::MacAuthError;

/// The authentication scheme token this codec produces and accepts.
const SCHEME: &str = "MAC";

/// Parsed parameters of a `MAC` `Authorization` header.
///
/// Produced by [`parse_authorization_header`] on the verifying side and
/// assembled directly by signers that need a caller-supplied `ext`. Treated
/// as immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacParameters {
    /// The credential identifier.
    pub id: String,
    /// The signing timestamp, in decimal seconds.
    pub ts: String,
    /// The per-request nonce.
    pub nonce: String,
    /// The base64-encoded request digest.
    pub mac: String,
    /// The opaque extension string, if any. An empty `ext` never escapes the
    /// codec: it is normalized to `None` on both parse and render, and is
    /// signed as the empty string either way.
    pub ext: Option<String>,
}

impl MacParameters {
    /// Assemble parameters, normalizing an empty `ext` to absent.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        ts: impl Into<String>,
        nonce: impl Into<String>,
        mac: impl Into<String>,
        ext: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            ts: ts.into(),
            nonce: nonce.into(),
            mac: mac.into(),
            ext: ext.filter(|ext| !ext.is_empty()),
        }
    }
}

/// Parse a `MAC` `Authorization` header value into its parameters.
///
/// # Errors
///
/// Returns [`MacAuthError::MalformedHeader`] if the scheme token is not
/// exactly `MAC`, a required parameter (`id`, `ts`, `nonce`, `mac`) is
/// missing, a quoted string is unterminated or ends in a dangling escape,
/// a bare token contains a quote, or a parameter key appears twice.
///
/// # Examples
///
/// ```
/// use macauth_core::header::parse_authorization_header;
///
/// let params = parse_authorization_header(
///     r#"MAC id="h480djs93hd8", ts="1336363200", nonce="dj83hs9s", mac="bhCQ...""#,
/// )
/// .unwrap();
/// assert_eq!(params.id, "h480djs93hd8");
/// assert_eq!(params.ext, None);
/// ```
pub fn parse_authorization_header(header: &str) -> Result<MacParameters, MacAuthError> {
    let (scheme, rest) = header
        .trim()
        .split_once(|c: char| c.is_ascii_whitespace())
        .ok_or_else(|| malformed("scheme token without parameters"))?;

    if scheme != SCHEME {
        return Err(malformed(format!("scheme is {scheme:?}, expected {SCHEME:?}")));
    }

    let pairs = parse_parameters(rest)?;

    let mut id = None;
    let mut ts = None;
    let mut nonce = None;
    let mut mac = None;
    let mut ext = None;

    for (key, value) in pairs {
        match key.as_str() {
            "id" => id = Some(value),
            "ts" => ts = Some(value),
            "nonce" => nonce = Some(value),
            "mac" => mac = Some(value),
            "ext" => ext = Some(value),
            // Unknown parameters are ignored, not rejected.
            _ => {}
        }
    }

    Ok(MacParameters {
        id: id.ok_or_else(|| malformed("missing id parameter"))?,
        ts: ts.ok_or_else(|| malformed("missing ts parameter"))?,
        nonce: nonce.ok_or_else(|| malformed("missing nonce parameter"))?,
        mac: mac.ok_or_else(|| malformed("missing mac parameter"))?,
        ext: ext.filter(|ext: &String| !ext.is_empty()),
    })
}

/// Render parameters as a `MAC` `Authorization` header value.
///
/// All values are emitted as quoted strings with `\\` and `\"` escaping.
/// The `ext` parameter is emitted only when non-empty; the verifier mirrors
/// this by signing an absent `ext` as the empty string.
///
/// # Examples
///
/// ```
/// use macauth_core::header::{MacParameters, render_authorization_header};
///
/// let params = MacParameters::new("alice", "1336363200", "dj83hs9s", "bhCQ...", None);
/// assert_eq!(
///     render_authorization_header(&params),
///     r#"MAC id="alice", ts="1336363200", nonce="dj83hs9s", mac="bhCQ...""#,
/// );
/// ```
#[must_use]
pub fn render_authorization_header(params: &MacParameters) -> String {
    let mut header = format!(
        "{SCHEME} id=\"{}\", ts=\"{}\", nonce=\"{}\", mac=\"{}\"",
        escape(&params.id),
        escape(&params.ts),
        escape(&params.nonce),
        escape(&params.mac),
    );
    if let Some(ext) = params.ext.as_deref() {
        if !ext.is_empty() {
            header.push_str(", ext=\"");
            header.push_str(&escape(ext));
            header.push('"');
        }
    }
    header
}

/// Parse the comma-separated `key=value` parameter list after the scheme.
///
/// Values are either quoted strings (any character allowed, `\x` unescapes
/// to `x`) or bare tokens (no quotes, backslashes, commas, or whitespace).
/// All keys are collected, including unknown ones, so duplicates can be
/// rejected uniformly.
fn parse_parameters(input: &str) -> Result<Vec<(String, String)>, MacAuthError> {
    let mut params: Vec<(String, String)> = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_ascii_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(&c) = chars.peek() {
            if c == '=' {
                break;
            }
            if c == ',' || c == '"' || c.is_ascii_whitespace() {
                return Err(malformed(format!("invalid character {c:?} in parameter key")));
            }
            key.push(c);
            chars.next();
        }
        if key.is_empty() {
            return Err(malformed("empty parameter key"));
        }
        if chars.next() != Some('=') {
            return Err(malformed(format!("parameter {key:?} has no value")));
        }

        let value = if chars.peek() == Some(&'"') {
            chars.next();
            parse_quoted_string(&mut chars)?
        } else {
            parse_token(&mut chars)?
        };

        if params.iter().any(|(existing, _)| *existing == key) {
            return Err(malformed(format!("duplicate parameter {key:?}")));
        }
        params.push((key, value));

        while chars.next_if(|c| c.is_ascii_whitespace()).is_some() {}
        match chars.next() {
            None => break,
            Some(',') => {}
            Some(c) => {
                return Err(malformed(format!("unexpected character {c:?} after value")));
            }
        }
    }

    Ok(params)
}

/// Consume a quoted-string body up to the closing quote, resolving escapes.
fn parse_quoted_string(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<String, MacAuthError> {
    let mut value = String::new();
    loop {
        match chars.next() {
            None => return Err(malformed("unterminated quoted string")),
            Some('"') => return Ok(value),
            Some('\\') => match chars.next() {
                Some(c) => value.push(c),
                None => return Err(malformed("dangling escape in quoted string")),
            },
            Some(c) => value.push(c),
        }
    }
}

/// Consume a bare (unquoted) token value up to the next comma.
fn parse_token(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<String, MacAuthError> {
    let mut value = String::new();
    while let Some(&c) = chars.peek() {
        if c == ',' || c.is_ascii_whitespace() {
            break;
        }
        if c == '"' || c == '\\' {
            return Err(malformed(format!("invalid character {c:?} in bare token")));
        }
        value.push(c);
        chars.next();
    }
    if value.is_empty() {
        return Err(malformed("empty bare token"));
    }
    Ok(value)
}

/// Escape a value for emission inside a quoted string.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn malformed(reason: impl Into<String>) -> MacAuthError {
    MacAuthError::MalformedHeader(reason.into())
}
