//! MAC Access Authentication request signing and verification.
//!
//! This crate implements the cryptographic core of the MAC Access
//! Authentication scheme (draft-ietf-oauth-v2-http-mac): a client holding a
//! credential id and secret key signs each outgoing request with a keyed
//! digest over a canonical representation of the request, transmitted in the
//! `Authorization` header; the server recomputes the digest from the same
//! canonicalization and accepts the request only if the digests match.
//!
//! # Overview
//!
//! A client signs a request view with [`sign_request`]; a server extracts
//! the claimed id with [`get_id`], looks up the key for that id, and checks
//! the digest with [`check_signature`]. The core is stateless and depends
//! only on the [`RequestView`] traits — concrete request types are adapted
//! elsewhere (see the `macauth-http` crate for the `http` crate's types).
//!
//! Replay protection is out of scope: the verifier proves that the holder of
//! the key produced the signature over this exact request shape, and leaves
//! nonce caching and timestamp windows to the integrating application.
//!
//! # Usage
//!
//! ```rust
//! use macauth_core::{HashAlgorithm, build_canonical_string, compute_mac};
//!
//! // Both sides rebuild this string independently; it never goes on the wire.
//! let canonical = build_canonical_string(
//!     "1329181221", "wGX71", "GET", "/alias/", "10.250.2.176", "80", "",
//! );
//! let mac = compute_mac(
//!     b"b8u1cc5iiio5o319og7hh8faf2gi5ym4aq0zwf112cv1287an65fudu5zj7zo7dz",
//!     HashAlgorithm::Sha1,
//!     canonical.as_bytes(),
//! );
//! assert_eq!(mac, "jzh5chjQc2zFEvLbyHnPdX11Yck=");
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical signing-string construction
//! - [`credential`] - The `(id, key)` credential pair
//! - [`error`] - Signing and verification error types
//! - [`header`] - `Authorization: MAC` header parsing and rendering
//! - [`request`] - Normalized request view traits implemented by adapters
//! - [`sign`] - Client-side signing
//! - [`signature`] - Keyed digest computation
//! - [`verify`] - Server-side verification

pub mod canonical;
pub mod credential;
pub mod error;
pub mod header;
pub mod request;
pub mod sign;
pub mod signature;
pub mod verify;

pub use canonical::build_canonical_string;
pub use credential::Credential;
pub use error::MacAuthError;
pub use header::{MacParameters, parse_authorization_header, render_authorization_header};
pub use request::{RequestView, RequestViewMut};
pub use sign::{request_signature, sign_request};
pub use signature::{HashAlgorithm, compute_mac};
pub use verify::{check_signature, get_id};
