//! Server-side header inspection and signature verification.
//!
//! The verification flow mirrors the signer: parse the presented
//! `Authorization` header, rebuild the canonical string from the header's
//! `ts`/`nonce`/`ext` plus the request's own method, path, host, and port,
//! recompute the digest with the credential key, and compare in constant
//! time.
//!
//! Parse failures and a missing header surface as errors rather than a
//! silent `false`, so a server can log them distinctly — both should still
//! produce the same 401 toward the client to avoid leaking which check
//! failed. Replay protection (nonce caching, timestamp windows) is
//! deliberately not implemented here; integrators add it around these calls.

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::error::MacAuthError;
use crate::header::{MacParameters, parse_authorization_header};
use crate::request::RequestView;
use crate::sign::request_signature;
use crate::signature::HashAlgorithm;

/// Extract the claimed credential id from the request's `Authorization`
/// header, without verifying anything.
///
/// Servers call this first to look up the credential key for the id, then
/// pass the key to [`check_signature`].
///
/// # Errors
///
/// Returns [`MacAuthError::MissingAuthHeader`] if the header is absent and
/// [`MacAuthError::MalformedHeader`] if it is present but unparsable.
pub fn get_id<V: RequestView + ?Sized>(view: &V) -> Result<String, MacAuthError> {
    Ok(parse_header(view)?.id)
}

/// Check that the request is correctly signed with the given key.
///
/// Returns `Ok(true)` only when the recomputed digest matches the presented
/// one exactly; `Ok(false)` on a well-formed header whose digest does not
/// match. The comparison is constant-time over the digest bytes.
///
/// # Errors
///
/// Returns [`MacAuthError::MissingAuthHeader`] if the header is absent and
/// [`MacAuthError::MalformedHeader`] if it is present but unparsable; these
/// propagate rather than collapsing into `Ok(false)`.
pub fn check_signature<V: RequestView + ?Sized>(
    view: &V,
    key: &[u8],
    algorithm: HashAlgorithm,
) -> Result<bool, MacAuthError> {
    let params = parse_header(view)?;

    debug!(id = %params.id, %algorithm, "verifying MAC signature");

    let expected = request_signature(view, key, algorithm, &params);

    if params.mac.as_bytes().ct_eq(expected.as_bytes()).into() {
        debug!(id = %params.id, "MAC signature verified");
        Ok(true)
    } else {
        debug!(
            id = %params.id,
            provided = %params.mac,
            "MAC signature mismatch"
        );
        Ok(false)
    }
}

fn parse_header<V: RequestView + ?Sized>(view: &V) -> Result<MacParameters, MacAuthError> {
    let header = view
        .authorization()?
        .ok_or(MacAuthError::MissingAuthHeader)?;
    parse_authorization_header(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::render_authorization_header;
    use crate::request::{RequestViewMut, StubRequest};
    use crate::sign::sign_request;

    const KEY: &[u8] = b"489dks293j39";

    fn signed_request() -> StubRequest {
        let mut request = StubRequest::get("/resource/1?b=1&a=2");
        sign_request(&mut request, "h480djs93hd8", KEY, HashAlgorithm::Sha1).unwrap();
        request
    }

    #[test]
    fn test_should_verify_request_it_signed() {
        let request = signed_request();
        assert!(check_signature(&request, KEY, HashAlgorithm::Sha1).unwrap());
    }

    #[test]
    fn test_should_verify_known_good_header() {
        let mut request = StubRequest::get("/resource/1?b=1&a=2");
        request.method = "POST".to_owned();
        request.authorization = Some(
            "MAC nonce=\"dj83hs9s\", mac=\"SIBz/j9mI1Ba2Y+10wdwbQGv2Yk=\", \
             id=\"h480djs93hd8\", ts=\"1336363200\""
                .to_owned(),
        );
        assert!(check_signature(&request, KEY, HashAlgorithm::Sha1).unwrap());
    }

    #[test]
    fn test_should_reject_tampered_requests() {
        let baseline = signed_request();
        assert!(check_signature(&baseline, KEY, HashAlgorithm::Sha1).unwrap());

        let mutations: Vec<(&str, Box<dyn Fn(&mut StubRequest)>)> = vec![
            ("method", Box::new(|r| r.method = "POST".to_owned())),
            ("host", Box::new(|r| r.host = "evil.example.com".to_owned())),
            ("port", Box::new(|r| r.port = "8080".to_owned())),
            ("path", Box::new(|r| r.path_and_query = "/resource/2?b=1&a=2".to_owned())),
        ];
        for (field, mutate) in mutations {
            let mut request = baseline.clone();
            mutate(&mut request);
            assert!(
                !check_signature(&request, KEY, HashAlgorithm::Sha1).unwrap(),
                "tampered {field} still verified"
            );
        }
    }

    #[test]
    fn test_should_reject_tampered_header_parameters() {
        let baseline = signed_request();
        for (field, replace) in [("ts", "ts=\"1\""), ("nonce", "nonce=\"stale\"")] {
            let mut request = baseline.clone();
            let header = request.authorization.take().unwrap();
            let params = parse_authorization_header(&header).unwrap();
            let needle = match field {
                "ts" => format!("ts=\"{}\"", params.ts),
                _ => format!("nonce=\"{}\"", params.nonce),
            };
            request.authorization = Some(header.replace(&needle, replace));
            assert!(
                !check_signature(&request, KEY, HashAlgorithm::Sha1).unwrap(),
                "tampered {field} still verified"
            );
        }
    }

    #[test]
    fn test_should_reject_wrong_key() {
        let request = signed_request();
        assert!(!check_signature(&request, b"not-the-key", HashAlgorithm::Sha1).unwrap());
    }

    #[test]
    fn test_should_reject_wrong_algorithm() {
        // Signer and verifier must agree on the algorithm out-of-band.
        let request = signed_request();
        assert!(!check_signature(&request, KEY, HashAlgorithm::Sha256).unwrap());
    }

    #[test]
    fn test_should_round_trip_with_stronger_digests() {
        for algorithm in [HashAlgorithm::Sha256, HashAlgorithm::Sha512] {
            let mut request = StubRequest::get("/protected_resource");
            sign_request(&mut request, "alice", KEY, algorithm).unwrap();
            assert!(check_signature(&request, KEY, algorithm).unwrap());
        }
    }

    #[test]
    fn test_should_verify_header_with_ext() {
        let mut request = StubRequest::get("/protected_resource");
        let unsigned =
            MacParameters::new("alice", "1336363200", "dj83hs9s", "", Some("a,b,c".to_owned()));
        let mac = request_signature(&request, KEY, HashAlgorithm::Sha1, &unsigned);
        let params = MacParameters { mac, ..unsigned };
        request
            .set_authorization(&render_authorization_header(&params))
            .unwrap();
        assert!(check_signature(&request, KEY, HashAlgorithm::Sha1).unwrap());
    }

    #[test]
    fn test_should_return_claimed_id() {
        let request = signed_request();
        assert_eq!(get_id(&request).unwrap(), "h480djs93hd8");
    }

    #[test]
    fn test_should_error_when_header_is_missing() {
        let request = StubRequest::get("/");
        assert!(matches!(get_id(&request), Err(MacAuthError::MissingAuthHeader)));
        assert!(matches!(
            check_signature(&request, KEY, HashAlgorithm::Sha1),
            Err(MacAuthError::MissingAuthHeader)
        ));
    }

    #[test]
    fn test_should_propagate_malformed_header_instead_of_false() {
        let mut request = StubRequest::get("/");
        request.authorization = Some("Basic xyz".to_owned());
        assert!(matches!(
            check_signature(&request, KEY, HashAlgorithm::Sha1),
            Err(MacAuthError::MalformedHeader(_))
        ));
        assert!(matches!(get_id(&request), Err(MacAuthError::MalformedHeader(_))));

        request.authorization =
            Some("MAC id=\"a\", ts=\"1\", nonce=\"2\"".to_owned());
        assert!(matches!(
            check_signature(&request, KEY, HashAlgorithm::Sha1),
            Err(MacAuthError::MalformedHeader(_))
        ));
    }
}
