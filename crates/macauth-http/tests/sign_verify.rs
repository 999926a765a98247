//! End-to-end signing and verification over `http` request types.

use macauth_core::{Credential, HashAlgorithm, MacAuthError};
use macauth_http::{AdapterError, HttpRequestView};

const ID: &str = "h480djs93hd8";
const KEY: &[u8] = b"489dks293j39";

fn signed_request(uri: &str) -> http::Request<()> {
    let mut request = http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(())
        .unwrap();
    macauth_http::sign_request(&mut request, ID, KEY, HashAlgorithm::Sha1).unwrap();
    request
}

/// Rebuild a signed request in origin form, as a server would receive it.
fn as_received(request: &http::Request<()>, host: &str, path_and_query: &str) -> http::request::Parts {
    let authorization = request.headers()[http::header::AUTHORIZATION].clone();
    let (mut parts, ()) = http::Request::builder()
        .uri(path_and_query)
        .header("host", host)
        .body(())
        .unwrap()
        .into_parts();
    parts.method = request.method().clone();
    parts.headers.insert(http::header::AUTHORIZATION, authorization);
    parts
}

#[test]
fn test_should_verify_request_immediately_after_signing() {
    let request = signed_request("http://example.com/resource/1?b=1&a=2");
    let (parts, ()) = request.into_parts();

    assert_eq!(macauth_http::get_id(&parts).unwrap(), ID);
    assert!(macauth_http::check_signature(&parts, "http", KEY, HashAlgorithm::Sha1).unwrap());
}

#[test]
fn test_should_verify_across_absolute_and_origin_form() {
    // The client signs an absolute-form request; the server sees origin form
    // with a Host header. Both sides must rebuild the same canonical string.
    let request = signed_request("http://example.com/resource/1?b=1&a=2");
    let parts = as_received(&request, "example.com", "/resource/1?b=1&a=2");

    assert!(macauth_http::check_signature(&parts, "http", KEY, HashAlgorithm::Sha1).unwrap());
}

#[test]
fn test_should_sign_https_default_port() {
    let request = signed_request("https://example.com/protected_resource");
    let parts = as_received(&request, "example.com", "/protected_resource");

    assert!(macauth_http::check_signature(&parts, "https", KEY, HashAlgorithm::Sha1).unwrap());
    // The signed port was 443, so verifying as plain http must fail.
    assert!(!macauth_http::check_signature(&parts, "http", KEY, HashAlgorithm::Sha1).unwrap());
}

#[test]
fn test_should_carry_explicit_port_through_host_header() {
    let request = signed_request("http://example.com:88/");
    let parts = as_received(&request, "example.com:88", "/");

    assert!(macauth_http::check_signature(&parts, "http", KEY, HashAlgorithm::Sha1).unwrap());
}

#[test]
fn test_should_reject_tampered_request_lines() {
    let request = signed_request("http://example.com/resource/1?b=1&a=2");

    let tampered = [
        as_received(&request, "example.com", "/resource/2?b=1&a=2"),
        as_received(&request, "example.com", "/resource/1?b=1&a=3"),
        as_received(&request, "other.example.com", "/resource/1?b=1&a=2"),
        as_received(&request, "example.com:8080", "/resource/1?b=1&a=2"),
    ];
    for parts in tampered {
        assert!(!macauth_http::check_signature(&parts, "http", KEY, HashAlgorithm::Sha1).unwrap());
    }

    let mut parts = as_received(&request, "example.com", "/resource/1?b=1&a=2");
    parts.method = http::Method::POST;
    assert!(!macauth_http::check_signature(&parts, "http", KEY, HashAlgorithm::Sha1).unwrap());
}

#[test]
fn test_should_reject_wrong_key_and_wrong_algorithm() {
    let request = signed_request("http://example.com/");
    let (parts, ()) = request.into_parts();

    assert!(!macauth_http::check_signature(&parts, "http", b"wrong-key", HashAlgorithm::Sha1).unwrap());
    assert!(!macauth_http::check_signature(&parts, "http", KEY, HashAlgorithm::Sha256).unwrap());
}

#[test]
fn test_should_verify_known_good_signature() {
    // Known-good HMAC-SHA1 vector: fixed ts/nonce over POST with query string.
    let (mut parts, ()) = http::Request::builder()
        .method("POST")
        .uri("/resource/1?b=1&a=2")
        .header("host", "example.com")
        .body(())
        .unwrap()
        .into_parts();
    parts.headers.insert(
        http::header::AUTHORIZATION,
        http::HeaderValue::from_static(
            "MAC nonce=\"dj83hs9s\", mac=\"SIBz/j9mI1Ba2Y+10wdwbQGv2Yk=\", \
             id=\"h480djs93hd8\", ts=\"1336363200\"",
        ),
    );

    assert_eq!(macauth_http::get_id(&parts).unwrap(), ID);
    assert!(macauth_http::check_signature(&parts, "http", KEY, HashAlgorithm::Sha1).unwrap());
}

#[test]
fn test_should_sign_through_credential_view() {
    let credential = Credential::new(ID, KEY.to_vec());
    let mut request = http::Request::builder()
        .method("GET")
        .uri("http://example.com/protected_resource")
        .body(())
        .unwrap();

    let mut view = HttpRequestView::new(&mut request).unwrap();
    credential.sign(&mut view, HashAlgorithm::Sha1).unwrap();

    let (parts, ()) = request.into_parts();
    assert!(macauth_http::check_signature(&parts, "http", credential.key(), HashAlgorithm::Sha1).unwrap());
}

#[test]
fn test_should_distinguish_missing_and_malformed_headers() {
    let (parts, ()) = http::Request::builder()
        .method("GET")
        .uri("/")
        .header("host", "example.com")
        .body(())
        .unwrap()
        .into_parts();
    assert!(matches!(
        macauth_http::check_signature(&parts, "http", KEY, HashAlgorithm::Sha1),
        Err(AdapterError::Auth(MacAuthError::MissingAuthHeader))
    ));
    assert!(matches!(
        macauth_http::get_id(&parts),
        Err(AdapterError::Auth(MacAuthError::MissingAuthHeader))
    ));

    let mut parts = parts;
    parts.headers.insert(
        http::header::AUTHORIZATION,
        http::HeaderValue::from_static("Basic xyz"),
    );
    assert!(matches!(
        macauth_http::check_signature(&parts, "http", KEY, HashAlgorithm::Sha1),
        Err(AdapterError::Auth(MacAuthError::MalformedHeader(_)))
    ));
}
