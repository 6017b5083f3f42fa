//! Download and digest verification against a local mock server
//!
//! The download path uses blocking I/O, so each test drives it from
//! `spawn_blocking` while wiremock serves responses on the runtime.

use devinit::util::download;
use sha2::{Digest, Sha256};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAYLOAD: &[u8] = b"not a real tarball, but bytes all the same";

fn payload_sha256() -> String {
    hex::encode(Sha256::digest(PAYLOAD))
}

async fn serve_payload() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archive.tar.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PAYLOAD))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_writes_the_body_to_disk() {
    let server = serve_payload().await;
    let url = format!("{}/archive.tar.gz", server.uri());

    let dir = tempfile::TempDir::new().unwrap();
    let dest = dir.path().join("archive.tar.gz");

    let written = tokio::task::spawn_blocking({
        let dest = dest.clone();
        move || download::fetch(&url, &dest)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(written, PAYLOAD.len() as u64);
    assert_eq!(std::fs::read(&dest).unwrap(), PAYLOAD);
}

#[tokio::test(flavor = "multi_thread")]
async fn matching_digest_passes() {
    let server = serve_payload().await;
    let url = format!("{}/archive.tar.gz", server.uri());
    let digest = payload_sha256();

    let dir = tempfile::TempDir::new().unwrap();
    let dest = dir.path().join("archive.tar.gz");

    let result = tokio::task::spawn_blocking({
        let dest = dest.clone();
        move || download::fetch_verified(&url, &dest, Some(&digest))
    })
    .await
    .unwrap();

    assert!(result.is_ok());
    assert!(dest.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn digest_comparison_ignores_case_and_whitespace() {
    let server = serve_payload().await;
    let url = format!("{}/archive.tar.gz", server.uri());
    let digest = format!("  {}\n", payload_sha256().to_uppercase());

    let dir = tempfile::TempDir::new().unwrap();
    let dest = dir.path().join("archive.tar.gz");

    let result = tokio::task::spawn_blocking({
        let dest = dest.clone();
        move || download::fetch_verified(&url, &dest, Some(&digest))
    })
    .await
    .unwrap();

    assert!(result.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn mismatched_digest_fails_and_removes_the_file() {
    let server = serve_payload().await;
    let url = format!("{}/archive.tar.gz", server.uri());
    let wrong = "0".repeat(64);

    let dir = tempfile::TempDir::new().unwrap();
    let dest = dir.path().join("archive.tar.gz");

    let result = tokio::task::spawn_blocking({
        let dest = dest.clone();
        move || download::fetch_verified(&url, &dest, Some(&wrong))
    })
    .await
    .unwrap();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("sha256 mismatch"));
    // A corrupt download must not be left behind to be extracted later.
    assert!(!dest.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn http_error_status_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let url = format!("{}/missing", server.uri());

    let dir = tempfile::TempDir::new().unwrap();
    let dest = dir.path().join("missing");

    let result = tokio::task::spawn_blocking({
        let dest = dest.clone();
        move || download::fetch(&url, &dest)
    })
    .await
    .unwrap();

    assert!(result.is_err());
    assert!(!dest.exists());
}
