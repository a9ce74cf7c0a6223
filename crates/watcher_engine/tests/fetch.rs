use std::time::Duration;

use watcher_engine::{FailureKind, FetchSettings, Fetcher, ReqwestFetcher, BROWSER_USER_AGENT};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetcher_returns_body_with_browser_identity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .and(header("user-agent", BROWSER_USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).expect("client");
    let url = format!("{}/doc", server.uri());

    let output = fetcher.fetch(&url).await.expect("fetch ok");
    assert_eq!(output.body, "<html>ok</html>");
    assert_eq!(output.final_url, url);
    assert_eq!(output.byte_len, 15);
    assert!(output.content_type.unwrap().starts_with("text/html"));
}

#[tokio::test]
async fn fetcher_decodes_declared_charset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latin"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"<p>caf\xe9</p>".to_vec(), "text/html; charset=ISO-8859-1"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let output = fetcher
        .fetch(&format!("{}/latin", server.uri()))
        .await
        .unwrap();
    assert_eq!(output.body, "<p>café</p>");
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let url = format!("{}/missing", server.uri());

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_fails_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let err = fetcher.fetch(&server.uri()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn fetcher_rejects_invalid_url() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let err = fetcher.fetch("not a url").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn fetcher_times_out_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings).unwrap();
    let url = format!("{}/slow", server.uri());

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings).unwrap();
    let url = format!("{}/large", server.uri());

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}
