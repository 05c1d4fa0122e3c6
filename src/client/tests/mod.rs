use super::*;
use crate::types::ImageFormat;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn png_bytes(marker: u8) -> Vec<u8> {
    vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, marker]
}

/// One complete search result whose thumbnail lives at `thumbnail_url`
fn result_with_thumbnail(headline: &str, thumbnail_url: &str) -> serde_json::Value {
    json!({
        "sectionName": "Technology",
        "webPublicationDate": "2017-10-29T06:00:20Z",
        "webUrl": format!("https://www.theguardian.com/technology/{headline}"),
        "tags": [{ "webTitle": "Jane Doe" }],
        "fields": { "headline": headline, "thumbnail": thumbnail_url }
    })
}

fn search_body(results: Vec<serde_json::Value>) -> String {
    json!({ "response": { "status": "ok", "results": results } }).to_string()
}

/// Config pointing every request at the mock server
fn test_config(server: &MockServer) -> Config {
    Config {
        endpoint: format!("{}/search", server.uri()),
        api_key: "test-key".into(),
        ..Default::default()
    }
}

async fn mount_search(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn query_for_fixture_date() -> SearchQuery {
    SearchQuery {
        text: "climate".to_string(),
        from_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    }
}

// ── Full pipeline ───────────────────────────────────────────────────

#[tokio::test]
async fn search_returns_articles_with_thumbnails() {
    let server = MockServer::start().await;
    let body = search_body(vec![
        result_with_thumbnail("first", &format!("{}/thumb/a.png", server.uri())),
        result_with_thumbnail("second", &format!("{}/thumb/b.png", server.uri())),
    ]);
    mount_search(&server, body).await;
    Mock::given(method("GET"))
        .and(path("/thumb/a.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(1)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/thumb/b.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(2)))
        .mount(&server)
        .await;

    let client = NewsClient::new(test_config(&server)).unwrap();
    let articles = client.search(&query_for_fixture_date()).await.unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "first");
    assert_eq!(articles[0].author, "Jane Doe");
    assert_eq!(articles[0].published, "29-10-2017");
    let first_thumb = articles[0].thumbnail.as_ref().expect("first thumbnail");
    assert_eq!(first_thumb.format, ImageFormat::Png);
    assert_eq!(first_thumb.data, png_bytes(1));
    let second_thumb = articles[1].thumbnail.as_ref().expect("second thumbnail");
    assert_eq!(second_thumb.data, png_bytes(2));
}

#[tokio::test]
async fn search_sends_expected_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "climate"))
        .and(query_param("from-date", "2024-01-15"))
        .and(query_param("show-fields", "thumbnail,headline"))
        .and(query_param("show-tags", "contributor"))
        .and(query_param("api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_body(vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let client = NewsClient::new(test_config(&server)).unwrap();
    let articles = client.search(&query_for_fixture_date()).await.unwrap();

    assert!(articles.is_empty());
}

#[tokio::test]
async fn empty_body_yields_empty_batch() {
    let server = MockServer::start().await;
    mount_search(&server, String::new()).await;

    let client = NewsClient::new(test_config(&server)).unwrap();
    let articles = client.search(&query_for_fixture_date()).await.unwrap();

    assert!(articles.is_empty());
}

#[tokio::test]
async fn list_fetch_failure_surfaces_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = NewsClient::new(test_config(&server)).unwrap();
    let result = client.search(&query_for_fixture_date()).await;

    match result {
        Err(Error::HttpStatus(status)) => assert_eq!(status, 500),
        other => panic!("Expected HttpStatus error from the list fetch, got {other:?}"),
    }
}

#[tokio::test]
async fn partial_extraction_continues_with_readable_records() {
    let server = MockServer::start().await;
    let good = result_with_thumbnail("readable", &format!("{}/thumb/ok.png", server.uri()));
    let mut broken = result_with_thumbnail("broken", "http://unused.invalid/x.png");
    broken.as_object_mut().unwrap().remove("webUrl");
    mount_search(&server, search_body(vec![good, broken])).await;
    Mock::given(method("GET"))
        .and(path("/thumb/ok.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(3)))
        .mount(&server)
        .await;

    let client = NewsClient::new(test_config(&server)).unwrap();
    let articles = client.search(&query_for_fixture_date()).await.unwrap();

    assert_eq!(
        articles.len(),
        1,
        "the record before the broken one should still come through"
    );
    assert_eq!(articles[0].title, "readable");
    assert!(articles[0].thumbnail.is_some());
}

// ── Thumbnail failure isolation ─────────────────────────────────────

#[tokio::test]
async fn failed_thumbnail_leaves_other_articles_intact() {
    let server = MockServer::start().await;
    let body = search_body(vec![
        result_with_thumbnail("gone", &format!("{}/thumb/missing.png", server.uri())),
        result_with_thumbnail("fine", &format!("{}/thumb/fine.png", server.uri())),
    ]);
    mount_search(&server, body).await;
    Mock::given(method("GET"))
        .and(path("/thumb/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/thumb/fine.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(7)))
        .mount(&server)
        .await;

    let client = NewsClient::new(test_config(&server)).unwrap();
    let articles = client.search(&query_for_fixture_date()).await.unwrap();

    assert_eq!(articles.len(), 2, "both articles must be produced");
    assert!(
        articles[0].thumbnail.is_none(),
        "404 thumbnail must come back absent"
    );
    assert_eq!(
        articles[1].thumbnail.as_ref().map(|t| t.data.clone()),
        Some(png_bytes(7)),
        "the neighboring article's thumbnail must be unaffected"
    );
}

#[tokio::test]
async fn thumbnails_disabled_skips_image_requests() {
    let server = MockServer::start().await;
    let body = search_body(vec![result_with_thumbnail(
        "plain",
        &format!("{}/thumb/never.png", server.uri()),
    )]);
    mount_search(&server, body).await;
    Mock::given(method("GET"))
        .and(path("/thumb/never.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(9)))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config {
        fetch_thumbnails: false,
        ..test_config(&server)
    };
    let client = NewsClient::new(config).unwrap();
    let articles = client.search(&query_for_fixture_date()).await.unwrap();

    assert_eq!(articles.len(), 1);
    assert!(articles[0].thumbnail.is_none());
}

#[tokio::test]
async fn concurrent_thumbnails_preserve_document_order() {
    let server = MockServer::start().await;
    let body = search_body(vec![
        result_with_thumbnail("slowest", &format!("{}/thumb/slow.png", server.uri())),
        result_with_thumbnail("mid", &format!("{}/thumb/mid.png", server.uri())),
        result_with_thumbnail("fast", &format!("{}/thumb/fast.png", server.uri())),
    ]);
    mount_search(&server, body).await;
    // The first article's image is the slowest so an unordered fan-out
    // would yield it last
    Mock::given(method("GET"))
        .and(path("/thumb/slow.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(png_bytes(1))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/thumb/mid.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(png_bytes(2))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/thumb/fast.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(3)))
        .mount(&server)
        .await;

    let config = Config {
        thumbnail_concurrency: 4,
        ..test_config(&server)
    };
    let client = NewsClient::new(config).unwrap();
    let articles = client.search(&query_for_fixture_date()).await.unwrap();

    let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["slowest", "mid", "fast"],
        "document order must survive the concurrent fan-out"
    );
    for (article, marker) in articles.iter().zip([1u8, 2, 3]) {
        assert_eq!(
            article.thumbnail.as_ref().map(|t| t.data.clone()),
            Some(png_bytes(marker)),
            "article {} must keep its own thumbnail",
            article.title
        );
    }
}

// ── URL building ────────────────────────────────────────────────────

#[test]
fn build_search_url_orders_parameters() {
    let config = Config {
        api_key: "test-key".into(),
        ..Default::default()
    };
    let client = NewsClient::new(config).unwrap();

    let url = client.build_search_url(&query_for_fixture_date()).unwrap();

    assert_eq!(
        url.query(),
        Some(
            "q=climate&from-date=2024-01-15&show-fields=thumbnail%2Cheadline\
             &show-tags=contributor&api-key=test-key"
        )
    );
    assert!(url.as_str().starts_with("https://content.guardianapis.com/search?"));
}

#[test]
fn redact_api_key_masks_only_the_key() {
    let client = NewsClient::new(Config {
        api_key: "sekrit".into(),
        ..Default::default()
    })
    .unwrap();
    let url = client.build_search_url(&query_for_fixture_date()).unwrap();

    let rendered = redact_api_key(&url);

    assert!(
        !rendered.contains("sekrit"),
        "redacted URL must not leak the key: {rendered}"
    );
    assert!(rendered.contains("api-key=redacted"));
    assert!(rendered.contains("q=climate"));
    assert!(rendered.contains("from-date=2024-01-15"));
}

// ── Construction and queries ────────────────────────────────────────

#[test]
fn invalid_endpoint_fails_client_construction() {
    let config = Config {
        endpoint: "definitely not a url".into(),
        ..Default::default()
    };
    match NewsClient::new(config) {
        Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("endpoint")),
        other => panic!("Expected Config error for a bad endpoint, got {other:?}"),
    }
}

#[test]
fn today_query_is_empty_text_from_today() {
    let query = SearchQuery::today();

    assert_eq!(query.text, "");
    assert_eq!(query.from_date, Utc::now().date_naive());
}
