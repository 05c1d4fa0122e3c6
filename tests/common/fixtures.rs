//! Guardian payload fixtures and mock endpoint helpers

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One well-formed search result
///
/// # Arguments
/// * `headline` - Headline text, also woven into the article URL
/// * `thumbnail_url` - Full URL of the thumbnail, or `None` to omit the field
///   (omission is fatal to extraction, which some tests rely on)
pub fn article_result(headline: &str, thumbnail_url: Option<&str>) -> Value {
    let slug = headline.to_lowercase().replace(' ', "-");
    let mut fields = json!({ "headline": headline });
    if let Some(url) = thumbnail_url {
        fields["thumbnail"] = json!(url);
    }
    json!({
        "id": format!("world/2024/mar/07/{slug}"),
        "type": "article",
        "sectionId": "world",
        "sectionName": "World news",
        "webPublicationDate": "2024-03-07T18:30:00Z",
        "webTitle": headline,
        "webUrl": format!("https://www.theguardian.com/world/2024/mar/07/{slug}"),
        "apiUrl": format!("https://content.guardianapis.com/world/2024/mar/07/{slug}"),
        "tags": [
            {
                "id": "profile/jane-doe",
                "type": "contributor",
                "webTitle": "Jane Doe"
            }
        ],
        "fields": fields
    })
}

/// Wrap results in the full response envelope
pub fn search_body(results: &[Value]) -> String {
    json!({
        "response": {
            "status": "ok",
            "userTier": "developer",
            "total": results.len(),
            "results": results
        }
    })
    .to_string()
}

/// Minimal PNG body; the trailing marker byte tells payloads apart
pub fn png_bytes(marker: u8) -> Vec<u8> {
    vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, marker]
}

/// Mount a 200 search response at `/search`
pub async fn mount_search(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mount a 200 image response at the given path
pub async fn mount_thumbnail(server: &MockServer, image_path: &str, bytes: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(image_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(bytes)
                .insert_header("content-type", "image/png"),
        )
        .mount(server)
        .await;
}
