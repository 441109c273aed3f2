//! Router behaviour over real HTTP requests, without binding a socket.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use metashell::{MetaShell, SiteConfig};
use metashell_server::{router, AppState};
use tower::ServiceExt;

const TEMPLATE: &str = concat!(
    "<html><head><title>Site</title>",
    r#"<meta property="og:title" content="">"#,
    r#"<meta property="og:description" content="">"#,
    r#"<meta property="og:url" content="">"#,
    "</head></html>"
);

fn config() -> SiteConfig {
    SiteConfig::from_json_str(
        r#"{
            "domain": "https://example.com",
            "default_tags": {
                "title": "Site",
                "description": { "en": "Hello", "fr": "Bonjour" },
                "url": ""
            },
            "sitemap": {
                "": { "title": "Home", "items": { "about": { "title": "About" } } }
            }
        }"#,
    )
    .unwrap()
}

fn state() -> AppState {
    AppState::new(MetaShell::new(config(), TEMPLATE).unwrap())
}

async fn get(state: AppState, uri: &str) -> (StatusCode, String, Option<String>) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap(), content_type)
}

#[tokio::test]
async fn test_found_route() {
    let (status, body, content_type) = get(state(), "/about").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(body.contains("<title>Site | About</title>"));
    assert!(body.contains(r#"property="og:title" content="Site | About""#));
    assert!(body.contains(r#"property="og:url" content="https://example.com/about""#));
}

#[tokio::test]
async fn test_not_found_route_serves_template() {
    let (status, body, _) = get(state(), "/about/team").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, TEMPLATE);
}

#[tokio::test]
async fn test_query_selects_language_and_is_not_part_of_path() {
    let (status, body, _) = get(state(), "/about?lang=fr").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"property="og:description" content="Bonjour""#));
    assert!(body.contains(r#"property="og:url" content="https://example.com/about""#));
}

#[tokio::test]
async fn test_repeated_or_odd_query_still_renders() {
    let (status, body, _) = get(state(), "/?lang=fr&lang=en").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"property="og:description" content="Bonjour""#));

    for uri in ["/?utm=1&lang=fr", "/?lang=%FF", "/?lang", "/?&&=x"] {
        let (status, body, _) = get(state(), uri).await;
        assert_eq!(status, StatusCode::OK, "uri {uri}");
        assert!(body.contains("<title>Site | Home</title>"), "uri {uri}");
    }

    let (status, _, _) = get(state(), "/about/team?lang=fr&lang=en").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_get_is_rejected() {
    let response = router(state())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/about")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_reload_template_reads_disk_per_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");
    std::fs::write(&path, "<title>v1</title>").unwrap();
    let state = state().reload_template_from(path.clone());

    let (_, first, _) = get(state.clone(), "/").await;
    assert_eq!(first, "<title>Site | Home</title>");

    std::fs::write(&path, "<p>v2</p><title></title>").unwrap();
    let (_, second, _) = get(state, "/").await;
    assert_eq!(second, "<p>v2</p><title>Site | Home</title>");
}

#[tokio::test]
async fn test_reload_template_missing_file_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let state = state().reload_template_from(dir.path().join("gone.html"));
    let (status, _, _) = get(state, "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
