//! End-to-end search flow against a mocked site: remote harvest over HTTP,
//! fetch-failure degradation, document classification, and ranked queries.

use site_search::harvest::{HttpTransport, StaticPageProvider};
use site_search::{Config, SiteSearch};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body><p>{}</p></body></html>",
        title, body
    )
}

async fn engine_for(server: &MockServer, pages: &[&str]) -> SiteSearch {
    let mut config = Config::default();
    config.site.base_url = server.uri();
    config.site.pages = pages.iter().map(|p| p.to_string()).collect();

    let transport = Arc::new(HttpTransport::new(&config).unwrap());
    let provider = Arc::new(StaticPageProvider::empty("index.html"));
    SiteSearch::new(config, provider, transport).unwrap()
}

#[tokio::test]
async fn builds_index_over_http_and_ranks_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pages/about/about-us.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(
            "About Us",
            "The Federal School of Surveying trains surveyors and cartographers.",
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pages/programmes.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(
            "Surveying & Geoinformatics",
            "Programme covering geodesy, photogrammetry, and hydrography.",
        )))
        .mount(&server)
        .await;

    let engine = engine_for(
        &server,
        &["pages/about/about-us.html", "pages/programmes.html"],
    )
    .await;

    let results = engine.query("surveying").await;
    assert_eq!(results.len(), 2);
    // Title match outranks the body-only match
    assert_eq!(results[0].record.title, "Surveying & Geoinformatics");
    assert_eq!(results[0].score, 30);
    assert_eq!(results[1].record.title, "About Us");
    assert_eq!(results[1].score, 10);
    assert!(results[1].excerpt.to_lowercase().contains("surveying"));
}

#[tokio::test]
async fn failed_fetch_degrades_to_filename_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pages/about/anthem.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let engine = engine_for(&server, &["pages/about/anthem.html"]).await;

    // The filename-only record matches by title, scores 30, carries no body
    let results = engine.query("anthem").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.title, "anthem.html");
    assert_eq!(results[0].record.body, "");
    assert_eq!(results[0].score, 30);
    assert_eq!(results[0].excerpt, "");

    // And nothing else matches it
    assert!(engine.query("hymn").await.is_empty());
}

#[tokio::test]
async fn documents_index_by_filename_without_a_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pdf/handbook.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let engine = engine_for(&server, &["pdf/handbook.pdf"]).await;

    let results = engine.query("handbook").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.title, "handbook.pdf");
    assert_eq!(results[0].record.body, "");
}

#[tokio::test]
async fn duplicate_page_entries_index_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pages/news.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page("News", "Matriculation ceremony scheduled.")),
        )
        .mount(&server)
        .await;

    let engine = engine_for(&server, &["pages/news.html", "pages/news.html"]).await;

    let results = engine.query("matriculation").await;
    assert_eq!(results.len(), 1);
}
