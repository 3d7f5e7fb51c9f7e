//! Tests for the HTTP module

use super::*;
use crate::config::Config;
use crate::error::Error;
use crate::pagination::{PageFetcher, PageRequest};
use crate::types::PageSize;
use serde_json::json;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    HttpClient::with_config(config).unwrap()
}

// ============================================================================
// HttpClient Tests
// ============================================================================

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.user_agent.starts_with("page-aggregator/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .header("X-Xapp-Token", "token")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Xapp-Token"),
        Some(&"token".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_query() {
    let config = RequestConfig::new()
        .query("page", "1")
        .query("size", "10")
        .query("page", "2");

    assert_eq!(config.query.len(), 2);
    assert_eq!(config.query.get("page"), Some(&"2".to_string()));
    assert_eq!(config.query.get("size"), Some(&"10".to_string()));
}

#[tokio::test]
async fn test_http_client_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 42})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let data: serde_json::Value = client
        .get_json("/api/data", RequestConfig::new().query("page", "1"))
        .await
        .unwrap();

    assert_eq!(data["value"], 42);
}

#[tokio::test]
async fn test_http_client_sends_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/protected"))
        .and(header("X-Xapp-Token", "secret123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Xapp-Token", "secret123")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let data: serde_json::Value = client
        .get_json("/api/protected", RequestConfig::new())
        .await
        .unwrap();
    assert_eq!(data, json!([]));
}

#[tokio::test]
async fn test_http_client_404_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Sale not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_json::<serde_json::Value>("/api/missing", RequestConfig::new())
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Sale not found");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_500_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_json::<serde_json::Value>("/api/flaky", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_http_client_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(50))
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let err = client
        .get_json::<serde_json::Value>("/api/slow", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_http_client_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/garbage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_json::<serde_json::Value>("/api/garbage", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::JsonParse(_)));
}

// ============================================================================
// extract_records Tests
// ============================================================================

#[test]
fn test_extract_records_top_level_array() {
    let records = extract_records(json!([{"id": 1}, {"id": 2}]), None).unwrap();
    assert_eq!(records, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[test]
fn test_extract_records_nested_path() {
    let body = json!({"data": {"items": [{"id": "a"}]}, "total": 1});

    let records = extract_records(body.clone(), Some("data.items")).unwrap();
    assert_eq!(records, vec![json!({"id": "a"})]);

    let records = extract_records(body, Some("$.data.items")).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn test_extract_records_missing_field() {
    let err = extract_records(json!({"data": []}), Some("results")).unwrap_err();
    assert!(err.to_string().contains("field 'results' not found"));
}

#[test]
fn test_extract_records_not_an_array() {
    let err = extract_records(json!({"data": []}), None).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(err.to_string().contains("found object"));

    let err = extract_records(json!({"data": 5}), Some("data")).unwrap_err();
    assert!(err.to_string().contains("found number"));
}

// ============================================================================
// HttpPageFetcher Tests
// ============================================================================

#[test]
fn test_resource_url_encodes_identifier() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.artsy.net/")
        .build();
    let fetcher = HttpPageFetcher::new(HttpClient::with_config(config).unwrap());

    let url = fetcher.resource_url("spring sale/2024").unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.artsy.net/api/v1/sale/spring%20sale%2F2024/sale_artworks"
    );
}

#[test_case("." ; "single dot")]
#[test_case(".." ; "double dot")]
fn test_resource_url_rejects_dot_segments(identifier: &str) {
    let config = HttpClientConfig::builder()
        .base_url("https://api.artsy.net/")
        .build();
    let fetcher = HttpPageFetcher::new(HttpClient::with_config(config).unwrap());

    let err = fetcher.resource_url(identifier).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "identifier"));
}

#[test]
fn test_resource_url_allows_longer_dot_runs() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.artsy.net/")
        .build();
    let fetcher = HttpPageFetcher::new(HttpClient::with_config(config).unwrap());

    let url = fetcher.resource_url("...").unwrap();
    assert_eq!(url.as_str(), "https://api.artsy.net/api/v1/sale/.../sale_artworks");
}

#[test]
fn test_resource_url_keeps_base_path() {
    let config = HttpClientConfig::builder()
        .base_url("https://example.com/v2")
        .build();
    let fetcher = HttpPageFetcher::new(HttpClient::with_config(config).unwrap())
        .with_path("/collections/{id}/items");

    let url = fetcher.resource_url("c-1").unwrap();
    assert_eq!(url.as_str(), "https://example.com/v2/collections/c-1/items");
}

#[test]
fn test_resource_url_requires_base_url() {
    let fetcher = HttpPageFetcher::new(HttpClient::new().unwrap());
    let err = fetcher.resource_url("sale-1").unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { .. }));
}

#[tokio::test]
async fn test_fetch_page_sends_page_and_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sale/sale-1/sale_artworks"))
        .and(query_param("page", "3"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "sa-21"},
            {"id": "sa-22"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::new(client_for(&mock_server));
    let request = PageRequest::new("sale-1", 3, PageSize::default());
    let items = fetcher.fetch_page(&request).await.unwrap();

    assert_eq!(items, vec![json!({"id": "sa-21"}), json!({"id": "sa-22"})]);
}

#[tokio::test]
async fn test_fetch_page_custom_params_and_records_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/c-9/items"))
        .and(query_param("p", "1"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 1}, {"id": 2}],
            "next": null
        })))
        .mount(&mock_server)
        .await;

    let config = Config {
        base_url: Some(mock_server.uri()),
        path: "/collections/{id}/items".to_string(),
        page_size: PageSize::new(2).unwrap(),
        page_param: "p".to_string(),
        size_param: "per_page".to_string(),
        records_path: Some("results".to_string()),
        ..Config::default()
    };
    let fetcher = HttpPageFetcher::from_config(&config).unwrap();

    let request = PageRequest::new("c-9", 1, config.page_size);
    let items = fetcher.fetch_page(&request).await.unwrap();

    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_fetch_page_rejects_shared_query_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::new(client_for(&mock_server)).with_params("p", "p");
    let request = PageRequest::new("sale-1", 1, PageSize::default());
    let err = fetcher.fetch_page(&request).await.unwrap_err();

    assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "size_param"));
}

#[tokio::test]
async fn test_fetch_page_dot_identifier_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::new(client_for(&mock_server));
    let request = PageRequest::new("..", 1, PageSize::default());

    assert!(fetcher.fetch_page(&request).await.is_err());
}

#[test]
fn test_from_config_validates() {
    let err = HttpPageFetcher::from_config(&Config::default()).unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { .. }));
}

#[tokio::test]
async fn test_fetcher_builder_overrides() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/artists/banksy/artworks"))
        .and(query_param("offset_page", "2"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_embedded": {"artworks": [{"id": "aw-6"}]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpPageFetcher::new(client_for(&mock_server))
        .with_path("/v1/artists/{id}/artworks")
        .with_params("offset_page", "limit")
        .with_records_path("_embedded.artworks");
    assert!(fetcher.client().base_url().is_some());

    let request = PageRequest::new("banksy", 2, PageSize::new(5).unwrap());
    let items = fetcher.fetch_page(&request).await.unwrap();

    assert_eq!(items, vec![json!({"id": "aw-6"})]);
}
