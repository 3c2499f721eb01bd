//! Live transport against a local mock HTTP server

use ch_registry::companies_house::{ReqwestTransport, Transport};
use ch_registry::{ClientConfig, CompaniesHouseClient, CompaniesHouseError};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new()
        .with_base_url(server.base_url())
        .with_api_key("test-key")
        .with_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn test_search_sends_query_and_basic_auth() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search/companies")
                .query_param("q", "royal")
                .query_param("items_per_page", "1")
                .header("authorization", "Basic dGVzdC1rZXk6");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "items": [{"title": "ROYAL MAIL PLC", "company_number": "08680755"}],
                    "total_results": 1
                }));
        })
        .await;

    let client = CompaniesHouseClient::from_config(&config_for(&server)).unwrap();
    let result = client.get_search_results("royal", 1).await.unwrap();

    mock.assert_async().await;
    assert_eq!(result.len(), 1);
    assert_eq!(result.rows[0].company_number, "08680755");
}

#[tokio::test]
async fn test_error_status_is_returned() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/company/00000000/officers");
            then.status(404)
                .body(r#"{"errors":[{"type":"ch:service","error":"company-profile-not-found"}]}"#);
        })
        .await;

    let client = CompaniesHouseClient::from_config(&config_for(&server)).unwrap();
    let err = client.get_officers("0").await.unwrap_err();

    match err {
        CompaniesHouseError::Status { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("company-profile-not-found"));
        }
        other => panic!("expected status error, got {other}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/company/13090621/filing-history");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let client = CompaniesHouseClient::from_config(&config_for(&server)).unwrap();
    let err = client.get_filings("13090621").await.unwrap_err();

    assert!(matches!(err, CompaniesHouseError::Parse { .. }));
}

#[tokio::test]
async fn test_get_bytes_requests_pdf() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/document/abc/content")
                .header("accept", "application/pdf");
            then.status(200).body("%PDF-1.7");
        })
        .await;

    let transport = ReqwestTransport::new(&config_for(&server)).unwrap();
    let body = transport
        .get_bytes(&server.url("/document/abc/content"), "application/pdf")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(body, b"%PDF-1.7");
}

#[tokio::test]
async fn test_unreachable_host_is_request_error() {
    let config = ClientConfig::new()
        .with_base_url("http://127.0.0.1:9")
        .with_timeout(Duration::from_secs(2));
    let client = CompaniesHouseClient::from_config(&config).unwrap();

    let err = client.get_charges("13090621").await.unwrap_err();

    assert!(matches!(err, CompaniesHouseError::Request { .. }));
}
