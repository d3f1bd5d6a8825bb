//! In-process client tests against a wiremock WHM.

use std::{env, time::Duration};

use cpanel_gateway::{
    models::{HttpMethod, Parameters, RelayError},
    services::WhmApiClient,
};
use serde_json::json;
use serial_test::serial;
use wiremock::{
    matchers::{body_string_contains, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use crate::integration::common::{credentials, unreachable_host};

const CREDENTIAL_VARS: [&str; 6] = [
    "WHM_HOST",
    "WHM_USER",
    "WHM_API_TOKEN",
    "CPANEL_HOST",
    "CPANEL_USER",
    "CPANEL_API_TOKEN",
];

fn clear_credentials() {
    for key in CREDENTIAL_VARS {
        env::remove_var(key);
    }
}

#[tokio::test]
async fn test_whm_call_get_uses_query_without_api_version() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json-api/listaccts"))
        .and(query_param("search", "bob"))
        .and(header("Authorization", "whm root:INTEGRATIONTOKEN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"acct": []}})))
        .expect(1)
        .mount(&upstream)
        .await;

    let client = WhmApiClient::new(credentials(&upstream.uri()), Duration::from_secs(5)).unwrap();
    let params: Parameters = [("search".to_string(), "bob".to_string())].into();
    let body = client
        .whm_call("listaccts", HttpMethod::Get, params)
        .await
        .unwrap();
    assert_eq!(body, json!({"data": {"acct": []}}));

    let received = upstream.received_requests().await.unwrap();
    assert!(!received[0].url.query().unwrap_or_default().contains("api.version"));
}

#[tokio::test]
async fn test_uapi_call_uses_protocol_version_2() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/json-api/cpanel"))
        .and(body_string_contains("cpanel_jsonapi_apiversion=2"))
        .and(body_string_contains("cpanel_jsonapi_user=bob"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"data": []}})))
        .expect(1)
        .mount(&upstream)
        .await;

    let client = WhmApiClient::new(credentials(&upstream.uri()), Duration::from_secs(5)).unwrap();
    let body = client
        .uapi_call("bob", "Email", "list_pops", Parameters::new())
        .await
        .unwrap();

    assert_eq!(body, json!({"result": {"data": []}}));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let client =
        WhmApiClient::new(credentials(&unreachable_host()), Duration::from_secs(5)).unwrap();

    let err = client
        .whm_call("version", HttpMethod::Get, Parameters::new())
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Transport { .. }));
}

#[tokio::test]
#[serial]
async fn test_from_env_with_aliases() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json-api/version"))
        .and(header("Authorization", "whm reseller:ALIASTOKEN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "11.110"})))
        .expect(1)
        .mount(&upstream)
        .await;

    clear_credentials();
    env::set_var("CPANEL_HOST", upstream.uri());
    env::set_var("CPANEL_USER", "reseller");
    env::set_var("CPANEL_API_TOKEN", "ALIASTOKEN");

    let client = WhmApiClient::from_env().unwrap();
    clear_credentials();

    let body = client
        .whm_call("version", HttpMethod::Get, Parameters::new())
        .await
        .unwrap();
    assert_eq!(body["version"], "11.110");
}

#[test]
#[serial]
fn test_from_env_reports_missing_configuration() {
    clear_credentials();
    env::set_var("WHM_HOST", "https://whm.example.com:2087");

    let err = match WhmApiClient::from_env() {
        Ok(_) => panic!("client should not build without credentials"),
        Err(e) => e,
    };
    clear_credentials();

    match err {
        RelayError::Configuration(config) => {
            assert_eq!(config.missing_fields(), &["WHM_USER", "WHM_API_TOKEN"]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
