//! Relay routes exercised end to end against a wiremock WHM.

use actix_web::{test, App};
use cpanel_gateway::{api::routes::configure_routes, metrics::middleware::MetricsMiddleware};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_string_contains, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use crate::integration::common::{app_state, unconfigured_state, unreachable_host, API_TOKEN};

macro_rules! gateway {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(MetricsMiddleware)
                .app_data($state)
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_success_is_passed_through_unchanged() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json-api/listaccts"))
        .and(query_param("api.version", "1"))
        .and(query_param("search", "bob"))
        .and(header("Authorization", "whm root:INTEGRATIONTOKEN"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"result": "ok"})))
        .expect(1)
        .mount(&upstream)
        .await;
    let app = gateway!(app_state(&upstream.uri()));

    let req = test::TestRequest::get()
        .uri("/whmapi/listaccts?search=bob")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"result": "ok"}));
}

#[actix_web::test]
async fn test_upstream_error_envelope() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json-api/listaccts"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"cpanelresult": {"error": "Access denied"}})),
        )
        .mount(&upstream)
        .await;
    let app = gateway!(app_state(&upstream.uri()));

    let req = test::TestRequest::get()
        .uri("/whmapi/listaccts?search=bob")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 403);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "HTTP Error from WHM server.");
    assert_eq!(
        body["cpanel_response"],
        json!({"cpanelresult": {"error": "Access denied"}})
    );
    let details = body["details"].as_str().unwrap();
    assert!(details.starts_with("403 Client Error: Forbidden for url: "));
    assert!(!details.contains("search=bob"));
    assert!(!body.to_string().contains(API_TOKEN));
}

#[actix_web::test]
async fn test_raw_text_error_body_is_kept() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/json-api/createacct"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal failure"))
        .mount(&upstream)
        .await;
    let app = gateway!(app_state(&upstream.uri()));

    let req = test::TestRequest::post()
        .uri("/whmapi/createacct")
        .set_form([("username", "bob")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "HTTP Error from WHM server.");
    assert_eq!(body["cpanel_response"], "Internal failure");
}

#[actix_web::test]
async fn test_unreachable_upstream_is_503() {
    let app = gateway!(app_state(&unreachable_host()));

    let req = test::TestRequest::get().uri("/whmapi/version").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 503);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Failed to connect to WHM server.");
    assert!(body.get("cpanel_response").is_none());
}

#[actix_web::test]
async fn test_non_json_success_is_500() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&upstream)
        .await;
    let app = gateway!(app_state(&upstream.uri()));

    let req = test::TestRequest::get().uri("/whmapi/version").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "An internal server error occurred.");
}

#[actix_web::test]
async fn test_uapi_post_form_is_proxied_through_cpanel() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/json-api/cpanel"))
        .and(query_param("api.version", "1"))
        .and(body_string_contains("cpanel_jsonapi_user=bob"))
        .and(body_string_contains("cpanel_jsonapi_module=Mysql"))
        .and(body_string_contains("cpanel_jsonapi_func=create_database"))
        .and(body_string_contains("cpanel_jsonapi_apiversion=3"))
        .and(body_string_contains("name=bob_db"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"status": 1}})))
        .expect(1)
        .mount(&upstream)
        .await;
    let app = gateway!(app_state(&upstream.uri()));

    let req = test::TestRequest::post()
        .uri("/uapi/bob/Mysql/create_database")
        .set_form([("name", "bob_db"), ("cpanel_jsonapi_user", "root")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"result": {"status": 1}}));
}

#[actix_web::test]
async fn test_uapi_post_json_is_relayed_as_json() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/json-api/cpanel"))
        .and(header("content-type", "application/json"))
        .and(body_string_contains(r#""cpanel_jsonapi_apiversion":"3""#))
        .and(body_string_contains(r#""quota":"250""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {}})))
        .expect(1)
        .mount(&upstream)
        .await;
    let app = gateway!(app_state(&upstream.uri()));

    let req = test::TestRequest::post()
        .uri("/uapi/bob/Email/add_pop")
        .set_json(json!({"email": "info", "quota": 250}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_identical_calls_are_not_deduplicated() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json-api/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "11.110"})))
        .expect(2)
        .mount(&upstream)
        .await;
    let app = gateway!(app_state(&upstream.uri()));

    for _ in 0..2 {
        let req = test::TestRequest::get().uri("/whmapi/version").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }
}

#[actix_web::test]
async fn test_unconfigured_gateway_never_calls_upstream() {
    let upstream = MockServer::start().await;
    let app = gateway!(unconfigured_state());

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");

    let req = test::TestRequest::get().uri("/whmapi/listaccts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let req = test::TestRequest::post()
        .uri("/uapi/bob/Email/list_pops")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let received = upstream.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[actix_web::test]
async fn test_status_probe_reports_configuration() {
    let upstream = MockServer::start().await;
    let app = gateway!(app_state(&upstream.uri()));

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["whm_host"], upstream.uri());
    assert_eq!(body["whm_user"], "root");
    assert!(!body.to_string().contains(API_TOKEN));
}

#[actix_web::test]
async fn test_metrics_record_relay_requests() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&upstream)
        .await;
    let app = gateway!(app_state(&upstream.uri()));

    let req = test::TestRequest::get().uri("/whmapi/version").to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(text.contains("requests_total"));
    assert!(text.contains("/whmapi/{function}"));
    assert!(text.contains("upstream_calls_total"));
}

#[actix_web::test]
async fn test_encoded_slashes_cannot_escape_json_api() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&upstream)
        .await;
    let app = gateway!(app_state(&upstream.uri()));

    let req = test::TestRequest::get()
        .uri("/whmapi/..%2F..%2Fscripts%2Fsecret")
        .to_request();
    test::call_service(&app, req).await;

    let received = upstream.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].url.path().starts_with("/json-api/"));
    assert!(!received[0].url.path().starts_with("/scripts"));
}

#[actix_web::test]
async fn test_encoded_query_in_function_is_not_injected() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&upstream)
        .await;
    let app = gateway!(app_state(&upstream.uri()));

    let req = test::TestRequest::get()
        .uri("/whmapi/listaccts%3Fapi.version=0")
        .to_request();
    test::call_service(&app, req).await;

    let received = upstream.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let versions: Vec<String> = received[0]
        .url
        .query_pairs()
        .filter(|(key, _)| key == "api.version")
        .map(|(_, value)| value.into_owned())
        .collect();
    assert_eq!(versions, vec!["1".to_string()]);
}
