#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use glowdesk_api::{ApiClient, Error, FilePart, MethodOverride, Payload};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── GET ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_deserializes_list() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Spring promo" },
            { "id": 2, "name": "Summer promo" }
        ])))
        .mount(&server)
        .await;

    #[derive(serde::Deserialize)]
    struct Row {
        id: u64,
        name: String,
    }

    let rows: Vec<Row> = client.get("admin/campaigns").await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, 1);
    assert_eq!(rows[1].name, "Summer promo");
}

#[tokio::test]
async fn get_with_params_sends_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/reports/summary"))
        .and(query_param("year", "2026"))
        .and(query_param("month", "8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 3 })))
        .mount(&server)
        .await;

    #[derive(serde::Deserialize)]
    struct Summary {
        total: u64,
    }

    let summary: Summary = client
        .get_with_params(
            "admin/reports/summary",
            &[("year", "2026".into()), ("month", "8".into())],
        )
        .await
        .unwrap();

    assert_eq!(summary.total, 3);
}

// ── Error classification ────────────────────────────────────────────

#[tokio::test]
async fn unauthorized_maps_to_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthenticated." })),
        )
        .mount(&server)
        .await;

    let result: Result<Vec<serde_json::Value>, _> = client.get("admin/bookings").await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert_eq!(message, "Unauthenticated.");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn not_found_maps_to_not_found_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result: Result<serde_json::Value, _> = client.get("admin/services/999").await;

    assert!(result.as_ref().err().is_some_and(Error::is_not_found));
}

#[tokio::test]
async fn unprocessable_entity_carries_field_errors() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/employees"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "The given data was invalid.",
            "errors": {
                "name": ["Name is required"],
                "email": ["Email must be valid", "Email is already taken"]
            }
        })))
        .mount(&server)
        .await;

    let err = client
        .post_empty("admin/employees", &json!({}))
        .await
        .unwrap_err();

    let errors = err.validation_errors().expect("validation error expected");
    assert_eq!(errors["name"], vec!["Name is required"]);
    assert_eq!(errors["email"].len(), 2);
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.delete("admin/products/1").await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn long_multibyte_error_body_is_truncated_not_split() {
    let (server, client) = setup().await;

    // Accented text straddling the 200-byte preview limit, as an HTML
    // error page might contain.
    let body = format!("{}ééééé", "x".repeat(199));
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string(body))
        .mount(&server)
        .await;

    let result: Result<Vec<serde_json::Value>, _> = client.get("admin/products").await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 500);
            assert!(message.ends_with('x'), "truncation backs off the 'é'");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn long_multibyte_success_body_preview_does_not_split() {
    let (server, client) = setup().await;

    let body = format!("{}ééééé", "x".repeat(199));
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let result: Result<Vec<serde_json::Value>, _> = client.get("admin/products").await;

    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

#[tokio::test]
async fn malformed_body_maps_to_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let result: Result<Vec<serde_json::Value>, _> = client.get("admin/finances").await;

    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

// ── 201-only POST ───────────────────────────────────────────────────

#[tokio::test]
async fn post_created_accepts_201() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/book"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    client
        .post_created("book", &json!({ "service_id": 1 }))
        .await
        .unwrap();
}

#[tokio::test]
async fn post_created_rejects_plain_200() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/book"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let result = client.post_created("book", &json!({ "service_id": 1 })).await;

    assert!(matches!(result, Err(Error::Api { status: 200, .. })));
}

// ── Payload encoding ────────────────────────────────────────────────

#[tokio::test]
async fn multipart_update_uses_post_with_method_override() {
    let (server, client) = setup().await;

    // Multipart content types carry a random boundary, so match on
    // method + path + query rather than the content-type header.
    Mock::given(method("POST"))
        .and(path("/admin/products/7"))
        .and(query_param("_method", "PUT"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let payload = Payload::Multipart {
        fields: vec![("name".into(), "Argan oil".into())],
        files: vec![FilePart::new(
            "image",
            "argan.jpg",
            "image/jpeg",
            vec![0xff, 0xd8, 0xff],
        )],
    };

    client
        .send_payload("admin/products/7", &payload, MethodOverride::Put)
        .await
        .unwrap();
}

#[tokio::test]
async fn json_payload_update_uses_put() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/admin/finances/3"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let payload = Payload::Json(json!({ "title": "Rent", "amount": 1200 }));

    client
        .send_payload("admin/finances/3", &payload, MethodOverride::Put)
        .await
        .unwrap();
}
