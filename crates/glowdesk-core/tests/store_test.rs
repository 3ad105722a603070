#![allow(clippy::unwrap_used)]
// Integration tests for the entity store, against a mock backend.

use std::sync::Arc;
use std::time::Duration;

use glowdesk_api::{ApiClient, FilePart, Payload};
use glowdesk_core::error::CoreError;
use glowdesk_core::store::{Confirmation, EntityKind, MAX_IMAGE_BYTES, Store};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, Store) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let api = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, Store::new(Arc::new(api)))
}

fn product_json(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "sku": format!("SKU-{id:03}"),
        "category": "hair",
        "supplier": "Acme Beauty",
        "quantity": 5,
        "price": 9.99,
        "image": null,
    })
}

// ── Read lifecycle ───────────────────────────────────────────────────

#[tokio::test]
async fn fetch_all_replaces_items_wholesale() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([product_json(1, "Shampoo")])),
        )
        .mount(&server)
        .await;

    store.products().fetch_all().await;

    let state = store.products().snapshot();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].name, "Shampoo");
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn fetch_failure_keeps_last_known_items() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([product_json(1, "Shampoo")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    store.products().fetch_all().await;

    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;
    store.products().fetch_all().await;

    let state = store.products().snapshot();
    assert_eq!(state.items.len(), 1, "failed refresh must not blank the list");
    assert!(state.error.is_some());
    assert!(!state.loading);
}

#[tokio::test]
async fn concurrent_fetches_last_resolved_wins() {
    let (server, store) = setup().await;

    // First request matches the delayed mock; the second resolves
    // immediately. The slow response lands last and wins.
    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(1, "Slow")]))
                .set_delay(Duration::from_millis(200)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product_json(2, "Fast")])))
        .mount(&server)
        .await;

    let products = store.products();
    tokio::join!(products.fetch_all(), products.fetch_all());

    let state = store.products().snapshot();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].name, "Slow");
}

// ── Write lifecycle ──────────────────────────────────────────────────

#[tokio::test]
async fn create_refetches_collection() {
    let (server, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/products"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(1, "Shampoo"), product_json(2, "Wax")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = store
        .products()
        .create(Payload::Json(json!({"name": "Wax"})))
        .await;

    assert!(result.is_ok());
    assert_eq!(store.products().snapshot().items.len(), 2);
}

#[tokio::test]
async fn validation_failure_sets_field_errors_and_rethrows() {
    let (server, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/products"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "The given data was invalid.",
            "errors": {"name": ["The name field is required."]},
        })))
        .mount(&server)
        .await;

    let result = store.products().create(Payload::Json(json!({}))).await;

    let err = match result {
        Err(e) => e,
        Ok(()) => panic!("422 must surface as an error"),
    };
    assert!(err.validation_errors().is_some());

    let state = store.products().snapshot();
    assert_eq!(
        state.field_errors.as_ref().and_then(|m| m.get("name")),
        Some(&vec!["The name field is required.".to_owned()])
    );
    assert!(
        state.error.is_none(),
        "validation failures must not touch the generic error slot"
    );
    assert!(state.items.is_empty(), "items unchanged on write failure");
}

#[tokio::test]
async fn booking_delete_splices_locally_without_refetch() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bookings": [
                {"id": 1, "name": "Ana", "email": "ana@example.com", "phone": "1",
                 "service_id": 1, "status": "confirmed", "date": "2026-08-30"},
                {"id": 2, "name": "Bo", "email": "bo@example.com", "phone": "2",
                 "service_id": 1, "status": "pending", "date": "2026-08-30"},
                {"id": 3, "name": "Cy", "email": "cy@example.com", "phone": "3",
                 "service_id": 2, "status": "pending", "date": "2026-08-31"},
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/bookings/2"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    store.bookings().fetch_all().await;
    let result = store.bookings().delete(2).await;

    assert!(result.is_ok());
    let ids: Vec<u64> = store.bookings().snapshot().items.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 3], "order of survivors is preserved");
}

#[tokio::test]
async fn failed_delete_leaves_items_untouched() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bookings": [
                {"id": 1, "name": "Ana", "email": "ana@example.com", "phone": "1",
                 "service_id": 1, "status": "confirmed", "date": "2026-08-30"},
            ],
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/bookings/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "nope"})))
        .mount(&server)
        .await;

    store.bookings().fetch_all().await;
    let result = store.bookings().delete(1).await;

    assert!(result.is_err());
    assert_eq!(store.bookings().snapshot().items.len(), 1);
}

// ── Gallery upload cap ───────────────────────────────────────────────

#[tokio::test]
async fn oversized_gallery_upload_is_rejected_locally() {
    let (server, store) = setup().await;

    // No POST mock mounted: an oversized file must never reach the wire.
    let oversized = FilePart::new(
        "images[]",
        "huge.jpg",
        "image/jpeg",
        vec![0u8; MAX_IMAGE_BYTES + 1],
    );
    let result = store.gallery().upload(vec![oversized]).await;

    match result {
        Err(CoreError::AssetTooLarge { size_bytes, .. }) => {
            assert_eq!(size_bytes, MAX_IMAGE_BYTES + 1);
        }
        other => panic!("expected AssetTooLarge, got {other:?}"),
    }
    assert!(store.gallery().snapshot().error.is_some());
    assert!(server.received_requests().await.is_none_or(|r| r.is_empty()));
}

#[tokio::test]
async fn rejected_gallery_upload_field_errors_are_clearable() {
    let (server, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/gallery"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "The given data was invalid.",
            "errors": {"images.0": ["The image must not be greater than 2048 kilobytes."]},
        })))
        .mount(&server)
        .await;

    let small = FilePart::new("images[]", "ok.jpg", "image/jpeg", vec![0u8; 16]);
    let result = store.gallery().upload(vec![small]).await;

    assert!(result.is_err());
    assert!(store.gallery().snapshot().field_errors.is_some());

    store.gallery().clear_field_errors();
    assert!(store.gallery().snapshot().field_errors.is_none());
}

// ── Confirmation slot ────────────────────────────────────────────────

#[tokio::test]
async fn confirmation_requests_replace_each_other() {
    let (_server, store) = setup().await;

    assert!(!store.pending_confirmation().is_pending());

    store.request_delete(EntityKind::Product, 4);
    assert_eq!(
        store.pending_confirmation(),
        Confirmation::PendingDelete {
            entity: EntityKind::Product,
            id: 4
        }
    );

    store.request_discard();
    assert_eq!(store.pending_confirmation(), Confirmation::PendingDiscard);

    store.clear_confirmation();
    assert_eq!(store.pending_confirmation(), Confirmation::None);
}

// ── Auth slice ───────────────────────────────────────────────────────

#[tokio::test]
async fn check_auth_latches_even_when_unauthenticated() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthenticated."})))
        .mount(&server)
        .await;

    assert!(!store.auth().snapshot().auth_checked);
    store.auth().check_auth().await;

    let state = store.auth().snapshot();
    assert!(state.auth_checked);
    assert!(state.user.is_none());
}

#[tokio::test]
async fn login_populates_session_user() {
    let (server, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 7, "name": "Mia", "email": "mia@example.com", "role": "admin"},
        })))
        .mount(&server)
        .await;

    let result = store
        .auth()
        .login("mia@example.com", &"secret".into())
        .await;

    assert!(result.is_ok());
    let state = store.auth().snapshot();
    assert!(state.auth_checked);
    assert_eq!(state.user.map(|u| u.id), Some(7));
}

#[tokio::test]
async fn logout_clears_user_even_when_server_fails() {
    let (server, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 7, "name": "Mia", "email": "mia@example.com", "role": "admin"},
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let _ = store.auth().login("mia@example.com", &"secret".into()).await;
    let result = store.auth().logout().await;

    assert!(result.is_err());
    assert!(
        store.auth().snapshot().user.is_none(),
        "a half-dead session must not look signed in"
    );
}

#[tokio::test]
async fn password_reset_link_posts_to_password_email() {
    let (server, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/password/email"))
        .and(body_partial_json(json!({"email": "mia@example.com"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let result = store.auth().send_password_reset_link("mia@example.com").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn password_reset_posts_token_and_confirmation() {
    let (server, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/password/reset"))
        .and(body_partial_json(json!({
            "email": "mia@example.com",
            "password": "n3w-secret",
            "password_confirmation": "n3w-secret",
            "token": "tok-123",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let result = store
        .auth()
        .reset_password("mia@example.com", &"n3w-secret".into(), "tok-123")
        .await;
    assert!(result.is_ok());
}

// ── Reports ──────────────────────────────────────────────────────────

#[tokio::test]
async fn report_sections_fail_independently() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/reports/summary"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/reports/popular-services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"serviceName": "Haircut", "timesBooked": 12, "revenue": 480.0},
        ])))
        .mount(&server)
        .await;

    store.reports().fetch_summary(2026, 8).await;
    store.reports().fetch_popular_services(2026, 8).await;

    let state = store.reports().snapshot();
    assert!(state.summary.is_none());
    assert_eq!(state.popular_services.len(), 1);
    assert_eq!(state.popular_services[0].service_name, "Haircut");
}

// ── Public booking flow ──────────────────────────────────────────────

#[tokio::test]
async fn booking_submission_succeeds_only_on_created() {
    let (server, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/book"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;

    let request = glowdesk_core::model::BookingRequest {
        service_id: 1,
        name: "Ana".into(),
        email: "ana@example.com".into(),
        phone: "555".into(),
        date: "2026-09-01".parse().unwrap(),
        start_time: "10:00".into(),
        end_time: "10:30".into(),
        payment_method: "cash".into(),
        total: 40.0,
    };
    let result = store.booking_flow().submit(&request).await;

    assert!(result.is_err(), "2xx other than 201 is not a confirmation");
    let state = store.booking_flow().snapshot();
    assert!(!state.success);
    assert!(state.error.is_some());
}

#[tokio::test]
async fn slot_fetch_clears_stale_slots_up_front() {
    let (server, store) = setup().await;

    Mock::given(method("GET"))
        .and(path("/available-slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"start_time": "10:00", "end_time": "10:30"},
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/available-slots"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let date = "2026-09-01".parse().unwrap();
    store.booking_flow().fetch_available_slots(date, 1).await;
    assert_eq!(store.booking_flow().snapshot().slots.len(), 1);

    store.booking_flow().fetch_available_slots(date, 1).await;
    let state = store.booking_flow().snapshot();
    assert!(
        state.slots.is_empty(),
        "a failed lookup must not leave yesterday's availability on screen"
    );
    assert!(state.error.is_some());
}
