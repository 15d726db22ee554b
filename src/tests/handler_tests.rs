//! tests/handler_tests.rs
//! Endpoints HTTP con `actix_web::test` y dobles en memoria.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};

use crate::app::init_app;
use crate::services::call_orchestrator_service::CallOrchestrator;
use crate::services::record_store_service::CustomerStore;
use crate::tests::fakes::{call_body, sample_records, FakePlacer, FakeStore};

macro_rules! service {
    ($store:expr, $placer:expr) => {{
        let store: Arc<dyn CustomerStore> = $store;
        let orchestrator = CallOrchestrator::new(store.clone(), $placer);
        test::init_service(
            App::new()
                .app_data(web::Data::from(store))
                .app_data(web::Data::new(orchestrator))
                .configure(init_app),
        )
        .await
    }};
}

#[actix_rt::test]
async fn call_all_returns_results_for_each_pending_customer() {
    let placer = FakePlacer::rejecting(&["+15550003"], &[]);
    let app = service!(FakeStore::with_records(sample_records()), placer.clone());

    let req = test::TestRequest::post()
        .uri("/call-customer")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "results": [
                { "customerId": "rec1", "status": "success", "call": call_body("+15550001") },
                { "customerId": "rec3", "status": "failed", "error": "{\"message\":\"invalid number\"}" }
            ]
        })
    );
}

#[actix_rt::test]
async fn bare_post_without_body_means_call_all() {
    let placer = FakePlacer::accepting();
    let app = service!(FakeStore::with_records(sample_records()), placer.clone());

    let req = test::TestRequest::post().uri("/call-customer").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["results"].as_array().map(Vec::len), Some(2));
    assert_eq!(placer.called_phones(), vec!["+15550001", "+15550003"]);
}

#[actix_rt::test]
async fn malformed_body_is_rejected_without_calling_anyone() {
    let placer = FakePlacer::accepting();
    let app = service!(FakeStore::with_records(sample_records()), placer.clone());

    let req = test::TestRequest::post()
        .uri("/call-customer")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"phone\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid request body");
    assert!(placer.called_phones().is_empty());
}

#[actix_rt::test]
async fn call_single_customer_by_phone() {
    let placer = FakePlacer::accepting();
    let app = service!(FakeStore::with_records(sample_records()), placer.clone());

    let req = test::TestRequest::post()
        .uri("/call-customer")
        .set_json(json!({ "phone": "+15550001", "name": "Ana" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["results"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["results"][0]["customerId"], "rec1");
    assert_eq!(placer.called_phones(), vec!["+15550001"]);
}

#[actix_rt::test]
async fn call_endpoint_returns_500_when_store_fails() {
    let placer = FakePlacer::accepting();
    let app = service!(FakeStore::failing(), placer.clone());

    let req = test::TestRequest::post()
        .uri("/call-customer")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to fetch data from Airtable");
    assert!(body["details"]
        .as_str()
        .unwrap_or_default()
        .contains("connection refused"));
    assert!(placer.called_phones().is_empty());
}

#[actix_rt::test]
async fn list_customers_returns_pending_records() {
    let app = service!(
        FakeStore::with_records(sample_records()),
        FakePlacer::accepting()
    );

    let req = test::TestRequest::get().uri("/customers").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!([
            { "id": "rec1", "fields": { "PhoneNumber": "+15550001", "Name": "Ana" } },
            { "id": "rec3", "fields": { "PhoneNumber": "+15550003", "Feedback": "" } }
        ])
    );
}

#[actix_rt::test]
async fn list_customers_filters_by_phone() {
    let app = service!(
        FakeStore::with_records(sample_records()),
        FakePlacer::accepting()
    );

    let req = test::TestRequest::get()
        .uri("/customers?phone=%2B15550002")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["id"], "rec2");
}

#[actix_rt::test]
async fn list_customers_returns_500_when_store_fails() {
    let app = service!(FakeStore::failing(), FakePlacer::accepting());

    let req = test::TestRequest::get().uri("/customers").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to fetch data from Airtable");
    assert!(body.get("details").is_some());
}
