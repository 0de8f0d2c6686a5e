use actix_web::{App, http::StatusCode, test, web};
use pretty_assertions::assert_eq;
use serial_test::serial;

use crewcal::handlers::blocks;

mod common;

macro_rules! blocks_app {
    ($ctx:expr) => {
        test::init_service(
            App::new().app_data(web::Data::new($ctx.slots.clone())).service(
                web::scope("/api/v1/blocks")
                    .route("", web::get().to(blocks::get_blocks))
                    .route("", web::post().to(blocks::create_block))
                    .route("/{id}", web::put().to(blocks::update_block))
                    .route("/{id}", web::delete().to(blocks::delete_block)),
            ),
        )
        .await
    };
}

fn block_json(start: &str, end: &str) -> serde_json::Value {
    serde_json::json!({
        "startTime": start,
        "endTime": end,
        "coverageType": "half"
    })
}

#[actix_web::test]
#[serial]
async fn tenants_cannot_author_blocks() {
    let ctx = common::TestContext::new().await.unwrap();
    let app = blocks_app!(ctx);

    let mut req = test::TestRequest::post()
        .uri("/api/v1/blocks")
        .set_json(block_json("2025-06-01T09:00:00", "2025-06-01T12:00:00"));
    for (name, value) in common::agency_headers(3) {
        req = req.insert_header((name, value));
    }
    let resp = test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(ctx.slots.list_blocks(None, None).await.unwrap().is_empty());
}

#[actix_web::test]
#[serial]
async fn ops_can_create_update_and_delete_blocks() {
    let ctx = common::TestContext::new().await.unwrap();
    let app = blocks_app!(ctx);

    let mut req = test::TestRequest::post()
        .uri("/api/v1/blocks")
        .set_json(block_json("2025-06-01T09:00:00", "2025-06-01T12:00:00"));
    for (name, value) in common::ops_headers() {
        req = req.insert_header((name, value));
    }
    let body: serde_json::Value = test::call_and_read_body_json(&app, req.to_request()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["coverageType"], "half");
    assert_eq!(body["data"]["isBooked"], false);
    let block_id = body["data"]["id"].as_i64().unwrap();

    let mut req = test::TestRequest::put()
        .uri(&format!("/api/v1/blocks/{}", block_id))
        .set_json(serde_json::json!({
            "startTime": "2025-06-01T10:00:00",
            "endTime": "2025-06-01T13:00:00"
        }));
    for (name, value) in common::ops_headers() {
        req = req.insert_header((name, value));
    }
    let body: serde_json::Value = test::call_and_read_body_json(&app, req.to_request()).await;
    assert_eq!(body["data"]["coverageType"], "full");

    let mut req = test::TestRequest::delete().uri(&format!("/api/v1/blocks/{}", block_id));
    for (name, value) in common::ops_headers() {
        req = req.insert_header((name, value));
    }
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    assert!(ctx.slots.list_blocks(None, None).await.unwrap().is_empty());
}

#[actix_web::test]
#[serial]
async fn zero_length_blocks_are_rejected_before_any_write() {
    let ctx = common::TestContext::new().await.unwrap();
    let app = blocks_app!(ctx);

    let mut req = test::TestRequest::post()
        .uri("/api/v1/blocks")
        .set_json(block_json("2025-06-01T09:00:00", "2025-06-01T09:00:00"));
    for (name, value) in common::ops_headers() {
        req = req.insert_header((name, value));
    }
    let resp = test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(ctx.slots.list_blocks(None, None).await.unwrap().is_empty());
}

#[actix_web::test]
#[serial]
async fn updating_a_missing_block_is_not_found() {
    let ctx = common::TestContext::new().await.unwrap();
    let app = blocks_app!(ctx);

    let mut req = test::TestRequest::put()
        .uri("/api/v1/blocks/42")
        .set_json(block_json("2025-06-01T09:00:00", "2025-06-01T12:00:00"));
    for (name, value) in common::ops_headers() {
        req = req.insert_header((name, value));
    }
    let resp = test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
