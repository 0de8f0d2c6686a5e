use actix_web::{App, http::StatusCode, test, web};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serial_test::serial;

use crewcal::database::models::{ShootRequestInput, ShootStatus};
use crewcal::handlers::shoots;
use crewcal::services::booking::ApprovalInput;

mod common;

fn launch_request() -> ShootRequestInput {
    ShootRequestInput {
        title: "Launch film".to_string(),
        shoot_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        start_time: "09:00".to_string(),
        duration_minutes: Some(120),
        client_selector: None,
    }
}

/// Seed one confirmed, non-blocking shoot owned by agency 3.
async fn seed_confirmed_shoot(ctx: &common::TestContext) -> i64 {
    let shoot = ctx.booking.request_shoot(3, &launch_request()).await.unwrap();
    ctx.booking
        .approve_shoot(
            shoot.id,
            &ApprovalInput {
                start_time: None,
                end_time: None,
                client_id: None,
            },
        )
        .await
        .unwrap();
    shoot.id
}

macro_rules! shoots_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.shoots.clone()))
                .app_data(web::Data::new($ctx.booking.clone()))
                .service(
                    web::scope("/api/v1/shoots")
                        .route("", web::get().to(shoots::get_shoots))
                        .route("/request", web::post().to(shoots::request_shoot))
                        .route("/{id}", web::get().to(shoots::get_shoot))
                        .route("/{id}/blocking", web::post().to(shoots::set_blocking)),
                ),
        )
        .await
    };
}

#[actix_web::test]
#[serial]
async fn listing_requires_a_resolved_principal() {
    let ctx = common::TestContext::new().await.unwrap();
    let app = shoots_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/shoots").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn non_blocking_shoots_never_leak_to_other_tenants() {
    let ctx = common::TestContext::new().await.unwrap();
    seed_confirmed_shoot(&ctx).await;
    let app = shoots_app!(ctx);

    // Competing tenant: nothing at all.
    let mut req = test::TestRequest::get().uri("/api/v1/shoots");
    for (name, value) in common::agency_headers(5) {
        req = req.insert_header((name, value));
    }
    let body: serde_json::Value = test::call_and_read_body_json(&app, req.to_request()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // Owner: full detail, title included.
    let mut req = test::TestRequest::get().uri("/api/v1/shoots");
    for (name, value) in common::agency_headers(3) {
        req = req.insert_header((name, value));
    }
    let body: serde_json::Value = test::call_and_read_body_json(&app, req.to_request()).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["kind"], "full");
    assert_eq!(data[0]["shoot"]["title"], "Launch film");
}

#[actix_web::test]
#[serial]
async fn blocking_renders_as_redacted_unavailability_for_competitors() {
    let ctx = common::TestContext::new().await.unwrap();
    let shoot_id = seed_confirmed_shoot(&ctx).await;
    ctx.booking.set_blocking(shoot_id, true).await.unwrap();
    let app = shoots_app!(ctx);

    let mut req = test::TestRequest::get().uri("/api/v1/shoots");
    for (name, value) in common::agency_headers(5) {
        req = req.insert_header((name, value));
    }
    let body: serde_json::Value = test::call_and_read_body_json(&app, req.to_request()).await;
    let data = body["data"].as_array().unwrap();

    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["kind"], "redacted");
    assert_eq!(data[0]["range"]["startTime"], "09:00");
    assert_eq!(data[0]["range"]["endTime"], "11:00");
    assert!(data[0]["range"].get("title").is_none());
    assert!(data[0]["range"].get("status").is_none());
    assert!(data[0].get("shoot").is_none());

    // The owner's view is unchanged by the toggle.
    let mut req = test::TestRequest::get().uri("/api/v1/shoots");
    for (name, value) in common::agency_headers(3) {
        req = req.insert_header((name, value));
    }
    let body: serde_json::Value = test::call_and_read_body_json(&app, req.to_request()).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data[0]["kind"], "full");
    assert_eq!(data[0]["shoot"]["title"], "Launch film");
}

#[actix_web::test]
#[serial]
async fn hidden_shoots_read_as_absent_not_forbidden() {
    let ctx = common::TestContext::new().await.unwrap();
    let shoot_id = seed_confirmed_shoot(&ctx).await;
    let app = shoots_app!(ctx);

    let mut req = test::TestRequest::get().uri(&format!("/api/v1/shoots/{}", shoot_id));
    for (name, value) in common::agency_headers(5) {
        req = req.insert_header((name, value));
    }
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let mut req = test::TestRequest::get().uri(&format!("/api/v1/shoots/{}", shoot_id));
    for (name, value) in common::ops_headers() {
        req = req.insert_header((name, value));
    }
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
#[serial]
async fn tenants_cannot_toggle_blocking() {
    let ctx = common::TestContext::new().await.unwrap();
    let shoot_id = seed_confirmed_shoot(&ctx).await;
    let app = shoots_app!(ctx);

    let mut req = test::TestRequest::post()
        .uri(&format!("/api/v1/shoots/{}/blocking", shoot_id))
        .set_json(serde_json::json!({ "isBlocking": true }));
    for (name, value) in common::agency_headers(3) {
        req = req.insert_header((name, value));
    }
    let resp = test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let shoot = ctx.shoots.find_by_id(shoot_id).await.unwrap().unwrap();
    assert!(!shoot.is_blocking);
    assert_eq!(shoot.status, ShootStatus::Confirmed);
}

#[actix_web::test]
#[serial]
async fn tenant_requests_are_scoped_to_their_own_agency() {
    let ctx = common::TestContext::new().await.unwrap();
    let app = shoots_app!(ctx);

    let mut req = test::TestRequest::post()
        .uri("/api/v1/shoots/request")
        .set_json(serde_json::json!({
            "title": "Spring campaign",
            "shootDate": "2025-06-03",
            "startTime": "10:00",
            "durationMinutes": 90
        }));
    for (name, value) in common::agency_headers(5) {
        req = req.insert_header((name, value));
    }
    let body: serde_json::Value = test::call_and_read_body_json(&app, req.to_request()).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["agencyId"], 5);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["endTime"], "11:30");
}
