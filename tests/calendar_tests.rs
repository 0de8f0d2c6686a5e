use actix_web::{App, http::StatusCode, test, web};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serial_test::serial;

use crewcal::database::models::{BlockInput, ShootRequestInput};
use crewcal::handlers::calendar;
use crewcal::services::booking::ApprovalInput;

mod common;

macro_rules! calendar_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.shoots.clone()))
                .app_data(web::Data::new($ctx.slots.clone()))
                .route("/api/v1/calendar", web::get().to(calendar::get_calendar)),
        )
        .await
    };
}

async fn seed_day(ctx: &common::TestContext) -> i64 {
    // One admin block 09:00-12:00.
    ctx.slots
        .create_block(BlockInput {
            start_time: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            end_time: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            coverage_type: None,
        })
        .await
        .unwrap();

    // One confirmed shoot for agency 3, 14:00-16:00.
    let shoot = ctx
        .booking
        .request_shoot(
            3,
            &ShootRequestInput {
                title: "Lookbook".to_string(),
                shoot_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                start_time: "14:00".to_string(),
                duration_minutes: Some(120),
                client_selector: None,
            },
        )
        .await
        .unwrap();
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

#[actix_web::test]
#[serial]
async fn calendar_requires_a_principal() {
    let ctx = common::TestContext::new().await.unwrap();
    let app = calendar_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/calendar?date=2025-06-01")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn ops_calendar_carries_blocks_and_full_shoots_with_geometry() {
    let ctx = common::TestContext::new().await.unwrap();
    seed_day(&ctx).await;
    let app = calendar_app!(ctx);

    let mut req = test::TestRequest::get()
        .uri("/api/v1/calendar?date=2025-06-01&windowStartHour=8&pxPerHour=60");
    for (name, value) in common::ops_headers() {
        req = req.insert_header((name, value));
    }
    let body: serde_json::Value = test::call_and_read_body_json(&app, req.to_request()).await;
    let cells = body["data"].as_array().unwrap();

    assert_eq!(cells.len(), 2);

    let block = &cells[0];
    assert_eq!(block["kind"], "block");
    assert_eq!(block["startTime"], "09:00");
    assert_eq!(block["endTime"], "12:00");
    assert_eq!(block["offset"], 60.0);
    assert_eq!(block["extent"], 180.0);

    let shoot = &cells[1];
    assert_eq!(shoot["kind"], "shoot");
    assert_eq!(shoot["offset"], 360.0);
    assert_eq!(shoot["extent"], 120.0);
    assert_eq!(shoot["shoot"]["title"], "Lookbook");
}

#[actix_web::test]
#[serial]
async fn competitor_calendar_redacts_blocking_shoots_at_identical_geometry() {
    let ctx = common::TestContext::new().await.unwrap();
    let shoot_id = seed_day(&ctx).await;
    ctx.booking.set_blocking(shoot_id, true).await.unwrap();
    let app = calendar_app!(ctx);

    let mut req = test::TestRequest::get()
        .uri("/api/v1/calendar?date=2025-06-01&windowStartHour=8&pxPerHour=60");
    for (name, value) in common::agency_headers(5) {
        req = req.insert_header((name, value));
    }
    let body: serde_json::Value = test::call_and_read_body_json(&app, req.to_request()).await;
    let cells = body["data"].as_array().unwrap();

    // The admin block plus the redacted conflict marker.
    assert_eq!(cells.len(), 2);
    let marker = &cells[1];
    assert_eq!(marker["kind"], "unavailable");
    assert_eq!(marker["offset"], 360.0);
    assert_eq!(marker["extent"], 120.0);
    assert!(marker.get("shoot").is_none());
}

#[actix_web::test]
#[serial]
async fn competitor_calendar_drops_non_blocking_shoots_entirely() {
    let ctx = common::TestContext::new().await.unwrap();
    seed_day(&ctx).await;
    let app = calendar_app!(ctx);

    let mut req = test::TestRequest::get().uri("/api/v1/calendar?date=2025-06-01");
    for (name, value) in common::agency_headers(5) {
        req = req.insert_header((name, value));
    }
    let body: serde_json::Value = test::call_and_read_body_json(&app, req.to_request()).await;
    let cells = body["data"].as_array().unwrap();

    // Only the admin block survives; the shoot is gone, not redacted.
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0]["kind"], "block");
}

#[actix_web::test]
#[serial]
async fn owner_calendar_keeps_full_detail_when_blocking_is_on() {
    let ctx = common::TestContext::new().await.unwrap();
    let shoot_id = seed_day(&ctx).await;
    ctx.booking.set_blocking(shoot_id, true).await.unwrap();
    let app = calendar_app!(ctx);

    let mut req = test::TestRequest::get().uri("/api/v1/calendar?date=2025-06-01");
    for (name, value) in common::agency_headers(3) {
        req = req.insert_header((name, value));
    }
    let body: serde_json::Value = test::call_and_read_body_json(&app, req.to_request()).await;
    let cells = body["data"].as_array().unwrap();

    assert_eq!(cells.len(), 2);
    assert_eq!(cells[1]["kind"], "shoot");
    assert_eq!(cells[1]["shoot"]["title"], "Lookbook");
}
