use actix_web::{HttpRequest, HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::Principal;
use crate::database::models::{ShootInput, ShootRequestInput};
use crate::database::repositories::ShootRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::middleware::RequestIdExt;
use crate::services::booking::{ApprovalInput, BookingService};
use crate::services::visibility::{ShootVisibility, render_all, render_shoot};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockingInput {
    pub is_blocking: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeInput {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub client_id: Option<i64>,
}

fn require_ops(principal: &Principal) -> Result<(), AppError> {
    if !principal.is_ops() {
        return Err(AppError::forbidden(
            "Only operations staff can manage the shoot lifecycle",
        ));
    }
    Ok(())
}

// The raw event set is fetched unfiltered; what each principal gets
// back is decided entirely by render_all.
pub async fn get_shoots(
    principal: Principal,
    repo: web::Data<ShootRepository>,
    query: web::Query<ShootQuery>,
) -> Result<HttpResponse, AppError> {
    let shoots = repo.list_shoots(query.from, query.to).await?;
    let visible = render_all(&principal, &shoots);

    Ok(HttpResponse::Ok().json(ApiResponse::success(visible)))
}

// A shoot the principal may not see at all reads as absent;
// existence itself must not leak across tenants.
pub async fn get_shoot(
    principal: Principal,
    repo: web::Data<ShootRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let shoot_id = path.into_inner();

    let shoot = repo
        .find_by_id(shoot_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Shoot {} not found", shoot_id)))?;

    match render_shoot(&principal, &shoot) {
        ShootVisibility::Hidden => Err(AppError::not_found(format!(
            "Shoot {} not found",
            shoot_id
        ))),
        visible => Ok(HttpResponse::Ok().json(ApiResponse::success(visible))),
    }
}

pub async fn create_shoot(
    principal: Principal,
    booking: web::Data<BookingService>,
    input: web::Json<ShootInput>,
) -> Result<HttpResponse, AppError> {
    require_ops(&principal)?;

    let shoot = booking.create_confirmed(&input).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(shoot)))
}

// Lands Pending, owned by the requesting principal's agency.
pub async fn request_shoot(
    req: HttpRequest,
    principal: Principal,
    booking: web::Data<BookingService>,
    input: web::Json<ShootRequestInput>,
) -> Result<HttpResponse, AppError> {
    if !principal.is_tenant() {
        return Err(AppError::forbidden(
            "Booking requests come from agency principals",
        ));
    }
    let agency_id = principal.require_agency()?;

    let shoot = booking.request_shoot(agency_id, &input).await?;
    log::info!(
        "Booking request '{}' accepted for agency {} (correlation_id={})",
        shoot.title,
        agency_id,
        req.correlation_id().unwrap_or_default()
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(shoot)))
}

pub async fn approve_shoot(
    principal: Principal,
    booking: web::Data<BookingService>,
    path: web::Path<i64>,
    input: web::Json<ApprovalInput>,
) -> Result<HttpResponse, AppError> {
    require_ops(&principal)?;

    let shoot = booking.approve_shoot(path.into_inner(), &input).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(shoot)))
}

pub async fn deny_shoot(
    principal: Principal,
    booking: web::Data<BookingService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_ops(&principal)?;

    booking.deny_shoot(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

pub async fn finish_shoot(
    principal: Principal,
    booking: web::Data<BookingService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_ops(&principal)?;

    let shoot = booking.finish_shoot(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(shoot)))
}

pub async fn revert_shoot(
    principal: Principal,
    booking: web::Data<BookingService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_ops(&principal)?;

    let shoot = booking.revert_shoot(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(shoot)))
}

pub async fn set_blocking(
    principal: Principal,
    booking: web::Data<BookingService>,
    path: web::Path<i64>,
    input: web::Json<BlockingInput>,
) -> Result<HttpResponse, AppError> {
    require_ops(&principal)?;

    let shoot = booking
        .set_blocking(path.into_inner(), input.is_blocking)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(shoot)))
}

pub async fn update_shoot_client(
    principal: Principal,
    booking: web::Data<BookingService>,
    path: web::Path<i64>,
    input: web::Json<ClientInput>,
) -> Result<HttpResponse, AppError> {
    require_ops(&principal)?;

    let shoot = booking
        .reassign_client(path.into_inner(), input.client_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(shoot)))
}

pub async fn update_shoot_time(
    principal: Principal,
    booking: web::Data<BookingService>,
    path: web::Path<i64>,
    input: web::Json<TimeInput>,
) -> Result<HttpResponse, AppError> {
    require_ops(&principal)?;

    let shoot = booking
        .reschedule(path.into_inner(), &input.start_time, &input.end_time)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(shoot)))
}
