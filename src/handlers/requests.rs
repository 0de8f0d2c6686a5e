use actix_web::{HttpResponse, web};

use crate::auth::Principal;
use crate::database::models::AvailabilityRequestInput;
use crate::database::repositories::AvailabilityRequestRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::booking::BookingService;

// Legacy slot-bound request endpoints. Kept as its own pathway next
// to the shoot-based flow; the two only meet at the slot's booked
// flag.

pub async fn get_requests(
    principal: Principal,
    repo: web::Data<AvailabilityRequestRepository>,
) -> Result<HttpResponse, AppError> {
    // Tenants see their own requests; ops sees all of them.
    let agency_filter = if principal.is_ops() {
        None
    } else {
        Some(principal.require_agency()?)
    };

    let requests = repo.list(agency_filter).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(requests)))
}

pub async fn create_request(
    principal: Principal,
    booking: web::Data<BookingService>,
    input: web::Json<AvailabilityRequestInput>,
) -> Result<HttpResponse, AppError> {
    if !principal.is_tenant() {
        return Err(AppError::forbidden(
            "Availability requests come from agency principals",
        ));
    }
    let agency_id = principal.require_agency()?;

    let request = booking
        .create_availability_request(agency_id, input.slot_id)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(request)))
}

pub async fn approve_request(
    principal: Principal,
    booking: web::Data<BookingService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if !principal.is_ops() {
        return Err(AppError::forbidden(
            "Only operations staff can approve requests",
        ));
    }

    let request = booking
        .approve_availability_request(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(request)))
}

pub async fn reject_request(
    principal: Principal,
    booking: web::Data<BookingService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if !principal.is_ops() {
        return Err(AppError::forbidden(
            "Only operations staff can reject requests",
        ));
    }

    let request = booking
        .reject_availability_request(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(request)))
}
