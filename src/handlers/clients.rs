use actix_web::{HttpResponse, web};

use crate::auth::Principal;
use crate::database::repositories::ClientRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

// Ops sees the whole directory, a tenant only its own agency's rows.
// The placeholder row is never listed.
pub async fn get_clients(
    principal: Principal,
    repo: web::Data<ClientRepository>,
) -> Result<HttpResponse, AppError> {
    let agency_filter = if principal.is_ops() {
        None
    } else {
        Some(principal.require_agency()?)
    };

    let clients = repo.list_for_agency(agency_filter).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(clients)))
}
