use actix_web::{HttpResponse, web};
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::auth::Principal;
use crate::database::models::BlockInput;
use crate::database::repositories::SlotRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockQuery {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

fn require_ops(principal: &Principal) -> Result<(), AppError> {
    if !principal.is_ops() {
        return Err(AppError::forbidden(
            "Only operations staff can manage availability blocks",
        ));
    }
    Ok(())
}

fn validate_range(input: &BlockInput) -> Result<(), AppError> {
    if input.end_time <= input.start_time {
        return Err(AppError::validation("Block must end after it starts"));
    }
    Ok(())
}

pub async fn get_blocks(
    principal: Principal,
    repo: web::Data<SlotRepository>,
    query: web::Query<BlockQuery>,
) -> Result<HttpResponse, AppError> {
    require_ops(&principal)?;

    let blocks = repo.list_blocks(query.from, query.to).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(blocks)))
}

pub async fn create_block(
    principal: Principal,
    repo: web::Data<SlotRepository>,
    input: web::Json<BlockInput>,
) -> Result<HttpResponse, AppError> {
    require_ops(&principal)?;

    let input = input.into_inner();
    validate_range(&input)?;

    let block = repo.create_block(input).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(block)))
}

pub async fn update_block(
    principal: Principal,
    repo: web::Data<SlotRepository>,
    path: web::Path<i64>,
    input: web::Json<BlockInput>,
) -> Result<HttpResponse, AppError> {
    require_ops(&principal)?;

    let block_id = path.into_inner();
    let input = input.into_inner();
    validate_range(&input)?;

    let block = repo
        .update_block(block_id, input)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Availability slot {} not found", block_id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(block)))
}

pub async fn delete_block(
    principal: Principal,
    repo: web::Data<SlotRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_ops(&principal)?;

    let block_id = path.into_inner();
    let deleted = repo.delete_block(block_id).await?;
    if !deleted {
        return Err(AppError::not_found(format!(
            "Availability slot {} not found",
            block_id
        )));
    }

    Ok(HttpResponse::NoContent().finish())
}
