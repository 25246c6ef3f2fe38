// src/handlers/generics.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        pagination::Pagination,
        validate::first_violation,
    },
    config::AppState,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGenericPayload {
    #[validate(required(message = "Generic/Group name is required"))]
    pub generic_name: Option<String>,

    #[validate(required(message = "Shop name is required"))]
    pub shop_name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GenericListQuery {
    pub shop_name: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GenericIdQuery {
    pub id: Option<String>,
}

// POST /api/v1/generics/create/generic
#[utoipa::path(
    post,
    path = "/api/v1/generics/create/generic",
    tag = "Generics",
    request_body = CreateGenericPayload,
    responses(
        (status = 200, description = "Genérico criado"),
        (status = 400, description = "Payload inválido ou genérico já existe")
    )
)]
pub async fn create_generic(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateGenericPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| first_violation(&e, &["generic_name", "shop_name"]))?;

    let generic = app_state
        .catalog_service
        .create_generic(
            &payload.generic_name.unwrap(),
            &payload.shop_name.unwrap(),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "generic created successfully",
            "data": generic,
        })),
    ))
}

// GET /api/v1/generics/all
#[utoipa::path(
    get,
    path = "/api/v1/generics/all",
    tag = "Generics",
    params(GenericListQuery),
    responses(
        (status = 200, description = "Genéricos da loja")
    )
)]
pub async fn get_all_generics(
    State(app_state): State<AppState>,
    Query(query): Query<GenericListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.page.filter(|p| *p > 0).unwrap_or(1);
    let limit = query.limit.filter(|l| *l > 0).unwrap_or(100);

    let listing = app_state
        .catalog_service
        .list_generics(
            query.shop_name.as_deref(),
            query.search.as_deref().unwrap_or(""),
            page,
            limit,
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Generics retrieved successfully",
            "shop_name": listing.shop_name,
            "data_found": listing.data_found,
            "pagination": Pagination::compute(listing.data_found, listing.page, listing.limit),
            "data": listing.data,
        })),
    ))
}

// GET /api/v1/generics/get-generic
#[utoipa::path(
    get,
    path = "/api/v1/generics/get-generic",
    tag = "Generics",
    params(GenericIdQuery),
    responses(
        (status = 200, description = "Genérico pelo id"),
        (status = 404, description = "Nenhum genérico com esse id")
    )
)]
pub async fn get_single_generic(
    State(app_state): State<AppState>,
    Query(query): Query<GenericIdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = query
        .id
        .ok_or_else(|| AppError::Validation("Id is required".to_string()))?;

    let generic = app_state.catalog_service.get_single_generic(&id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Generic retrieved successfully",
            "data": generic,
        })),
    ))
}

// DELETE /api/v1/generics/delete/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/generics/delete/{id}",
    tag = "Generics",
    params(("id" = String, Path, description = "Id do genérico")),
    responses(
        (status = 200, description = "Genérico removido"),
        (status = 404, description = "Nenhum genérico com esse id")
    )
)]
pub async fn delete_generic(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_generic(&id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Generic deleted successfully",
        })),
    ))
}
