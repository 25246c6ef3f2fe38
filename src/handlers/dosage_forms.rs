// src/handlers/dosage_forms.rs

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
pub struct CreateDosageFormPayload {
    #[validate(required(message = "Dosage form is required"))]
    pub dosage_form: Option<String>,

    #[validate(required(message = "Shop name is required"))]
    pub shop_name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DosageFormListQuery {
    pub shop_name: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// POST /api/v1/dosage-forms/create/dosage
#[utoipa::path(
    post,
    path = "/api/v1/dosage-forms/create/dosage",
    tag = "Dosage forms",
    request_body = CreateDosageFormPayload,
    responses(
        (status = 200, description = "Forma de dosagem criada"),
        (status = 400, description = "Payload inválido ou forma já existe")
    )
)]
pub async fn create_dosage_form(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateDosageFormPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| first_violation(&e, &["dosage_form", "shop_name"]))?;

    let dosage_form = app_state
        .catalog_service
        .create_dosage_form(
            &payload.dosage_form.unwrap(),
            &payload.shop_name.unwrap(),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Dosage form created successfully",
            "data": dosage_form,
        })),
    ))
}

// GET /api/v1/dosage-forms/get-all
#[utoipa::path(
    get,
    path = "/api/v1/dosage-forms/get-all",
    tag = "Dosage forms",
    params(DosageFormListQuery),
    responses(
        (status = 200, description = "Formas de dosagem da loja, com contagem de remédios")
    )
)]
pub async fn get_all_dosage_forms(
    State(app_state): State<AppState>,
    Query(query): Query<DosageFormListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.page.filter(|p| *p > 0).unwrap_or(1);
    let limit = query.limit.filter(|l| *l > 0).unwrap_or(100);

    let listing = app_state
        .catalog_service
        .list_dosage_forms(
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
            "message": "Dosage forms retrieved successfully",
            "shop_name": listing.shop_name,
            "data_found": listing.data_found,
            "pagination": Pagination::compute(listing.data_found, listing.page, listing.limit),
            "data": listing.data,
        })),
    ))
}

// DELETE /api/v1/dosage-forms/delete/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/dosage-forms/delete/{id}",
    tag = "Dosage forms",
    params(("id" = String, Path, description = "Id da forma de dosagem")),
    responses(
        (status = 200, description = "Forma de dosagem removida"),
        (status = 404, description = "Nenhuma forma com esse id")
    )
)]
pub async fn delete_dosage_form(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_dosage_form(&id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Dosage form deleted successfully",
        })),
    ))
}
