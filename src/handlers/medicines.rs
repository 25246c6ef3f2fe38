// src/handlers/medicines.rs

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

// Os preços chegam como string ou número, então ficam como Value cru aqui e
// são interpretados no serviço.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMedicinePayload {
    #[validate(required(message = "Shop name is required"))]
    pub shop_name: Option<String>,

    #[validate(required(message = "Medicine name is required"))]
    pub medicine_name: Option<String>,

    #[validate(required(message = "Generic/Group name is required"))]
    pub generic_name: Option<String>,

    #[validate(required(message = "Company/supplier name is required"))]
    pub company_name: Option<String>,

    #[validate(required(message = "Strength/weight is required"))]
    pub strength: Option<String>,

    #[validate(required(message = "Dosage form is required"))]
    pub dosage_form: Option<String>,

    #[validate(required(message = "Purchase price is required"))]
    #[schema(value_type = Option<String>)]
    pub purchase_price: Option<serde_json::Value>,

    #[validate(required(message = "Sell price is required"))]
    #[schema(value_type = Option<String>)]
    pub sell_price: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MedicineListQuery {
    pub shop_name: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MedicineIdQuery {
    pub id: Option<String>,
}

// POST /api/v1/medicines/create/medicine
#[utoipa::path(
    post,
    path = "/api/v1/medicines/create/medicine",
    tag = "Medicines",
    request_body = CreateMedicinePayload,
    responses(
        (status = 200, description = "Remédio criado"),
        (status = 400, description = "Payload inválido ou remédio já existe")
    )
)]
pub async fn create_medicine(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateMedicinePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(|e| {
        first_violation(
            &e,
            &[
                "shop_name",
                "medicine_name",
                "generic_name",
                "company_name",
                "strength",
                "dosage_form",
                "purchase_price",
                "sell_price",
            ],
        )
    })?;

    let medicine = app_state
        .medicine_service
        .create_medicine(
            &payload.shop_name.unwrap(),
            &payload.medicine_name.unwrap(),
            &payload.generic_name.unwrap(),
            &payload.company_name.unwrap(),
            &payload.strength.unwrap(),
            &payload.dosage_form.unwrap(),
            &payload.purchase_price.unwrap(),
            &payload.sell_price.unwrap(),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Medicine created successfully",
            "data": medicine,
        })),
    ))
}

// GET /api/v1/medicines/get-all
#[utoipa::path(
    get,
    path = "/api/v1/medicines/get-all",
    tag = "Medicines",
    params(MedicineListQuery),
    responses(
        (status = 200, description = "Remédios da loja, com busca e paginação")
    )
)]
pub async fn get_all_medicines(
    State(app_state): State<AppState>,
    Query(query): Query<MedicineListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.page.filter(|p| *p > 0).unwrap_or(1);
    let limit = query.limit.filter(|l| *l > 0).unwrap_or(100);

    let listing = app_state
        .medicine_service
        .get_medicines(
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
            "message": "Medicines retrieved successfully",
            "shop_name": listing.shop_name,
            "data_found": listing.data_found,
            "pagination": Pagination::compute(listing.data_found, listing.page, listing.limit),
            "data": listing.medicines,
        })),
    ))
}

// GET /api/v1/medicines/get-medicine
#[utoipa::path(
    get,
    path = "/api/v1/medicines/get-medicine",
    tag = "Medicines",
    params(MedicineIdQuery),
    responses(
        (status = 200, description = "Remédio pelo id"),
        (status = 404, description = "Nenhum remédio com esse id")
    )
)]
pub async fn get_single_medicine(
    State(app_state): State<AppState>,
    Query(query): Query<MedicineIdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = query
        .id
        .ok_or_else(|| AppError::Validation("Id is required".to_string()))?;

    let medicine = app_state.medicine_service.get_single_medicine(&id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Medicine retrieved successfully",
            "data": medicine,
        })),
    ))
}

// DELETE /api/v1/medicines/delete-medicine/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/medicines/delete-medicine/{id}",
    tag = "Medicines",
    params(("id" = String, Path, description = "Id do remédio")),
    responses(
        (status = 200, description = "Remédio removido"),
        (status = 404, description = "Nenhum remédio com esse id")
    )
)]
pub async fn delete_medicine(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.medicine_service.delete_medicine(&id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Medicine deleted successfully",
        })),
    ))
}
