// src/handlers/purchases.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::{
    common::{error::AppError, pagination::Pagination},
    config::AppState,
    models::purchase::CreatePurchasePayload,
    services::purchase_service::ListPurchasesParams,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CreatePurchaseQuery {
    pub shop_name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PurchaseListQuery {
    pub shop_name: Option<String>,
    pub company_name: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub price: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// POST /api/v1/purchases/create/purchase
#[utoipa::path(
    post,
    path = "/api/v1/purchases/create/purchase",
    tag = "Purchases",
    params(CreatePurchaseQuery),
    request_body = CreatePurchasePayload,
    responses(
        (status = 200, description = "Compra registrada e estoque atualizado"),
        (status = 400, description = "Payload inválido ou remédio inexistente")
    )
)]
pub async fn create_purchase(
    State(app_state): State<AppState>,
    Query(query): Query<CreatePurchaseQuery>,
    Json(payload): Json<CreatePurchasePayload>,
) -> Result<impl IntoResponse, AppError> {
    let purchase = app_state
        .purchase_service
        .create_purchase(query.shop_name.as_deref(), &payload)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Purchase created successfully.",
            "data": purchase,
        })),
    ))
}

// GET /api/v1/purchases/get-all
#[utoipa::path(
    get,
    path = "/api/v1/purchases/get-all",
    tag = "Purchases",
    params(PurchaseListQuery),
    responses(
        (status = 200, description = "Notas de compra da loja, com filtros e paginação")
    )
)]
pub async fn get_all_purchases(
    State(app_state): State<AppState>,
    Query(query): Query<PurchaseListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let listing = app_state
        .purchase_service
        .list_purchases(ListPurchasesParams {
            shop_name: query.shop_name,
            company_name: query.company_name,
            category: query.category,
            search: query.search,
            price: query.price,
            start_date: query.start_date,
            end_date: query.end_date,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Purchase invoices retrieved successfully",
            "shop_name": listing.shop_name,
            "data_found": listing.data_found,
            "pagination": Pagination::compute(listing.data_found, listing.page, listing.limit),
            "data": listing.purchases,
        })),
    ))
}
