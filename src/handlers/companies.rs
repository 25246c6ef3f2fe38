// src/handlers/companies.rs

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

// ---
// Payload: CreateCompany
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCompanyPayload {
    #[validate(required(message = "Company/supplier name is required"))]
    pub company_name: Option<String>,

    #[validate(required(message = "Shop name is required"))]
    pub shop_name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CompanyListQuery {
    pub shop_name: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CompanyIdQuery {
    pub id: Option<String>,
}

// POST /api/v1/companies/create/company
#[utoipa::path(
    post,
    path = "/api/v1/companies/create/company",
    tag = "Companies",
    request_body = CreateCompanyPayload,
    responses(
        (status = 200, description = "Fornecedor criado"),
        (status = 400, description = "Payload inválido ou fornecedor já existe")
    )
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| first_violation(&e, &["company_name", "shop_name"]))?;

    let company = app_state
        .catalog_service
        .create_company(
            &payload.company_name.unwrap(),
            &payload.shop_name.unwrap(),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Company created successfully",
            "data": company,
        })),
    ))
}

// GET /api/v1/companies/get-all
#[utoipa::path(
    get,
    path = "/api/v1/companies/get-all",
    tag = "Companies",
    params(CompanyListQuery),
    responses(
        (status = 200, description = "Fornecedores da loja, com contagem de remédios")
    )
)]
pub async fn get_all_companies(
    State(app_state): State<AppState>,
    Query(query): Query<CompanyListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.page.filter(|p| *p > 0).unwrap_or(1);
    let limit = query.limit.filter(|l| *l > 0).unwrap_or(100);

    let listing = app_state
        .catalog_service
        .list_companies(
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
            "message": "Companies retrieved successfully",
            "shop_name": listing.shop_name,
            "data_found": listing.data_found,
            "pagination": Pagination::compute(listing.data_found, listing.page, listing.limit),
            "data": listing.data,
        })),
    ))
}

// GET /api/v1/companies/get-company
#[utoipa::path(
    get,
    path = "/api/v1/companies/get-company",
    tag = "Companies",
    params(CompanyIdQuery),
    responses(
        (status = 200, description = "Fornecedor com seus remédios"),
        (status = 404, description = "Nenhum fornecedor com esse id")
    )
)]
pub async fn get_single_company(
    State(app_state): State<AppState>,
    Query(query): Query<CompanyIdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = query
        .id
        .ok_or_else(|| AppError::Validation("Id is required".to_string()))?;

    let detail = app_state.catalog_service.get_single_company(&id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Company retrieved successfully",
            "data": detail,
        })),
    ))
}

// DELETE /api/v1/companies/delete/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/companies/delete/{id}",
    tag = "Companies",
    params(("id" = String, Path, description = "Id do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor removido"),
        (status = 404, description = "Nenhum fornecedor com esse id")
    )
)]
pub async fn delete_company(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_company(&id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Company deleted successfully",
        })),
    ))
}
