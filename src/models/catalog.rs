// src/models/catalog.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::medicine::Medicine;

// --- 1. Genéricos / Grupos ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Generic {
    pub id: Uuid,
    pub generic_id: String,
    pub generic_name: String,
    pub generic_slug: String,
    pub shop_name: String,
    pub shop_slug: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

// --- 2. Fornecedores ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Company {
    pub id: Uuid,
    pub company_id: String,
    pub company_name: String,
    pub company_slug: String,
    pub shop_name: String,
    pub shop_slug: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

// Linha da listagem: o fornecedor mais quantos remédios da loja são dele.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompanyListEntry {
    #[serde(flatten)]
    pub company: Company,
    pub medicine_available: i64,
}

// Detalhe: o fornecedor com os remédios em si.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub medicine_available: Vec<Medicine>,
}

// --- 3. Formas de dosagem (comprimido, xarope...) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DosageForm {
    pub id: Uuid,
    pub dosage_id: String,
    pub dosage_form: String,
    pub dosage_form_slug: String,
    pub shop_name: String,
    pub shop_slug: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DosageFormListEntry {
    #[serde(flatten)]
    pub dosage_form: DosageForm,
    pub medicine_available: i64,
}
