// src/models/medicine.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// O registro de remédio. O título é composto (forma + nome + dosagem) e o
// trio de contadores é mantido pelo fluxo de compras: `stock_left` nunca
// fica negativo e `lifetime_supply` só cresce. `lifetime_sells` existe para
// o futuro fluxo de vendas, que ainda não foi implementado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Medicine {
    pub id: Uuid,
    pub medicine_id: String,
    pub medicine_title: String,
    pub medicine_title_slug: String,
    pub medicine_name: String,
    pub generic_name: String,
    pub company_name: String,
    pub strength: String,
    pub dosage_form: String,
    pub purchase_price: Decimal,
    pub sell_price: Decimal,
    pub stock_left: i64,
    pub lifetime_supply: i64,
    pub lifetime_sells: i64,
    pub shop_name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
