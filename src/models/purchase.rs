// src/models/purchase.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// O registro de compra é imutável: criado uma vez, nunca alterado nem
// removido. `purchase_id` é o número sequencial por loja, reservado de forma
// atômica dentro da transação da compra.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Purchase {
    pub id: Uuid,
    pub shop_name: String,
    pub purchase_id: i64,
    pub company_name: String,
    pub category: String,
    pub total_price: Decimal,
    pub total_discount: Decimal,
    pub total_tax: Decimal,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

// Um item da compra: referência ao remédio, quantidade comprada e o nome do
// fornecedor desnormalizado no momento da compra.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PurchaseItem {
    pub id: Uuid,
    pub purchase_id: Uuid,
    pub position: i32,
    pub medicine_id: Uuid,
    pub company_name: String,
    pub purchase_quantity: i64,
}

// A compra com seus itens na ordem do payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PurchaseWithItems {
    #[serde(flatten)]
    pub purchase: Purchase,
    pub items: Vec<PurchaseItem>,
}

// ---
// Payloads de entrada
// ---
// Os campos chegam como `Option` para o serviço responder "is required" na
// ordem certa, e os preços como `Value` porque o cliente manda tanto
// `"120.50"` quanto `120.5`.

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePurchasePayload {
    pub category: Option<String>,
    #[schema(value_type = Option<String>)]
    pub total_price: Option<serde_json::Value>,
    #[schema(value_type = Option<String>)]
    pub total_discount: Option<serde_json::Value>,
    #[schema(value_type = Option<String>)]
    pub total_tax: Option<serde_json::Value>,
    pub items: Option<Vec<PurchaseItemPayload>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PurchaseItemPayload {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub purchase_quantity: Option<i64>,
    pub company_name: Option<String>,
}
