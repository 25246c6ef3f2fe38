// src/services/purchase_service.rs

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        validate::{
            normalize_name, parse_non_negative_money, parse_object_id, parse_positive_money,
        },
    },
    db::{MedicineRepository, PurchaseRepository},
    db::purchase_repo::{PurchaseListFilter, PurchaseSort, SearchTerm},
    models::purchase::{CreatePurchasePayload, PurchaseWithItems},
};

// Payload já validado e normalizado, pronto para persistir.
#[derive(Debug, PartialEq)]
struct ValidatedPurchase {
    shop_name: String,
    category: String,
    total_price: Decimal,
    total_discount: Decimal,
    total_tax: Decimal,
    items: Vec<ValidatedItem>,
}

#[derive(Debug, PartialEq)]
struct ValidatedItem {
    medicine_id: Uuid,
    purchase_quantity: i64,
    company_name: String,
}

// Parâmetros crus da listagem, como chegam na query string.
#[derive(Debug, Default)]
pub struct ListPurchasesParams {
    pub shop_name: Option<String>,
    pub company_name: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub price: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub struct PurchaseListing {
    pub shop_name: String,
    pub data_found: i64,
    pub page: i64,
    pub limit: i64,
    pub purchases: Vec<PurchaseWithItems>,
}

#[derive(Clone)]
pub struct PurchaseService {
    purchase_repo: PurchaseRepository,
    medicine_repo: MedicineRepository,
    pool: PgPool,
}

impl PurchaseService {
    pub fn new(
        purchase_repo: PurchaseRepository,
        medicine_repo: MedicineRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            purchase_repo,
            medicine_repo,
            pool,
        }
    }

    /// Cria uma compra: valida o payload, confere a existência de todos os
    /// remédios referenciados, reserva o número sequencial da loja,
    /// incrementa os contadores de estoque e grava o registro — tudo em uma
    /// única transação. Se qualquer passo falhar, nada é aplicado.
    pub async fn create_purchase(
        &self,
        shop_name: Option<&str>,
        payload: &CreatePurchasePayload,
    ) -> Result<PurchaseWithItems, AppError> {
        let validated = validate_create(shop_name, payload)?;

        let distinct_ids: Vec<Uuid> = validated
            .items
            .iter()
            .map(|item| item.medicine_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let mut tx = self.pool.begin().await?;

        // Checagem de existência antes de qualquer mutação: a contagem de
        // registros resolvidos precisa bater com a de ids distintos pedidos.
        let existing = self
            .medicine_repo
            .find_by_ids(&mut *tx, &distinct_ids)
            .await?;
        if existing.len() != distinct_ids.len() {
            return Err(AppError::Validation("All items not found".to_string()));
        }

        let purchase_number = self
            .purchase_repo
            .next_purchase_number(&mut *tx, &validated.shop_name)
            .await?;

        for item in &validated.items {
            self.medicine_repo
                .increment_stock(&mut *tx, item.medicine_id, item.purchase_quantity)
                .await?;
        }

        // O nome do fornecedor vem desnormalizado do primeiro item.
        let company_name = validated
            .items
            .first()
            .map(|item| item.company_name.clone())
            .unwrap_or_default();

        let purchase = self
            .purchase_repo
            .insert_purchase(
                &mut *tx,
                &validated.shop_name,
                purchase_number,
                &company_name,
                &validated.category,
                validated.total_price,
                validated.total_discount,
                validated.total_tax,
            )
            .await?;

        let mut items = Vec::with_capacity(validated.items.len());
        for (position, item) in validated.items.iter().enumerate() {
            let inserted = self
                .purchase_repo
                .insert_item(
                    &mut *tx,
                    purchase.id,
                    position as i32,
                    item.medicine_id,
                    &item.company_name,
                    item.purchase_quantity,
                )
                .await?;
            items.push(inserted);
        }

        tx.commit().await?;

        tracing::info!(
            shop = %purchase.shop_name,
            purchase_id = purchase.purchase_id,
            "Compra registrada"
        );

        Ok(PurchaseWithItems { purchase, items })
    }

    /// Lista as compras de uma loja com filtros, ordenação e paginação.
    pub async fn list_purchases(
        &self,
        params: ListPurchasesParams,
    ) -> Result<PurchaseListing, AppError> {
        let filter = build_filter(&params)?;

        let purchases = self.purchase_repo.list(&self.pool, &filter).await?;
        let data_found = self.purchase_repo.count(&self.pool, &filter).await?;

        // Carrega os itens de todas as compras da página de uma vez.
        let ids: Vec<Uuid> = purchases.iter().map(|p| p.id).collect();
        let mut items_by_purchase: HashMap<Uuid, Vec<_>> = HashMap::new();
        for item in self
            .purchase_repo
            .items_for_purchases(&self.pool, &ids)
            .await?
        {
            items_by_purchase
                .entry(item.purchase_id)
                .or_default()
                .push(item);
        }

        let purchases = purchases
            .into_iter()
            .map(|purchase| {
                let items = items_by_purchase.remove(&purchase.id).unwrap_or_default();
                PurchaseWithItems { purchase, items }
            })
            .collect();

        Ok(PurchaseListing {
            shop_name: filter.shop_name.clone(),
            data_found,
            page: filter.page,
            limit: filter.limit,
            purchases,
        })
    }
}

// ---
// Validação do payload de criação (falha rápida: a primeira violação vence)
// ---
fn validate_create(
    shop_name: Option<&str>,
    payload: &CreatePurchasePayload,
) -> Result<ValidatedPurchase, AppError> {
    let shop_name = shop_name
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Shop name is required in query".to_string()))?;
    let category = payload
        .category
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Category name is required".to_string()))?;
    let total_price = payload
        .total_price
        .as_ref()
        .filter(|v| !v.is_null())
        .ok_or_else(|| AppError::Validation("Total price is required".to_string()))?;
    let items = payload
        .items
        .as_ref()
        .ok_or_else(|| AppError::Validation("Items is required".to_string()))?;
    if items.is_empty() {
        return Err(AppError::Validation(
            "Items should be at least one".to_string(),
        ));
    }

    let shop_name = normalize_name(shop_name, "Shop")?;
    let category = normalize_name(category, "Category")?;

    let total_price = parse_positive_money(total_price, "Total price")?;
    let total_discount = parse_non_negative_money(payload.total_discount.as_ref(), "Total discount")?;
    let total_tax = parse_non_negative_money(payload.total_tax.as_ref(), "Total tax")?;

    let mut validated_items = Vec::with_capacity(items.len());
    for item in items {
        let id = item.id.as_deref().ok_or(AppError::InvalidId)?;
        let medicine_id = parse_object_id(id)?;

        let purchase_quantity = item
            .purchase_quantity
            .filter(|q| *q > 0)
            .ok_or_else(|| {
                AppError::Validation("Purchase quantity must be a positive number".to_string())
            })?;

        validated_items.push(ValidatedItem {
            medicine_id,
            purchase_quantity,
            company_name: item.company_name.clone().unwrap_or_default(),
        });
    }

    Ok(ValidatedPurchase {
        shop_name,
        category,
        total_price,
        total_discount,
        total_tax,
        items: validated_items,
    })
}

// ---
// Construção do filtro da listagem
// ---
fn build_filter(params: &ListPurchasesParams) -> Result<PurchaseListFilter, AppError> {
    let shop_name = params
        .shop_name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Shop name is required in query".to_string()))?;
    let shop_name = normalize_name(shop_name, "Shop")?;

    let company_name = params.company_name.clone().filter(|s| !s.is_empty());
    let category = params.category.clone().filter(|s| !s.is_empty());

    // Texto com forma de id vira consulta direta por chave.
    let search = params
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| match Uuid::parse_str(s) {
            Ok(id) => SearchTerm::Id(id),
            Err(_) => SearchTerm::Text(s.to_string()),
        });

    let sort = match params.price.as_deref() {
        Some("low-to-high") => PurchaseSort::PriceLowToHigh,
        Some("high-to-low") => PurchaseSort::PriceHighToLow,
        _ => PurchaseSort::CreatedAtAsc,
    };

    // startDate entra às 00:00:00.000 e endDate até 23:59:59.999, inclusivos.
    let start_date = match params.start_date.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(day_bound(raw, "startDate", false)?),
        None => None,
    };
    let end_date = match params.end_date.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(day_bound(raw, "endDate", true)?),
        None => None,
    };

    let page = params.page.filter(|p| *p > 0).unwrap_or(1);
    let limit = params.limit.filter(|l| *l > 0).unwrap_or(10);

    Ok(PurchaseListFilter {
        shop_name,
        company_name,
        category,
        search,
        start_date,
        end_date,
        sort,
        page,
        limit,
    })
}

fn day_bound(raw: &str, label: &str, end_of_day: bool) -> Result<DateTime<Utc>, AppError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{label} must be a date in YYYY-MM-DD format")))?;

    let time = if end_of_day {
        date.and_hms_milli_opt(23, 59, 59, 999)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    let time =
        time.ok_or_else(|| AppError::Validation(format!("{label} is out of range")))?;

    Ok(DateTime::from_naive_utc_and_offset(time, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::purchase::PurchaseItemPayload;
    use serde_json::json;
    use std::str::FromStr;

    fn item(id: &str, quantity: i64) -> PurchaseItemPayload {
        PurchaseItemPayload {
            id: Some(id.to_string()),
            purchase_quantity: Some(quantity),
            company_name: Some("acme labs".to_string()),
        }
    }

    fn valid_payload() -> CreatePurchasePayload {
        CreatePurchasePayload {
            category: Some("OTC".to_string()),
            total_price: Some(json!("120.50")),
            total_discount: None,
            total_tax: None,
            items: Some(vec![item("3fa85f64-5717-4562-b3fc-2c963f66afa6", 5)]),
        }
    }

    #[test]
    fn valid_payload_is_normalized_and_parsed() {
        let got = validate_create(Some("  Sunrise   Pharmacy "), &valid_payload()).unwrap();
        assert_eq!(got.shop_name, "sunrise pharmacy");
        assert_eq!(got.category, "otc");
        assert_eq!(got.total_price, Decimal::from_str("120.50").unwrap());
        assert_eq!(got.total_discount, Decimal::ZERO);
        assert_eq!(got.total_tax, Decimal::ZERO);
        assert_eq!(got.items[0].purchase_quantity, 5);
    }

    #[test]
    fn missing_fields_fail_in_declaration_order() {
        let err = validate_create(None, &valid_payload()).unwrap_err();
        assert_eq!(err.to_string(), "Shop name is required in query");

        let mut payload = valid_payload();
        payload.category = None;
        let err = validate_create(Some("sunrise pharmacy"), &payload).unwrap_err();
        assert_eq!(err.to_string(), "Category name is required");

        let mut payload = valid_payload();
        payload.total_price = None;
        let err = validate_create(Some("sunrise pharmacy"), &payload).unwrap_err();
        assert_eq!(err.to_string(), "Total price is required");

        let mut payload = valid_payload();
        payload.items = None;
        let err = validate_create(Some("sunrise pharmacy"), &payload).unwrap_err();
        assert_eq!(err.to_string(), "Items is required");

        let mut payload = valid_payload();
        payload.items = Some(vec![]);
        let err = validate_create(Some("sunrise pharmacy"), &payload).unwrap_err();
        assert_eq!(err.to_string(), "Items should be at least one");
    }

    #[test]
    fn negative_price_is_rejected_before_touching_items() {
        let mut payload = valid_payload();
        payload.total_price = Some(json!("-5"));
        let err = validate_create(Some("sunrise pharmacy"), &payload).unwrap_err();
        assert_eq!(err.to_string(), "Total price must be a positive number");
    }

    #[test]
    fn negative_discount_and_tax_are_rejected() {
        let mut payload = valid_payload();
        payload.total_discount = Some(json!(-1));
        let err = validate_create(Some("sunrise pharmacy"), &payload).unwrap_err();
        assert_eq!(err.to_string(), "Total discount must be a positive number or zero");

        let mut payload = valid_payload();
        payload.total_tax = Some(json!("-0.5"));
        let err = validate_create(Some("sunrise pharmacy"), &payload).unwrap_err();
        assert_eq!(err.to_string(), "Total tax must be a positive number or zero");
    }

    #[test]
    fn malformed_item_id_is_rejected() {
        let mut payload = valid_payload();
        payload.items = Some(vec![item("not-an-id", 5)]);
        let err = validate_create(Some("sunrise pharmacy"), &payload).unwrap_err();
        assert_eq!(err.to_string(), "Invalid id");
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut payload = valid_payload();
        payload.items = Some(vec![item("3fa85f64-5717-4562-b3fc-2c963f66afa6", 0)]);
        let err = validate_create(Some("sunrise pharmacy"), &payload).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Purchase quantity must be a positive number"
        );
    }

    #[test]
    fn filter_requires_shop_name() {
        let err = build_filter(&ListPurchasesParams::default()).unwrap_err();
        assert_eq!(err.to_string(), "Shop name is required in query");
    }

    #[test]
    fn filter_defaults_page_and_limit() {
        let filter = build_filter(&ListPurchasesParams {
            shop_name: Some("sunrise pharmacy".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.sort, PurchaseSort::CreatedAtAsc);
    }

    #[test]
    fn search_that_parses_as_uuid_becomes_id_lookup() {
        let filter = build_filter(&ListPurchasesParams {
            shop_name: Some("sunrise pharmacy".to_string()),
            search: Some("3fa85f64-5717-4562-b3fc-2c963f66afa6".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(filter.search, Some(SearchTerm::Id(_))));

        let filter = build_filter(&ListPurchasesParams {
            shop_name: Some("sunrise pharmacy".to_string()),
            search: Some("acme".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.search, Some(SearchTerm::Text("acme".to_string())));
    }

    #[test]
    fn price_param_switches_sort_order() {
        let mut params = ListPurchasesParams {
            shop_name: Some("sunrise pharmacy".to_string()),
            price: Some("low-to-high".to_string()),
            ..Default::default()
        };
        assert_eq!(build_filter(&params).unwrap().sort, PurchaseSort::PriceLowToHigh);

        params.price = Some("high-to-low".to_string());
        assert_eq!(build_filter(&params).unwrap().sort, PurchaseSort::PriceHighToLow);

        params.price = Some("whatever".to_string());
        assert_eq!(build_filter(&params).unwrap().sort, PurchaseSort::CreatedAtAsc);
    }

    #[test]
    fn date_range_covers_the_whole_days() {
        let filter = build_filter(&ListPurchasesParams {
            shop_name: Some("sunrise pharmacy".to_string()),
            start_date: Some("2024-05-01".to_string()),
            end_date: Some("2024-05-02".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            filter.start_date.unwrap().to_rfc3339(),
            "2024-05-01T00:00:00+00:00"
        );
        assert_eq!(
            filter.end_date.unwrap().to_rfc3339(),
            "2024-05-02T23:59:59.999+00:00"
        );
    }

    #[test]
    fn malformed_date_is_rejected() {
        let err = build_filter(&ListPurchasesParams {
            shop_name: Some("sunrise pharmacy".to_string()),
            start_date: Some("01/05/2024".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "startDate must be a date in YYYY-MM-DD format");
    }
}
