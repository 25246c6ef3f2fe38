// src/db/purchase_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::purchase::{Purchase, PurchaseItem},
};

// Termo de busca livre da listagem: quando o texto tem a forma de um id,
// vira uma consulta direta por chave; senão, busca por substring.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchTerm {
    Id(Uuid),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PurchaseSort {
    // Padrão: ordem de criação
    #[default]
    CreatedAtAsc,
    PriceLowToHigh,
    PriceHighToLow,
}

#[derive(Debug, Clone)]
pub struct PurchaseListFilter {
    pub shop_name: String,
    pub company_name: Option<String>,
    pub category: Option<String>,
    pub search: Option<SearchTerm>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub sort: PurchaseSort,
    pub page: i64,
    pub limit: i64,
}

impl PurchaseListFilter {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

// Repositório do livro de compras: contador por loja, inserções e a
// listagem filtrada.
#[derive(Clone)]
pub struct PurchaseRepository {
    #[allow(dead_code)]
    pool: PgPool,
}

impl PurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reserva o próximo número sequencial de compra da loja.
    ///
    /// O UPSERT é atômico e trava a linha do contador até o commit, então
    /// compras concorrentes da mesma loja serializam aqui e nunca repetem
    /// número.
    pub async fn next_purchase_number<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let number = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO purchase_counters (shop_name, last_value)
            VALUES ($1, 1)
            ON CONFLICT (shop_name)
            DO UPDATE SET last_value = purchase_counters.last_value + 1
            RETURNING last_value
            "#,
        )
        .bind(shop_name)
        .fetch_one(executor)
        .await?;
        Ok(number)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_purchase<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        purchase_number: i64,
        company_name: &str,
        category: &str,
        total_price: Decimal,
        total_discount: Decimal,
        total_tax: Decimal,
    ) -> Result<Purchase, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            INSERT INTO purchases (
                shop_name, purchase_id, company_name, category,
                total_price, total_discount, total_tax
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(shop_name)
        .bind(purchase_number)
        .bind(company_name)
        .bind(category)
        .bind(total_price)
        .bind(total_discount)
        .bind(total_tax)
        .fetch_one(executor)
        .await?;
        Ok(purchase)
    }

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        purchase: Uuid,
        position: i32,
        medicine_id: Uuid,
        company_name: &str,
        purchase_quantity: i64,
    ) -> Result<PurchaseItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, PurchaseItem>(
            r#"
            INSERT INTO purchase_items (
                purchase_id, position, medicine_id, company_name, purchase_quantity
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(purchase)
        .bind(position)
        .bind(medicine_id)
        .bind(company_name)
        .bind(purchase_quantity)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    /// Itens de um conjunto de compras, já na ordem do payload original.
    pub async fn items_for_purchases<'e, E>(
        &self,
        executor: E,
        purchase_ids: &[Uuid],
    ) -> Result<Vec<PurchaseItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, PurchaseItem>(
            r#"
            SELECT * FROM purchase_items
            WHERE purchase_id = ANY($1)
            ORDER BY purchase_id, position ASC
            "#,
        )
        .bind(purchase_ids)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        filter: &PurchaseListFilter,
    ) -> Result<Vec<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM purchases WHERE ");
        push_filters(&mut qb, filter);

        match filter.sort {
            PurchaseSort::CreatedAtAsc => qb.push(" ORDER BY created_at ASC"),
            PurchaseSort::PriceLowToHigh => qb.push(" ORDER BY total_price ASC"),
            PurchaseSort::PriceHighToLow => qb.push(" ORDER BY total_price DESC"),
        };

        qb.push(" LIMIT ").push_bind(filter.limit);
        qb.push(" OFFSET ").push_bind(filter.offset());

        let purchases = qb
            .build_query_as::<Purchase>()
            .fetch_all(executor)
            .await?;
        Ok(purchases)
    }

    pub async fn count<'e, E>(
        &self,
        executor: E,
        filter: &PurchaseListFilter,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM purchases WHERE ");
        push_filters(&mut qb, filter);

        let count = qb.build_query_scalar::<i64>().fetch_one(executor).await?;
        Ok(count)
    }
}

// A mesma cláusula WHERE serve para a listagem e para a contagem.
fn push_filters<'args>(qb: &mut QueryBuilder<'args, Postgres>, filter: &'args PurchaseListFilter) {
    qb.push("shop_name = ").push_bind(&filter.shop_name);

    if let Some(company_name) = &filter.company_name {
        qb.push(" AND company_name ILIKE ")
            .push_bind(format!("%{company_name}%"));
    }

    if let Some(category) = &filter.category {
        qb.push(" AND category ILIKE ")
            .push_bind(format!("%{category}%"));
    }

    match &filter.search {
        Some(SearchTerm::Id(id)) => {
            qb.push(" AND id = ").push_bind(*id);
        }
        Some(SearchTerm::Text(text)) => {
            let pattern = format!("%{text}%");
            qb.push(" AND (company_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR category ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        None => {}
    }

    if let Some(start) = filter.start_date {
        qb.push(" AND created_at >= ").push_bind(start);
    }
    if let Some(end) = filter.end_date {
        qb.push(" AND created_at <= ").push_bind(end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_filter() -> PurchaseListFilter {
        PurchaseListFilter {
            shop_name: "sunrise pharmacy".to_string(),
            company_name: None,
            category: None,
            search: None,
            start_date: None,
            end_date: None,
            sort: PurchaseSort::default(),
            page: 1,
            limit: 10,
        }
    }

    #[test]
    fn offset_follows_page_and_limit() {
        let mut filter = base_filter();
        assert_eq!(filter.offset(), 0);
        filter.page = 3;
        assert_eq!(filter.offset(), 20);
    }

    #[test]
    fn default_sort_is_created_at_asc() {
        assert_eq!(PurchaseSort::default(), PurchaseSort::CreatedAtAsc);
    }

    #[test]
    fn filters_compose_into_a_single_where_clause() {
        let mut filter = base_filter();
        filter.company_name = Some("acme".to_string());
        filter.search = Some(SearchTerm::Text("otc".to_string()));

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM purchases WHERE ");
        push_filters(&mut qb, &filter);
        let sql = qb.sql();

        assert!(sql.contains("shop_name = $1"));
        assert!(sql.contains("company_name ILIKE $2"));
        assert!(sql.contains("(company_name ILIKE $3 OR category ILIKE $4)"));
    }

    #[test]
    fn id_search_becomes_direct_key_lookup() {
        let mut filter = base_filter();
        filter.search = Some(SearchTerm::Id(Uuid::nil()));

        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM purchases WHERE ");
        push_filters(&mut qb, &filter);

        assert!(qb.sql().contains("id = $2"));
    }
}
