// src/db/medicine_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::medicine::Medicine};

// Repositório dos remédios, responsável por todas as interações com a
// tabela 'medicines'. As funções aceitam um executor genérico para poderem
// rodar dentro de uma transação quando o serviço precisar.
#[derive(Clone)]
pub struct MedicineRepository {
    #[allow(dead_code)]
    pool: PgPool,
}

impl MedicineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Medicine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let medicine = sqlx::query_as::<_, Medicine>("SELECT * FROM medicines WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(medicine)
    }

    /// Resolve um lote de ids em uma única consulta (checagem de existência
    /// do fluxo de compras).
    pub async fn find_by_ids<'e, E>(
        &self,
        executor: E,
        ids: &[Uuid],
    ) -> Result<Vec<Medicine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let medicines =
            sqlx::query_as::<_, Medicine>("SELECT * FROM medicines WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(executor)
                .await?;
        Ok(medicines)
    }

    pub async fn find_by_title<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        medicine_title: &str,
    ) -> Result<Option<Medicine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let medicine = sqlx::query_as::<_, Medicine>(
            "SELECT * FROM medicines WHERE shop_name = $1 AND medicine_title = $2",
        )
        .bind(shop_name)
        .bind(medicine_title)
        .fetch_optional(executor)
        .await?;
        Ok(medicine)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        medicine_title: &str,
        medicine_title_slug: &str,
        medicine_name: &str,
        generic_name: &str,
        company_name: &str,
        strength: &str,
        dosage_form: &str,
        purchase_price: Decimal,
        sell_price: Decimal,
    ) -> Result<Medicine, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Medicine>(
            r#"
            INSERT INTO medicines (
                shop_name, medicine_title, medicine_title_slug, medicine_name,
                generic_name, company_name, strength, dosage_form,
                purchase_price, sell_price
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(shop_name)
        .bind(medicine_title)
        .bind(medicine_title_slug)
        .bind(medicine_name)
        .bind(generic_name)
        .bind(company_name)
        .bind(strength)
        .bind(dosage_form)
        .bind(purchase_price)
        .bind(sell_price)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Converte violação de chave única na mensagem amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists("Already exists this medicine".to_string());
                }
            }
            e.into()
        })
    }

    /// Incrementa os contadores de estoque de um remédio. Dentro da
    /// transação da compra isso é um ponto de atualização atômico.
    pub async fn increment_stock<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        quantity: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE medicines
            SET stock_left = stock_left + $2,
                lifetime_supply = lifetime_supply + $2,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(quantity)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Medicine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pattern = format!("%{search}%");
        let medicines = sqlx::query_as::<_, Medicine>(
            r#"
            SELECT * FROM medicines
            WHERE shop_name = $1
              AND (medicine_title ILIKE $2 OR generic_name ILIKE $2 OR company_name ILIKE $2)
            ORDER BY medicine_title ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(shop_name)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;
        Ok(medicines)
    }

    pub async fn count_listed<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        search: &str,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pattern = format!("%{search}%");
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM medicines
            WHERE shop_name = $1
              AND (medicine_title ILIKE $2 OR generic_name ILIKE $2 OR company_name ILIKE $2)
            "#,
        )
        .bind(shop_name)
        .bind(pattern)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    pub async fn count_by_company<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        company_name: &str,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM medicines WHERE shop_name = $1 AND company_name = $2",
        )
        .bind(shop_name)
        .bind(company_name)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    pub async fn find_by_company<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        company_name: &str,
    ) -> Result<Vec<Medicine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let medicines = sqlx::query_as::<_, Medicine>(
            r#"
            SELECT * FROM medicines
            WHERE shop_name = $1 AND company_name = $2
            ORDER BY medicine_title ASC
            "#,
        )
        .bind(shop_name)
        .bind(company_name)
        .fetch_all(executor)
        .await?;
        Ok(medicines)
    }

    pub async fn count_by_dosage_form<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        dosage_form: &str,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM medicines WHERE shop_name = $1 AND dosage_form = $2",
        )
        .bind(shop_name)
        .bind(dosage_form)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    /// Remove um remédio; devolve quantas linhas sumiram para o serviço
    /// decidir entre 404 e sucesso.
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM medicines WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
