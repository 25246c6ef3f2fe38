// src/db/catalog_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Company, DosageForm, Generic},
};

// Repositório do catálogo: genéricos, fornecedores e formas de dosagem.
// Três tabelas com o mesmo formato, então as funções se repetem de
// propósito, uma família por tabela.
#[derive(Clone)]
pub struct CatalogRepository {
    #[allow(dead_code)]
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Genéricos / Grupos
    // ---

    pub async fn create_generic<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        shop_slug: &str,
        generic_name: &str,
        generic_slug: &str,
    ) -> Result<Generic, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Generic>(
            r#"
            INSERT INTO generics (shop_name, shop_slug, generic_name, generic_slug)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(shop_name)
        .bind(shop_slug)
        .bind(generic_name)
        .bind(generic_slug)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists("Already exists this generic".to_string());
                }
            }
            e.into()
        })
    }

    pub async fn list_generics<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Generic>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let generics = sqlx::query_as::<_, Generic>(
            r#"
            SELECT * FROM generics
            WHERE shop_name = $1 AND generic_name ILIKE $2
            ORDER BY generic_name ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(shop_name)
        .bind(format!("%{search}%"))
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;
        Ok(generics)
    }

    pub async fn count_generics<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        search: &str,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM generics WHERE shop_name = $1 AND generic_name ILIKE $2",
        )
        .bind(shop_name)
        .bind(format!("%{search}%"))
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    pub async fn find_generic_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Generic>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let generic = sqlx::query_as::<_, Generic>("SELECT * FROM generics WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(generic)
    }

    pub async fn delete_generic<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM generics WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // ---
    // Fornecedores
    // ---

    pub async fn create_company<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        shop_slug: &str,
        company_name: &str,
        company_slug: &str,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (shop_name, shop_slug, company_name, company_slug)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(shop_name)
        .bind(shop_slug)
        .bind(company_name)
        .bind(company_slug)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists(
                        "Already exists this company/supplier".to_string(),
                    );
                }
            }
            e.into()
        })
    }

    pub async fn list_companies<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Company>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT * FROM companies
            WHERE shop_name = $1 AND company_name ILIKE $2
            ORDER BY company_name ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(shop_name)
        .bind(format!("%{search}%"))
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;
        Ok(companies)
    }

    pub async fn count_companies<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        search: &str,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM companies WHERE shop_name = $1 AND company_name ILIKE $2",
        )
        .bind(shop_name)
        .bind(format!("%{search}%"))
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    pub async fn find_company_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Company>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(company)
    }

    pub async fn delete_company<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // ---
    // Formas de dosagem
    // ---

    pub async fn create_dosage_form<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        shop_slug: &str,
        dosage_form: &str,
        dosage_form_slug: &str,
    ) -> Result<DosageForm, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, DosageForm>(
            r#"
            INSERT INTO dosage_forms (shop_name, shop_slug, dosage_form, dosage_form_slug)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(shop_name)
        .bind(shop_slug)
        .bind(dosage_form)
        .bind(dosage_form_slug)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists("Already exists this dosage form".to_string());
                }
            }
            e.into()
        })
    }

    pub async fn list_dosage_forms<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DosageForm>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let dosage_forms = sqlx::query_as::<_, DosageForm>(
            r#"
            SELECT * FROM dosage_forms
            WHERE shop_name = $1 AND dosage_form ILIKE $2
            ORDER BY dosage_form ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(shop_name)
        .bind(format!("%{search}%"))
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;
        Ok(dosage_forms)
    }

    pub async fn count_dosage_forms<'e, E>(
        &self,
        executor: E,
        shop_name: &str,
        search: &str,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM dosage_forms WHERE shop_name = $1 AND dosage_form ILIKE $2",
        )
        .bind(shop_name)
        .bind(format!("%{search}%"))
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    pub async fn delete_dosage_form<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM dosage_forms WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
