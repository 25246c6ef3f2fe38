// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{CatalogRepository, MedicineRepository, PurchaseRepository},
    services::{CatalogService, MedicineService, PurchaseService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub catalog_service: CatalogService,
    pub medicine_service: MedicineService,
    pub purchase_service: PurchaseService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let medicine_repo = MedicineRepository::new(db_pool.clone());
        let purchase_repo = PurchaseRepository::new(db_pool.clone());

        let catalog_service = CatalogService::new(
            catalog_repo,
            medicine_repo.clone(),
            db_pool.clone(),
        );
        let medicine_service = MedicineService::new(medicine_repo.clone(), db_pool.clone());
        let purchase_service = PurchaseService::new(
            purchase_repo,
            medicine_repo,
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            catalog_service,
            medicine_service,
            purchase_service,
        })
    }
}
