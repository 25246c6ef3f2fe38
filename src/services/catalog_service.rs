// src/services/catalog_service.rs

use sqlx::PgPool;

use crate::{
    common::{
        error::AppError,
        validate::{normalize_name, parse_object_id},
    },
    db::{CatalogRepository, MedicineRepository},
    models::catalog::{
        Company, CompanyDetail, CompanyListEntry, DosageForm, DosageFormListEntry, Generic,
    },
};

pub struct CatalogListing<T> {
    pub shop_name: String,
    pub data_found: i64,
    pub page: i64,
    pub limit: i64,
    pub data: Vec<T>,
}

// Serviço fino sobre o catálogo: normaliza nomes, calcula slugs e delega ao
// repositório. A unicidade por loja fica por conta das constraints.
#[derive(Clone)]
pub struct CatalogService {
    catalog_repo: CatalogRepository,
    medicine_repo: MedicineRepository,
    pool: PgPool,
}

impl CatalogService {
    pub fn new(
        catalog_repo: CatalogRepository,
        medicine_repo: MedicineRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            catalog_repo,
            medicine_repo,
            pool,
        }
    }

    // ---
    // Genéricos / Grupos
    // ---

    pub async fn create_generic(
        &self,
        generic_name: &str,
        shop_name: &str,
    ) -> Result<Generic, AppError> {
        let generic_name = normalize_name(generic_name, "Generic")?;
        let shop_name = normalize_name(shop_name, "Shop name")?;

        self.catalog_repo
            .create_generic(
                &self.pool,
                &shop_name,
                &slug::slugify(&shop_name),
                &generic_name,
                &slug::slugify(&generic_name),
            )
            .await
    }

    pub async fn list_generics(
        &self,
        shop_name: Option<&str>,
        search: &str,
        page: i64,
        limit: i64,
    ) -> Result<CatalogListing<Generic>, AppError> {
        let shop_name = require_shop(shop_name)?;

        let offset = (page - 1) * limit;
        let data = self
            .catalog_repo
            .list_generics(&self.pool, &shop_name, search, limit, offset)
            .await?;
        let data_found = self
            .catalog_repo
            .count_generics(&self.pool, &shop_name, search)
            .await?;

        Ok(CatalogListing {
            shop_name,
            data_found,
            page,
            limit,
            data,
        })
    }

    pub async fn get_single_generic(&self, id: &str) -> Result<Generic, AppError> {
        let id = parse_object_id(id)?;
        self.catalog_repo
            .find_generic_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("No generic found with this Id".to_string()))
    }

    pub async fn delete_generic(&self, id: &str) -> Result<(), AppError> {
        let id = parse_object_id(id)?;
        let deleted = self.catalog_repo.delete_generic(&self.pool, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("No such generic found.".to_string()));
        }
        Ok(())
    }

    // ---
    // Fornecedores
    // ---

    pub async fn create_company(
        &self,
        company_name: &str,
        shop_name: &str,
    ) -> Result<Company, AppError> {
        let company_name = normalize_name(company_name, "Company")?;
        let shop_name = normalize_name(shop_name, "Shop name")?;

        self.catalog_repo
            .create_company(
                &self.pool,
                &shop_name,
                &slug::slugify(&shop_name),
                &company_name,
                &slug::slugify(&company_name),
            )
            .await
    }

    /// Lista os fornecedores da loja, cada um com a contagem de remédios
    /// disponíveis dele.
    pub async fn list_companies(
        &self,
        shop_name: Option<&str>,
        search: &str,
        page: i64,
        limit: i64,
    ) -> Result<CatalogListing<CompanyListEntry>, AppError> {
        let shop_name = require_shop(shop_name)?;

        let offset = (page - 1) * limit;
        let companies = self
            .catalog_repo
            .list_companies(&self.pool, &shop_name, search, limit, offset)
            .await?;
        let data_found = self
            .catalog_repo
            .count_companies(&self.pool, &shop_name, search)
            .await?;

        let mut data = Vec::with_capacity(companies.len());
        for company in companies {
            let medicine_available = self
                .medicine_repo
                .count_by_company(&self.pool, &shop_name, &company.company_name)
                .await?;
            data.push(CompanyListEntry {
                company,
                medicine_available,
            });
        }

        Ok(CatalogListing {
            shop_name,
            data_found,
            page,
            limit,
            data,
        })
    }

    pub async fn get_single_company(&self, id: &str) -> Result<CompanyDetail, AppError> {
        let id = parse_object_id(id)?;
        let company = self
            .catalog_repo
            .find_company_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("No company found with this Id".to_string()))?;

        let medicine_available = self
            .medicine_repo
            .find_by_company(&self.pool, &company.shop_name, &company.company_name)
            .await?;

        Ok(CompanyDetail {
            company,
            medicine_available,
        })
    }

    pub async fn delete_company(&self, id: &str) -> Result<(), AppError> {
        let id = parse_object_id(id)?;
        let deleted = self.catalog_repo.delete_company(&self.pool, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("No such company found.".to_string()));
        }
        Ok(())
    }

    // ---
    // Formas de dosagem
    // ---

    pub async fn create_dosage_form(
        &self,
        dosage_form: &str,
        shop_name: &str,
    ) -> Result<DosageForm, AppError> {
        let dosage_form = normalize_name(dosage_form, "Dosage form")?;
        let shop_name = normalize_name(shop_name, "Shop name")?;

        self.catalog_repo
            .create_dosage_form(
                &self.pool,
                &shop_name,
                &slug::slugify(&shop_name),
                &dosage_form,
                &slug::slugify(&dosage_form),
            )
            .await
    }

    pub async fn list_dosage_forms(
        &self,
        shop_name: Option<&str>,
        search: &str,
        page: i64,
        limit: i64,
    ) -> Result<CatalogListing<DosageFormListEntry>, AppError> {
        let shop_name = require_shop(shop_name)?;

        let offset = (page - 1) * limit;
        let dosage_forms = self
            .catalog_repo
            .list_dosage_forms(&self.pool, &shop_name, search, limit, offset)
            .await?;
        let data_found = self
            .catalog_repo
            .count_dosage_forms(&self.pool, &shop_name, search)
            .await?;

        let mut data = Vec::with_capacity(dosage_forms.len());
        for dosage_form in dosage_forms {
            let medicine_available = self
                .medicine_repo
                .count_by_dosage_form(&self.pool, &shop_name, &dosage_form.dosage_form)
                .await?;
            data.push(DosageFormListEntry {
                dosage_form,
                medicine_available,
            });
        }

        Ok(CatalogListing {
            shop_name,
            data_found,
            page,
            limit,
            data,
        })
    }

    pub async fn delete_dosage_form(&self, id: &str) -> Result<(), AppError> {
        let id = parse_object_id(id)?;
        let deleted = self.catalog_repo.delete_dosage_form(&self.pool, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("No such dosage form found.".to_string()));
        }
        Ok(())
    }
}

fn require_shop(shop_name: Option<&str>) -> Result<String, AppError> {
    let shop_name = shop_name
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("shop name is required to find data".to_string()))?;
    normalize_name(shop_name, "shop name")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_requires_shop_name() {
        let err = require_shop(None).unwrap_err();
        assert_eq!(err.to_string(), "shop name is required to find data");

        let err = require_shop(Some("   ")).unwrap_err();
        assert_eq!(err.to_string(), "shop name is required to find data");
    }

    #[test]
    fn shop_name_is_normalized_for_listing() {
        assert_eq!(
            require_shop(Some("Sunrise  Pharmacy")).unwrap(),
            "sunrise pharmacy"
        );
    }
}
