// src/services/medicine_service.rs

use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;

use crate::{
    common::{
        error::AppError,
        validate::{normalize_loose, normalize_name, parse_object_id, parse_positive_money},
    },
    db::MedicineRepository,
    models::medicine::Medicine,
};

// Campos do remédio já normalizados, com o título composto e o slug.
#[derive(Debug, PartialEq)]
struct ValidatedMedicine {
    shop_name: String,
    medicine_name: String,
    generic_name: String,
    company_name: String,
    strength: String,
    dosage_form: String,
    medicine_title: String,
    medicine_title_slug: String,
    purchase_price: Decimal,
    sell_price: Decimal,
}

pub struct MedicineListing {
    pub shop_name: String,
    pub data_found: i64,
    pub page: i64,
    pub limit: i64,
    pub medicines: Vec<Medicine>,
}

#[derive(Clone)]
pub struct MedicineService {
    medicine_repo: MedicineRepository,
    pool: PgPool,
}

impl MedicineService {
    pub fn new(medicine_repo: MedicineRepository, pool: PgPool) -> Self {
        Self {
            medicine_repo,
            pool,
        }
    }

    /// Cadastra um remédio com os contadores zerados. O título composto
    /// (forma + nome + dosagem) precisa ser único dentro da loja.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_medicine(
        &self,
        shop_name: &str,
        medicine_name: &str,
        generic_name: &str,
        company_name: &str,
        strength: &str,
        dosage_form: &str,
        purchase_price: &Value,
        sell_price: &Value,
    ) -> Result<Medicine, AppError> {
        let v = validate_medicine(
            shop_name,
            medicine_name,
            generic_name,
            company_name,
            strength,
            dosage_form,
            purchase_price,
            sell_price,
        )?;

        let exists = self
            .medicine_repo
            .find_by_title(&self.pool, &v.shop_name, &v.medicine_title)
            .await?;
        if exists.is_some() {
            return Err(AppError::AlreadyExists(
                "Already exists this medicine".to_string(),
            ));
        }

        let medicine = self
            .medicine_repo
            .create(
                &self.pool,
                &v.shop_name,
                &v.medicine_title,
                &v.medicine_title_slug,
                &v.medicine_name,
                &v.generic_name,
                &v.company_name,
                &v.strength,
                &v.dosage_form,
                v.purchase_price,
                v.sell_price,
            )
            .await?;

        Ok(medicine)
    }

    pub async fn get_medicines(
        &self,
        shop_name: Option<&str>,
        search: &str,
        page: i64,
        limit: i64,
    ) -> Result<MedicineListing, AppError> {
        let shop_name = require_shop(shop_name)?;

        let offset = (page - 1) * limit;
        let medicines = self
            .medicine_repo
            .list(&self.pool, &shop_name, search, limit, offset)
            .await?;
        let data_found = self
            .medicine_repo
            .count_listed(&self.pool, &shop_name, search)
            .await?;

        Ok(MedicineListing {
            shop_name,
            data_found,
            page,
            limit,
            medicines,
        })
    }

    pub async fn get_single_medicine(&self, id: &str) -> Result<Medicine, AppError> {
        let id = parse_object_id(id)?;
        self.medicine_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("No medicine found with this Id".to_string()))
    }

    pub async fn delete_medicine(&self, id: &str) -> Result<(), AppError> {
        let id = parse_object_id(id)?;
        let deleted = self.medicine_repo.delete(&self.pool, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("No such medicine found.".to_string()));
        }
        Ok(())
    }
}

fn require_shop(shop_name: Option<&str>) -> Result<String, AppError> {
    let shop_name = shop_name
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Shop name is required in query".to_string()))?;
    normalize_name(shop_name, "Shop")
}

#[allow(clippy::too_many_arguments)]
fn validate_medicine(
    shop_name: &str,
    medicine_name: &str,
    generic_name: &str,
    company_name: &str,
    strength: &str,
    dosage_form: &str,
    purchase_price: &Value,
    sell_price: &Value,
) -> Result<ValidatedMedicine, AppError> {
    let shop_name = normalize_name(shop_name, "Shop")?;
    let medicine_name = normalize_name(medicine_name, "Medicine")?;
    let generic_name = normalize_name(generic_name, "Generic")?;
    let company_name = normalize_name(company_name, "Company")?;
    let strength = normalize_loose(strength);
    let dosage_form = normalize_name(dosage_form, "Dosage form")?;

    let purchase_price = parse_positive_money(purchase_price, "Purchase price")?;
    let sell_price = parse_positive_money(sell_price, "Sell price")?;
    if purchase_price >= sell_price {
        return Err(AppError::Validation(
            "Sell price must be more than purchase price".to_string(),
        ));
    }

    let medicine_title = format!("{dosage_form} {medicine_name} {strength}");
    let medicine_title_slug = slug::slugify(&medicine_title);

    Ok(ValidatedMedicine {
        shop_name,
        medicine_name,
        generic_name,
        company_name,
        strength,
        dosage_form,
        medicine_title,
        medicine_title_slug,
        purchase_price,
        sell_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn title_is_composed_from_form_name_and_strength() {
        let v = validate_medicine(
            "Sunrise Pharmacy",
            "Napa  Extra",
            "Paracetamol",
            "Beximco",
            " 500 MG ",
            "Tablet",
            &json!("8"),
            &json!("10"),
        )
        .unwrap();

        assert_eq!(v.medicine_title, "tablet napa extra 500 mg");
        assert_eq!(v.medicine_title_slug, "tablet-napa-extra-500-mg");
        assert_eq!(v.strength, "500 mg");
    }

    #[test]
    fn sell_price_must_exceed_purchase_price() {
        let err = validate_medicine(
            "Sunrise Pharmacy",
            "Napa",
            "Paracetamol",
            "Beximco",
            "500 mg",
            "Tablet",
            &json!("10"),
            &json!("10"),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Sell price must be more than purchase price");
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let err = validate_medicine(
            "Sunrise Pharmacy",
            "Napa",
            "Paracetamol",
            "Beximco",
            "500 mg",
            "Tablet",
            &json!("ten"),
            &json!("12"),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Purchase price must be a positive number");
    }

    #[test]
    fn shop_name_rules_apply() {
        let err = validate_medicine(
            "@x",
            "Napa",
            "Paracetamol",
            "Beximco",
            "500 mg",
            "Tablet",
            &json!("8"),
            &json!("10"),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Shop name cannot start with a special character"
        );
    }
}
