// src/docs.rs

use crate::handlers;
use crate::models;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Generics ---
        handlers::generics::create_generic,
        handlers::generics::get_all_generics,
        handlers::generics::get_single_generic,
        handlers::generics::delete_generic,

        // --- Companies ---
        handlers::companies::create_company,
        handlers::companies::get_all_companies,
        handlers::companies::get_single_company,
        handlers::companies::delete_company,

        // --- Dosage forms ---
        handlers::dosage_forms::create_dosage_form,
        handlers::dosage_forms::get_all_dosage_forms,
        handlers::dosage_forms::delete_dosage_form,

        // --- Medicines ---
        handlers::medicines::create_medicine,
        handlers::medicines::get_all_medicines,
        handlers::medicines::get_single_medicine,
        handlers::medicines::delete_medicine,

        // --- Purchases ---
        handlers::purchases::create_purchase,
        handlers::purchases::get_all_purchases,
    ),
    components(
        schemas(
            // --- Catálogo ---
            models::catalog::Generic,
            models::catalog::Company,
            models::catalog::CompanyListEntry,
            models::catalog::CompanyDetail,
            models::catalog::DosageForm,
            models::catalog::DosageFormListEntry,

            // --- Medicines ---
            models::medicine::Medicine,

            // --- Purchases ---
            models::purchase::Purchase,
            models::purchase::PurchaseItem,
            models::purchase::PurchaseWithItems,
            models::purchase::CreatePurchasePayload,
            models::purchase::PurchaseItemPayload,

            // --- Payloads ---
            handlers::generics::CreateGenericPayload,
            handlers::companies::CreateCompanyPayload,
            handlers::dosage_forms::CreateDosageFormPayload,
            handlers::medicines::CreateMedicinePayload,
        )
    ),
    tags(
        (name = "Generics", description = "Genéricos / Grupos de remédios"),
        (name = "Companies", description = "Fornecedores da loja"),
        (name = "Dosage forms", description = "Formas de dosagem"),
        (name = "Medicines", description = "Cadastro e consulta de remédios"),
        (name = "Purchases", description = "Notas de compra e reposição de estoque")
    )
)]
pub struct ApiDoc;
