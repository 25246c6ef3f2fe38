pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod medicine_service;
pub use medicine_service::MedicineService;
pub mod purchase_service;
pub use purchase_service::PurchaseService;
