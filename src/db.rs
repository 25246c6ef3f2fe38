pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod medicine_repo;
pub use medicine_repo::MedicineRepository;
pub mod purchase_repo;
pub use purchase_repo::PurchaseRepository;
