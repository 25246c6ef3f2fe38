pub mod companies;
pub mod dosage_forms;
pub mod generics;
pub mod medicines;
pub mod purchases;
