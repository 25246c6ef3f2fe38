pub mod catalog;
pub mod medicine;
pub mod purchase;
