pub mod document;
pub mod payment;
pub mod product;
pub mod user;
