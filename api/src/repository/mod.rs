pub mod advertise_repository;
pub mod booking_repository;
pub mod catalog_repository;
pub mod memory_store;
pub mod mongo_store;
pub mod payment_repository;
pub mod product_repository;
pub mod report_repository;
pub mod store;
pub mod user_repository;
