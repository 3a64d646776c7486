pub mod auth_guard;
pub mod fairings;
pub mod payment_gateway;
pub mod settlement;
