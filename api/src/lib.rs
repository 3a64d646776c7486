#[macro_use]
extern crate rocket;

pub mod config;
pub mod error;
pub mod jwt;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

use std::sync::Arc;

use rocket::figment::Provider;
use rocket::{Build, Rocket};

use jwt::jwt_helper::TokenService;
use repository::{
    advertise_repository::AdvertiseRepository, booking_repository::BookingRepository,
    catalog_repository::CatalogRepository, payment_repository::PaymentRepository,
    product_repository::ProductRepository, report_repository::ReportRepository,
    store::StoreHandle, user_repository::UserRepository,
};
use services::fairings::{Cors, RequestLogger};
use services::payment_gateway::{PaymentGateway, PaymentService};

/// Everything the server needs from the outside world.
pub struct AppContext {
    pub store: StoreHandle,
    pub tokens: TokenService,
    pub gateway: Arc<dyn PaymentGateway>,
}

pub fn build_rocket<T: Provider>(provider: T, context: AppContext) -> Rocket<Build> {
    let AppContext {
        store,
        tokens,
        gateway,
    } = context;

    rocket::custom(provider)
        .manage(UserRepository::new(&store))
        .manage(ProductRepository::new(&store))
        .manage(BookingRepository::new(&store))
        .manage(PaymentRepository::new(&store))
        .manage(AdvertiseRepository::new(&store))
        .manage(ReportRepository::new(&store))
        .manage(CatalogRepository::new(&store))
        .manage(tokens)
        .manage(PaymentService::new(gateway))
        .attach(Cors)
        .attach(RequestLogger)
        .mount("/", routes::all())
        .register("/", routes::catchers())
}
