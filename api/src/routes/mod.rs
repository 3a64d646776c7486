use rocket::serde::json::{json, Json, Value};
use rocket::{Catcher, Request, Route};

use crate::error::{FORBIDDEN_MESSAGE, UNAUTHORIZED_MESSAGE};
use crate::services::fairings;

pub mod advertise;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod payments;
pub mod products;
pub mod reports;
pub mod users;

pub fn all() -> Vec<Route> {
    routes![
        fairings::preflight,
        catalog::index,
        catalog::get_all_categories,
        catalog::get_new_arrivals,
        auth::issue_token,
        users::create_user,
        users::get_user_by_email,
        users::is_seller,
        users::is_admin,
        users::get_sellers,
        users::get_buyers,
        users::delete_seller,
        products::add_product,
        products::get_products_by_name,
        products::get_seller_products,
        products::verify_seller,
        products::delete_product,
        bookings::add_booking,
        bookings::get_bookings,
        bookings::get_booking_for_payment,
        payments::create_payment_intent,
        payments::settle_payment,
        advertise::advertise_item,
        advertise::get_advertised_items,
        reports::report_item,
        reports::get_reported_items,
        reports::get_reported_item,
        reports::delete_reported_item,
    ]
}

fn message(text: impl Into<String>) -> Json<Value> {
    Json(json!({ "message": text.into() }))
}

#[catch(400)]
fn bad_request() -> Json<Value> {
    message("Bad request")
}

#[catch(401)]
fn unauthorized() -> Json<Value> {
    message(UNAUTHORIZED_MESSAGE)
}

#[catch(403)]
fn forbidden() -> Json<Value> {
    message(FORBIDDEN_MESSAGE)
}

#[catch(404)]
fn not_found(req: &Request) -> Json<Value> {
    message(format!("'{}' route not found", req.uri()))
}

#[catch(422)]
fn unprocessable() -> Json<Value> {
    message("Request body could not be parsed")
}

#[catch(500)]
fn internal_error() -> Json<Value> {
    message("Internal server error")
}

pub fn catchers() -> Vec<Catcher> {
    catchers![
        bad_request,
        unauthorized,
        forbidden,
        not_found,
        unprocessable,
        internal_error
    ]
}
