use rocket::serde::json::{Json, Value};
use rocket::State;

use crate::error::{ApiError, ApiResult};
use crate::models::document::{
    document_from_json, documents_to_json, optional_document_to_json, parse_object_id,
    JsonObject,
};
use crate::repository::booking_repository::BookingRepository;
use crate::repository::store::InsertOutcome;
use crate::services::auth_guard::Identity;

#[post("/bookings", data = "<new_booking>")]
pub async fn add_booking(
    new_booking: Json<JsonObject>,
    bookings: &State<BookingRepository>,
) -> ApiResult<Json<InsertOutcome>> {
    let booking = document_from_json(new_booking.into_inner())?;
    Ok(Json(bookings.add_booking(booking).await?))
}

/// A buyer may only list their own bookings.
#[get("/bookings?<email>")]
pub async fn get_bookings(
    email: Option<&str>,
    identity: Identity,
    bookings: &State<BookingRepository>,
) -> ApiResult<Json<Value>> {
    let email = match email {
        Some(email) if email == identity.email => email,
        _ => return Err(ApiError::Forbidden),
    };
    Ok(Json(documents_to_json(bookings.find_bookings_by_email(email).await?)))
}

#[get("/payment/<id>")]
pub async fn get_booking_for_payment(
    id: &str,
    _identity: Identity,
    bookings: &State<BookingRepository>,
) -> ApiResult<Json<Value>> {
    let booking_id = parse_object_id(id)?;
    let booking = bookings.find_booking_by_id(booking_id).await?;
    Ok(Json(optional_document_to_json(booking)))
}
