use rocket::serde::json::Json;
use rocket::State;

use crate::error::ApiResult;
use crate::models::document::{document_from_json, JsonObject};
use crate::models::payment::{PaymentIntentRequest, PaymentIntentResponse, SettlementRequest};
use crate::repository::advertise_repository::AdvertiseRepository;
use crate::repository::booking_repository::BookingRepository;
use crate::repository::payment_repository::PaymentRepository;
use crate::repository::product_repository::ProductRepository;
use crate::repository::store::InsertOutcome;
use crate::services::auth_guard::Identity;
use crate::services::payment_gateway::PaymentService;
use crate::services::settlement::Settlement;

#[post("/create-payment-intent", data = "<intent>")]
pub async fn create_payment_intent(
    intent: Json<PaymentIntentRequest>,
    _identity: Identity,
    payments: &State<PaymentService>,
) -> ApiResult<Json<PaymentIntentResponse>> {
    let amount = intent.amount_in_cents()?;
    let intent = payments.create_payment_intent(amount).await?;
    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// Settles a payment for `product_id`; responds with the payment insert only.
#[post("/payments/<product_id>", data = "<payment>")]
pub async fn settle_payment(
    product_id: &str,
    payment: Json<JsonObject>,
    _identity: Identity,
    products: &State<ProductRepository>,
    adverts: &State<AdvertiseRepository>,
    bookings: &State<BookingRepository>,
    payments: &State<PaymentRepository>,
) -> ApiResult<Json<InsertOutcome>> {
    let request = SettlementRequest::from_document(document_from_json(payment.into_inner())?)?;
    let report = Settlement::new(products, adverts, bookings, payments)
        .settle(product_id, request)
        .await?;
    Ok(Json(report.payment))
}
