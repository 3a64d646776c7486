use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// A payment submission for a product, as posted by the checkout page.
///
/// Only `orderId` and `transactionId` are interpreted; the whole payload is
/// stored untouched as the payment record.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementRequest {
    pub order_id: String,
    pub transaction_id: Bson,
    pub payment: Document,
}

impl SettlementRequest {
    pub fn from_document(payment: Document) -> ApiResult<Self> {
        let order_id = payment
            .get_str("orderId")
            .map_err(|_| ApiError::BadRequest("orderId is required".to_string()))?
            .to_string();
        let transaction_id = match payment.get("transactionId") {
            Some(Bson::Null) | None => {
                return Err(ApiError::BadRequest("transactionId is required".to_string()))
            }
            Some(value) => value.clone(),
        };

        Ok(SettlementRequest {
            order_id,
            transaction_id,
            payment,
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct PaymentIntentRequest {
    pub price: f64,
}

impl PaymentIntentRequest {
    /// Price converted to the provider's minor currency unit.
    pub fn amount_in_cents(&self) -> ApiResult<i64> {
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ApiError::BadRequest(format!("invalid price: {}", self.price)));
        }
        Ok((self.price * 100.0).round() as i64)
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn settlement_request_keeps_the_full_payload() {
        let payment = doc! {
            "orderId": "64b000000000000000000001",
            "transactionId": "pi_123",
            "price": 40,
            "email": "b@x.com",
        };
        let request = SettlementRequest::from_document(payment.clone()).unwrap();

        assert_eq!(request.order_id, "64b000000000000000000001");
        assert_eq!(request.transaction_id, Bson::String("pi_123".into()));
        assert_eq!(request.payment, payment);
    }

    #[test]
    fn settlement_request_requires_order_and_transaction() {
        let missing_order = SettlementRequest::from_document(doc! { "transactionId": "pi_1" });
        assert!(matches!(missing_order, Err(ApiError::BadRequest(m)) if m.contains("orderId")));

        let null_transaction =
            SettlementRequest::from_document(doc! { "orderId": "o", "transactionId": Bson::Null });
        assert!(matches!(null_transaction, Err(ApiError::BadRequest(m)) if m.contains("transactionId")));
    }

    #[test]
    fn prices_convert_to_cents() {
        assert_eq!(PaymentIntentRequest { price: 19.99 }.amount_in_cents().unwrap(), 1999);
        assert_eq!(PaymentIntentRequest { price: 250.0 }.amount_in_cents().unwrap(), 25000);
        assert!(PaymentIntentRequest { price: 0.0 }.amount_in_cents().is_err());
        assert!(PaymentIntentRequest { price: f64::NAN }.amount_in_cents().is_err());
    }
}
