use std::sync::Arc;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment provider is not configured")]
    NotConfigured,

    #[error("payment provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("payment provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// Creates payment intents with an external card processor.
#[rocket::async_trait]
pub trait PaymentGateway: Send + Sync {
    /// `amount` is in the currency's minor unit (cents).
    async fn create_payment_intent(&self, amount: i64) -> Result<PaymentIntent, PaymentError>;
}

/// Managed wrapper so handlers can take the gateway as Rocket state.
pub struct PaymentService {
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentService {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        PaymentService { gateway }
    }

    pub async fn create_payment_intent(&self, amount: i64) -> Result<PaymentIntent, PaymentError> {
        self.gateway.create_payment_intent(amount).await
    }
}

/// Used when no provider secret is configured.
pub struct DisabledGateway;

#[rocket::async_trait]
impl PaymentGateway for DisabledGateway {
    async fn create_payment_intent(&self, _amount: i64) -> Result<PaymentIntent, PaymentError> {
        Err(PaymentError::NotConfigured)
    }
}

pub struct StripeGateway {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
    currency: String,
}

#[derive(Deserialize)]
struct StripeIntent {
    id: String,
    client_secret: String,
}

#[derive(Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

impl StripeGateway {
    pub fn new(api_base: &str, secret_key: &str, currency: &str) -> Self {
        StripeGateway {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
            currency: currency.to_string(),
        }
    }
}

#[rocket::async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(&self, amount: i64) -> Result<PaymentIntent, PaymentError> {
        let amount = amount.to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", self.currency.as_str()),
            ("payment_method_types[]", "card"),
        ];

        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| "no error message".to_string());
            return Err(PaymentError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let intent = response.json::<StripeIntent>().await?;
        tracing::info!(intent = %intent.id, "payment intent created");
        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
        })
    }
}
