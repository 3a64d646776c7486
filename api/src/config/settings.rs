use std::net::IpAddr;
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use crate::services::payment_gateway::{DisabledGateway, PaymentGateway, StripeGateway};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// MongoDB server or cluster.
    Mongo,
    /// In-process store, lost on exit.
    Memory,
}

/// E-Buy marketplace API server.
#[derive(Debug, Clone, Parser)]
#[command(name = "ebuy", version, about)]
pub struct Settings {
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    #[arg(long, env = "ADDRESS", default_value = "0.0.0.0")]
    pub address: IpAddr,

    #[arg(long, env = "EBUY_STORE", value_enum, default_value_t = StoreKind::Mongo)]
    pub store: StoreKind,

    #[arg(long, env = "MONGO_URI", default_value = "mongodb://localhost:27017")]
    pub mongo_uri: String,

    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    #[arg(long, env = "DB_NAME", default_value = "ebuy")]
    pub db_name: String,

    /// Secret used to sign and verify access tokens.
    #[arg(long, env = "ACCESS_TOKEN_SECRET", hide_env_values = true)]
    pub access_token_secret: String,

    /// Payment intents are refused with 503 when unset.
    #[arg(long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    pub stripe_secret_key: Option<String>,

    #[arg(long, env = "STRIPE_API_BASE", default_value = "https://api.stripe.com")]
    pub stripe_api_base: String,

    #[arg(long, env = "PAYMENT_CURRENCY", default_value = "usd")]
    pub currency: String,
}

impl Settings {
    pub fn payment_gateway(&self) -> Arc<dyn PaymentGateway> {
        match &self.stripe_secret_key {
            Some(secret) => Arc::new(StripeGateway::new(
                &self.stripe_api_base,
                secret,
                &self.currency,
            )),
            None => {
                tracing::warn!("STRIPE_SECRET_KEY is not set, payment intents are disabled");
                Arc::new(DisabledGateway)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_kind_is_selectable() {
        let settings = Settings::try_parse_from([
            "ebuy",
            "--access-token-secret",
            "s3cret",
            "--store",
            "memory",
            "--port",
            "8080",
        ])
        .unwrap();

        assert_eq!(settings.store, StoreKind::Memory);
        assert_eq!(settings.port, 8080);
    }
}
