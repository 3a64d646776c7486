use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ebuy::config::mongo_config::open_store;
use ebuy::config::settings::Settings;
use ebuy::jwt::jwt_helper::TokenService;
use ebuy::{build_rocket, AppContext};

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ebuy=info,rocket=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::parse();

    let store = match open_store(&settings).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "failed to open the document store");
            return Err(e.into());
        }
    };

    let context = AppContext {
        store,
        tokens: TokenService::new(settings.access_token_secret.as_bytes()),
        gateway: settings.payment_gateway(),
    };

    let figment = rocket::Config::figment()
        .merge(("port", settings.port))
        .merge(("address", settings.address));

    tracing::info!(port = settings.port, "E-Buy server is running");
    build_rocket(figment, context)
        .launch()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "server stopped with an error");
            anyhow::anyhow!("server stopped with an error: {e}")
        })?;

    Ok(())
}
