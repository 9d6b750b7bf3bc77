//! Entry point: load config, wire dependencies, and run the server.

use std::sync::Arc;

use petgate::auth::{AuthService, JwtCodec};
use petgate::config::Config;
use petgate::db::{self, PgCredentialStore, PgPetStore, PgRevocationLedger};
use petgate::{create_app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::create_pool(&config.database_url).await?;
    let credentials = Arc::new(PgCredentialStore::new(pool.clone()));
    let revoked = Arc::new(PgRevocationLedger::new(pool.clone()));
    let codec = JwtCodec::new(config.secret_key.clone(), config.token_ttl);
    let auth = AuthService::new(credentials, revoked, codec);

    let state = AppState {
        auth,
        pets: Arc::new(PgPetStore::new(pool)),
        hide_resources: config.hide_resources,
    };

    let app = create_app(state);

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
