use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::ports::AccountServicePort;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::PostgresAccountStore;
use auth::TokenConfig;
use auth::TokenService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_issuer = %config.auth.issuer,
        token_audience = %config.auth.audience,
        token_ttl_minutes = config.auth.expiration_minutes,
        "Configuration loaded"
    );

    // A process without valid signing configuration must not serve traffic.
    let token_config = TokenConfig::new(
        config.auth.secret.as_str(),
        config.auth.issuer.as_str(),
        config.auth.audience.as_str(),
        config.auth.expiration_minutes,
    )?;
    let token_service = Arc::new(TokenService::new(token_config));

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(max_connections = 5, "Database connection pool created");

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!("Database migrations completed");

    let account_store = Arc::new(PostgresAccountStore::new(pg_pool));
    let account_service: Arc<dyn AccountServicePort> = Arc::new(AccountService::new(
        account_store,
        Arc::clone(&token_service),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(address = %http_address, protocol = "http", "Server listening");

    let router = create_router(account_service, token_service);
    axum::serve(http_listener, router).await?;

    Ok(())
}
