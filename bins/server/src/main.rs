//! Offertory API Server
//!
//! Main entry point for the Offertory backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use offertory_api::{AppState, create_router, notify::Notifier};
use offertory_core::auth::CredentialStore;
use offertory_db::connect;
use offertory_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "offertory=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration once; everything downstream gets an immutable view
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Build the static credential store; bad role names fail here, at startup
    let credentials = CredentialStore::from_accounts(&config.users)?;
    if credentials.is_empty() {
        warn!("No user accounts configured; every login will fail");
    }
    info!(accounts = credentials.len(), "Credential store loaded");

    // Create JWT service
    #[allow(clippy::cast_possible_wrap)]
    let jwt_service = JwtService::new(JwtConfig {
        secret: config.auth.jwt_secret.clone(),
        session_expires_secs: config.auth.session_expiry_secs as i64,
    });

    // Create notification dispatcher
    let notifier = Notifier::new(config.notifications.clone());
    info!(
        enabled = config.notifications.enabled,
        email = config.notifications.email_enabled,
        sms = config.notifications.sms_enabled,
        "Notification dispatch configured"
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        credentials: Arc::new(credentials),
        notifier: Arc::new(notifier),
        operators: Arc::new(config.operators.clone()),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
