// Quill API server
// Decision: DATABASE_URL selects PostgreSQL; without it the server runs on in-memory storage
// Decision: The admin author is seeded only when AUTH_ADMIN_EMAIL and AUTH_ADMIN_PASSWORD are set

use anyhow::{Context, Result};
use quill_api::app::{build_app, cors_layer, ServerConfig};
use quill_api::auth::AuthConfig;
use quill_api::storage::{seed_admin, StorageBackend};
use quill_core::telemetry::{init_telemetry, TelemetryConfig};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    // Configure via environment variables:
    // - RUST_LOG / LOG_LEVEL: Log filter (default: "quill_api=debug,tower_http=debug")
    // - LOG_FORMAT: "json" for JSON lines
    let mut telemetry_config = TelemetryConfig::from_env();
    if telemetry_config.service_name == "quill" {
        telemetry_config.service_name = "quill-api".to_string();
    }
    if telemetry_config.log_filter.is_none() {
        telemetry_config.log_filter = Some("quill_api=debug,tower_http=debug".to_string());
    }
    telemetry_config.service_version = Some(env!("CARGO_PKG_VERSION").to_string());
    init_telemetry(&telemetry_config);

    tracing::info!("quill-api starting...");

    // Initialize storage
    let storage = match std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()) {
        Some(url) => {
            let storage = StorageBackend::postgres(&url)
                .await
                .context("Failed to initialize PostgreSQL storage")?;
            tracing::info!("Connected to database");
            storage
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on exit)");
            StorageBackend::in_memory()
        }
    };

    // Load authentication configuration
    let auth_config = AuthConfig::from_env();
    tracing::info!(
        token_header = %auth_config.token_header,
        token_lifetime_secs = auth_config.jwt.access_token_lifetime.as_secs(),
        hash_secrets = auth_config.hash_secrets,
        "Authentication configured"
    );
    if !auth_config.hash_secrets && !storage.is_dev_mode() {
        tracing::warn!("AUTH_HASH_SECRETS is off, new author secrets are stored as plaintext");
    }

    if let Some(admin) = &auth_config.admin {
        let outcome = seed_admin(&storage, admin, auth_config.hash_secrets)
            .await
            .context("Failed to seed admin author")?;
        tracing::info!(?outcome, "Admin seeding done");
    }

    let server_config = ServerConfig::from_env();
    if !server_config.api_prefix.is_empty() {
        tracing::info!(prefix = %server_config.api_prefix, "API prefix configured");
    }

    let cors = cors_layer(&server_config.cors_origins, &auth_config.token_header);
    if cors.is_none() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?server_config.cors_origins, "CORS origins configured");
    }

    let app = build_app(storage, auth_config, &server_config.api_prefix);

    // Add CORS layer only if origins are configured
    let app = match cors {
        Some(cors) => app.layer(cors),
        None => app,
    };

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    // Start HTTP server
    let listener = tokio::net::TcpListener::bind(&server_config.addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", server_config.addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
