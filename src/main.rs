//!
//! EcoSort waste-segregation rewards backend.
//! Reads configuration from TOML file (~/.config/ecosort/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use ecosort::application::{
    ClassifierService, CollectorService, IdentityService, LedgerService, RewardService, UserLocks,
};
use ecosort::auth::JwtConfig;
use ecosort::config::AppConfig;
use ecosort::domain::{
    NewUser, RepositoryProvider, RewardCatalogEntry, ScoringEngine, UserRole,
};
use ecosort::infrastructure::database::migrator::Migrator;
use ecosort::infrastructure::{DetectionBackend, RemoteDetector};
use ecosort::shared::ShutdownSignal;
use ecosort::{
    create_api_router, default_config_path, init_database, AppState, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("ECOSORT_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting EcoSort service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("Prometheus metrics recorder installed");

    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig::from_security(&app_cfg.security);
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    seed_default_admin(repos.as_ref(), &app_cfg).await;
    seed_reward_catalog(repos.as_ref()).await;

    // ── Services ───────────────────────────────────────────────
    let detector: Option<Arc<dyn DetectionBackend>> = if app_cfg.classifier.endpoint.is_empty() {
        warn!("No detection endpoint configured; all classifications will be synthetic");
        None
    } else {
        Some(Arc::new(RemoteDetector::new(app_cfg.classifier.clone())))
    };

    let locks = Arc::new(UserLocks::new());
    let scoring = ScoringEngine::new(app_cfg.scoring.clone());

    let state = AppState {
        identity: Arc::new(IdentityService::new(repos.clone(), jwt_config.clone())),
        classifier: Arc::new(ClassifierService::new(detector, app_cfg.classifier.retries)),
        ledger: Arc::new(LedgerService::new(repos.clone(), scoring, locks.clone())),
        collector: Arc::new(CollectorService::new(repos.clone())),
        rewards: Arc::new(RewardService::new(repos.clone(), locks)),
        jwt: jwt_config,
        metrics: prometheus_handle,
    };

    // ── Shutdown handling ──────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    shutdown.start_signal_listener();

    // ── REST API server ────────────────────────────────────────
    let router = create_api_router(state);
    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let serve_shutdown = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            serve_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("EcoSort service shutdown complete");
    Ok(())
}

/// Seed the admin account on first start with an empty users table.
async fn seed_default_admin(repos: &dyn RepositoryProvider, app_cfg: &AppConfig) {
    use ecosort::application::identity::generate_qr_token;
    use ecosort::auth::hash_password;

    let users_count = repos.users().count().await.unwrap_or(0);
    if users_count > 0 {
        return;
    }

    info!("Creating default admin user...");

    let password_hash = match hash_password(&app_cfg.admin.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return;
        }
    };

    let admin = NewUser {
        username: app_cfg.admin.username.clone(),
        email: app_cfg.admin.email.clone(),
        password_hash,
        role: UserRole::Admin,
        qr_token: generate_qr_token(),
    };

    match repos.users().create(admin).await {
        Ok(user) => {
            info!("Default admin created: {}", user.email);
            warn!("Please change the admin password immediately!");
        }
        Err(e) => error!("Failed to create admin user: {}", e),
    }
}

/// Seed the reward catalog on first start.
async fn seed_reward_catalog(repos: &dyn RepositoryProvider) {
    let rewards_count = repos.rewards().count().await.unwrap_or(0);
    if rewards_count > 0 {
        return;
    }

    info!("Seeding reward catalog...");

    let entries = [
        ("Grocery voucher 50", "Voucher for partner grocery stores", 500, "voucher"),
        ("Grocery voucher 100", "Voucher for partner grocery stores", 900, "voucher"),
        ("Bus pass (1 day)", "One-day public transport pass", 300, "transport"),
        ("Compost starter kit", "Home composting bin with starter mix", 750, "merchandise"),
        ("Cloth shopping bag", "Reusable cotton shopping bag", 150, "merchandise"),
        ("Tree sapling", "A sapling planted in your name", 200, "community"),
    ];

    for (title, description, cost_points, category) in entries {
        let entry = RewardCatalogEntry {
            id: 0,
            title: title.to_string(),
            description: Some(description.to_string()),
            cost_points,
            category: category.to_string(),
            is_available: true,
        };
        if let Err(e) = repos.rewards().create(entry).await {
            error!("Failed to seed reward '{}': {}", title, e);
        }
    }
    info!("Reward catalog seeded");
}
