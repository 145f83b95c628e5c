use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{error, info, warn};

use mygroup_api::{create_app, AppState};
use mygroup_core::repositories::{RoleRepository, TenantRepository, UserRepository};
use mygroup_infrastructure::{create_pool, run_migrations, PgRoleRepository, PgTenantRepository, PgUserRepository};
use mygroup_shared::config::AppConfig;
use mygroup_shared::constants::SHUTDOWN_GRACE_SECONDS;
use mygroup_shared::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    let _telemetry = init_telemetry(&config.log, config.is_production()).context("failed to initialise logging")?;

    let panicked = Arc::new(Notify::new());
    install_panic_hook(panicked.clone());

    info!(
        name = %config.app.name,
        version = %config.app.version,
        env = %config.app.env,
        "Server starting..."
    );

    // Connect to Database
    let pool = match create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "Database connection failed");
            std::process::exit(1);
        }
    };
    info!("Database connection established");

    if config.database.run_migrations {
        run_migrations(&pool).await.context("failed to run migrations")?;
        info!("Migrations applied");
    }

    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let tenants: Arc<dyn TenantRepository> = Arc::new(PgTenantRepository::new(pool.clone()));
    let roles: Arc<dyn RoleRepository> = Arc::new(PgRoleRepository::new(pool.clone()));

    let host: std::net::IpAddr = config.app.host.parse().context("invalid app.host")?;
    let addr = SocketAddr::from((host, config.app.port));

    let state = AppState::new(config, users, tenants, roles);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(panicked))
        .await?;

    pool.close().await;
    info!("Server closed");
    Ok(())
}

/// Logs every panic and wakes the shutdown future.
fn install_panic_hook(panicked: Arc<Notify>) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        error!(panic = %panic_info, "Panic detected");
        panicked.notify_one();
        previous(panic_info);
    }));
}

async fn shutdown_signal(panicked: Arc<Notify>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received"),
        _ = terminate => info!("SIGTERM received"),
        _ = panicked.notified() => warn!("Shutting down after panic"),
    }

    info!(grace_seconds = SHUTDOWN_GRACE_SECONDS, "Shutting down gracefully...");
    tokio::spawn(async {
        tokio::time::sleep(Duration::from_secs(SHUTDOWN_GRACE_SECONDS)).await;
        error!("Could not close connections in time, forcing shutdown");
        std::process::exit(1);
    });
}
