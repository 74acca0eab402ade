use mimalloc::MiMalloc;
use prism::catalog::{self, CatalogSnapshot, CatalogSync, loader};
use prism::server::router::{PrismState, prism_router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = &prism::config::CONFIG;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        loglevel = %cfg.basic.loglevel,
        admin_key_set = !cfg.basic.admin_key.is_empty(),
        upstream = %cfg.upstream.base_url,
        pricing_path = %cfg.upstream.pricing_path,
        proxy = %cfg.upstream.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        sync_interval_secs = cfg.catalog.sync_interval_secs,
        cache_capacity = cfg.catalog.cache_capacity,
        "Effective configuration"
    );

    let handle = catalog::spawn(cfg.catalog.cache_capacity).await?;

    if let Some(seed_path) = cfg.catalog.seed_path.as_ref() {
        match loader::load_seed(seed_path).await {
            Ok(envelope) => match CatalogSnapshot::from_envelope(envelope) {
                Ok(snapshot) => {
                    let count = handle.replace(snapshot).await?;
                    info!(path = %seed_path.display(), model_count = count, "Seed catalog loaded");
                }
                Err(e) => warn!(path = %seed_path.display(), error = %e, "Seed catalog rejected"),
            },
            Err(e) => warn!(path = %seed_path.display(), error = %e, "Failed to read seed catalog"),
        }
    }

    let client = loader::build_client(&cfg.upstream)?;
    let sync = CatalogSync::new(client, Arc::new(cfg.upstream.clone()), handle.clone());
    tokio::spawn(sync.clone().run_periodic(cfg.catalog.sync_interval_secs));

    let admin_key: Arc<str> = Arc::from(cfg.basic.admin_key.as_str());
    let state = PrismState::new(handle, sync, admin_key, Arc::new(cfg.catalog.clone()));
    let app = prism_router(state, cfg.cors.to_layer());

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
