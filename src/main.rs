use std::sync::Arc;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use dream_properties::media::ImageUploader;
use dream_properties::router::{SiteState, site_router};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &dream_properties::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        bind_addr = %cfg.bind_addr,
        static_dir = %cfg.static_dir.display(),
        cloudinary = cfg.cloudinary_cloud.is_some(),
        "starting"
    );

    let pool = dream_properties::db::connect(&cfg.database_url).await?;
    let storage = dream_properties::db::CatalogStorage::new(pool);
    storage.init_schema().await?;

    let uploader = Arc::new(ImageUploader::from_config(cfg));
    let state = SiteState::new(storage, uploader, cfg.cookie_key());
    let app = site_router(state);

    let listener = TcpListener::bind(&cfg.bind_addr).await?;
    info!("HTTP server listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
