/// otaku-catalog entry point
/// Starts the HTTP server

use tracing::{error, info, warn};

use otaku_catalog::config::CatalogConfig;
use otaku_catalog::routes::build_router;
use otaku_catalog::state::{AppState, StartupError};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Err(e) = run(CatalogConfig::from_env()).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(config: CatalogConfig) -> Result<(), StartupError> {
    if config.tmdb_api_key.is_none() {
        warn!("[CONFIG] TMDB_API_KEY is not set, catalog calls will fail");
    }

    let app = build_router(AppState::from_config(&config)?);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!("otaku-catalog listening on http://{}", addr);
    info!("TMDB API: {}", config.tmdb_api_base);
    info!("image CDN: {}", config.tmdb_image_base);

    axum::serve(listener, app).await.map_err(StartupError::Serve)
}
