mod config;
mod geocode;
mod geometry;
mod handlers;
mod import;
mod models;
mod rate_store;
mod state;
mod tax_engine;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use redis::aio::ConnectionManager;
use tracing::info;

use config::{GeocoderProvider, SalesTaxConfig};
use geocode::http::HttpResolver;
use geocode::nearest::NearestResolver;
use geocode::polygon::PolygonResolver;
use geocode::{cache_store::CacheStore, Resolver};
use import::ImportQueue;
use rate_store::RateStore;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = SalesTaxConfig::from_env()?;

    let pool = database::create_database_pool("sales-tax").await?;
    database::migrations::run_migrations(&pool, "sales-tax").await?;

    let cache_store = Arc::new(CacheStore::new(pool.clone()));
    let resolver = match config.geocoder_provider {
        GeocoderProvider::Polygon => Resolver::Polygon(PolygonResolver::new(config.geojson_path.clone())),
        GeocoderProvider::Nearest => Resolver::Nearest(NearestResolver::new()),
        GeocoderProvider::Http => Resolver::Http(HttpResolver::new(
            config.geocoder_url.clone(),
            config.geocoder_user_agent.clone(),
            cache_store.clone(),
        )),
    };
    let resolver = Arc::new(resolver);

    let rate_store = Arc::new(RateStore::new(pool.clone()));

    let redis_client = redis::Client::open(config.redis_url.clone())?;
    let redis_conn = ConnectionManager::new(redis_client).await?;
    let queue = Arc::new(ImportQueue::new(redis_conn));

    let worker_pool = pool.clone();
    let worker_resolver = Arc::clone(&resolver);
    let worker_rate_store = Arc::clone(&rate_store);
    let worker_queue = Arc::clone(&queue);
    tokio::spawn(async move {
        import::worker::run_worker_loop(worker_pool, worker_resolver, worker_rate_store, worker_queue).await;
    });

    let app_state = Arc::new(AppState {
        pool: pool.clone(),
        resolver,
        rate_store,
        queue,
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/orders", post(handlers::orders::create_order).get(handlers::orders::list_orders))
        .route("/orders/clear", post(handlers::orders::clear_orders))
        .route("/orders/import_csv", post(handlers::orders::import_csv))
        .route("/imports/:id", get(handlers::imports::get_import_job))
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(&config.base.bind_address).await?;
    info!("sales-tax-service listening on {}", config.base.bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
