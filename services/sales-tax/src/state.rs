use std::sync::Arc;

use sqlx::PgPool;

use crate::geocode::Resolver;
use crate::import::ImportQueue;
use crate::rate_store::RateStore;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub resolver: Arc<Resolver>,
    pub rate_store: Arc<RateStore>,
    pub queue: Arc<ImportQueue>,
}
