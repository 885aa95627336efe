use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use common::ServiceInfo;
use common::health::health_check_handler;

use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<ServiceInfo>, StatusCode> {
    let db_healthy = database::check_database_health(&state.pool).await;
    health_check_handler("sales-tax-service", env!("CARGO_PKG_VERSION"), vec![("database", db_healthy)]).await
}
