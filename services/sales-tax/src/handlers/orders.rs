use std::sync::Arc;

use axum::extract::{Multipart, Query, State};
use axum::response::Json;
use chrono::{DateTime, Utc};
use common::{ServiceError, ServiceResult};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use utils::PaginationParams;
use uuid::Uuid;

use crate::import::parse::decode_file_bytes;
use crate::import::queue::ImportJobMessage;
use crate::models::Order;
use crate::state::AppState;
use crate::tax_engine::{process_order, OrderInput};

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub lat: f64,
    pub lon: f64,
    pub subtotal: Decimal,
    pub order_timestamp: Option<DateTime<Utc>>,
}

pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateOrderRequest>,
) -> ServiceResult<Json<Order>> {
    let input = OrderInput {
        lat: body.lat,
        lon: body.lon,
        subtotal: body.subtotal,
        order_timestamp: body.order_timestamp.unwrap_or_else(Utc::now),
        import_job_id: None,
        import_row_index: None,
    };
    let order = process_order(&state.pool, &state.resolver, &state.rate_store, input).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub ordering: Option<String>,
}

/// Only `id` and `created_at`, each with an optional leading `-` for
/// descending order, are accepted; anything else falls back to the default
/// to avoid building a query from arbitrary user input.
fn order_by_clause(ordering: Option<&str>) -> &'static str {
    match ordering {
        Some("-id") => "id DESC",
        Some("id") => "id ASC",
        Some("-created_at") => "created_at DESC",
        Some("created_at") => "created_at ASC",
        _ => "id ASC",
    }
}

pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListOrdersQuery>,
) -> ServiceResult<Json<Value>> {
    let params = PaginationParams::new(query.limit, query.offset);
    let order_by = order_by_clause(query.ordering.as_deref());

    let sql = format!("SELECT * FROM orders ORDER BY {} LIMIT $1 OFFSET $2", order_by);
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&state.pool)
        .await
        .map_err(ServiceError::Database)?;

    let total_items: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(&state.pool)
        .await
        .map_err(ServiceError::Database)?;

    let paginated = utils::PaginatedResponse::new(orders, &params, total_items.0);
    Ok(Json(json!(paginated)))
}

pub async fn clear_orders(State(state): State<Arc<AppState>>) -> ServiceResult<Json<Value>> {
    sqlx::query("DELETE FROM orders")
        .execute(&state.pool)
        .await
        .map_err(ServiceError::Database)?;
    Ok(Json(json!({"cleared": true})))
}

pub async fn import_csv(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ServiceResult<Json<Value>> {
    let mut text = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::Validation(format!("invalid multipart payload: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ServiceError::Validation(format!("failed to read upload: {}", e)))?;
            text = Some(decode_file_bytes(&bytes));
        }
    }

    let text = text.ok_or_else(|| ServiceError::Validation("missing \"file\" field".to_string()))?;
    let job_id = Uuid::new_v4();

    sqlx::query("INSERT INTO import_jobs (id, status) VALUES ($1, $2)")
        .bind(job_id)
        .bind(crate::models::JobStatus::Pending)
        .execute(&state.pool)
        .await
        .map_err(ServiceError::Database)?;

    state
        .queue
        .enqueue(&ImportJobMessage { job_id, text })
        .await
        .map_err(|e| ServiceError::ExternalService(format!("failed to enqueue import job: {}", e)))?;

    Ok(Json(json!({"job_id": job_id, "status": "PENDING"})))
}
