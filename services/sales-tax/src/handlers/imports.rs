use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use common::{ServiceError, ServiceResult};
use uuid::Uuid;

use crate::models::ImportJob;
use crate::state::AppState;

pub async fn get_import_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> ServiceResult<Json<ImportJob>> {
    let job = sqlx::query_as::<_, ImportJob>("SELECT * FROM import_jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.pool)
        .await
        .map_err(ServiceError::Database)?
        .ok_or_else(|| ServiceError::NotFound(format!("import job {} not found", job_id)))?;

    Ok(Json(job))
}
