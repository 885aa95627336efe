use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::geocode::Resolver;
use crate::import::parse::parse_rows;
use crate::import::queue::ImportQueue;
use crate::models::JobStatus;
use crate::rate_store::RateStore;
use crate::tax_engine::{process_order, OrderInput};

const BATCH_SIZE: usize = 500;

/// Polls the queue forever, processing one import job at a time. Meant to be
/// spawned as a background tokio task alongside the HTTP server.
pub async fn run_worker_loop(pool: PgPool, resolver: Arc<Resolver>, rate_store: Arc<RateStore>, queue: Arc<ImportQueue>) {
    loop {
        match queue.dequeue(5.0).await {
            Ok(Some(message)) => {
                if let Err(e) = process_import_job(&pool, &resolver, &rate_store, message.job_id, &message.text).await {
                    error!("import job {} failed: {}", message.job_id, e);
                }
            }
            Ok(None) => continue,
            Err(e) => {
                error!("import queue dequeue error: {}", e);
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            }
        }
    }
}

async fn mark_failed(pool: &PgPool, job_id: Uuid, global_error: &str, trace: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"UPDATE import_jobs SET status = $1, error_report = error_report || $2::jsonb, finished_at = $3 WHERE id = $4"#,
    )
    .bind(JobStatus::Failed)
    .bind(json!([{"global_error": global_error, "trace": trace}]))
    .bind(Utc::now())
    .bind(job_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Re-reads the job row before doing any work; if it is not PENDING, this is
/// a redelivered message for a job already handled by another worker (or a
/// prior crashed attempt), and is discarded without reprocessing.
pub async fn process_import_job(
    pool: &PgPool,
    resolver: &Resolver,
    rate_store: &RateStore,
    job_id: Uuid,
    text: &str,
) -> Result<(), sqlx::Error> {
    let status: Option<(JobStatus,)> = sqlx::query_as("SELECT status FROM import_jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?;

    let Some((status,)) = status else {
        warn!("import job {} not found, discarding message", job_id);
        return Ok(());
    };
    if status != JobStatus::Pending {
        warn!("import job {} already {}, discarding redelivered message", job_id, status);
        return Ok(());
    }

    sqlx::query("UPDATE import_jobs SET status = $1, started_at = $2 WHERE id = $3")
        .bind(JobStatus::Processing)
        .bind(Utc::now())
        .bind(job_id)
        .execute(pool)
        .await?;

    let rows = match parse_rows(text) {
        Ok(rows) => rows,
        Err(e) => {
            let trace = std::backtrace::Backtrace::force_capture().to_string();
            mark_failed(pool, job_id, &e, &trace).await?;
            return Ok(());
        }
    };

    let total_rows = rows.len() as i32;
    sqlx::query("UPDATE import_jobs SET total_rows = $1 WHERE id = $2")
        .bind(total_rows)
        .bind(job_id)
        .execute(pool)
        .await?;

    let mut processed_rows = 0i32;
    let mut success_rows = 0i32;
    let mut failed_rows = 0i32;
    let mut error_report = Vec::new();

    for batch in rows.chunks(BATCH_SIZE) {
        for (row_number, parsed) in batch {
            processed_rows += 1;
            let outcome = match parsed {
                Ok(row) => {
                    let input = OrderInput {
                        lat: row.lat,
                        lon: row.lon,
                        subtotal: row.subtotal,
                        order_timestamp: row.order_timestamp,
                        import_job_id: Some(job_id),
                        import_row_index: Some(*row_number as i32),
                    };
                    process_order(pool, resolver, rate_store, input).await.err().map(|e| e.to_string())
                }
                Err(e) => Some(e.clone()),
            };

            match outcome {
                None => success_rows += 1,
                Some(error) => {
                    failed_rows += 1;
                    error_report.push(json!({"row": row_number, "error": error}));
                }
            }
        }

        sqlx::query(
            r#"UPDATE import_jobs SET processed_rows = $1, success_rows = $2, failed_rows = $3, error_report = $4 WHERE id = $5"#,
        )
        .bind(processed_rows)
        .bind(success_rows)
        .bind(failed_rows)
        .bind(json!(error_report))
        .bind(job_id)
        .execute(pool)
        .await?;
    }

    sqlx::query("UPDATE import_jobs SET status = $1, finished_at = $2 WHERE id = $3")
        .bind(JobStatus::Completed)
        .bind(Utc::now())
        .bind(job_id)
        .execute(pool)
        .await?;

    info!(
        "import job {} completed: {} rows, {} succeeded, {} failed",
        job_id, total_rows, success_rows, failed_rows
    );
    Ok(())
}
