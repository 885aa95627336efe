// shared/database/src/migrations.rs
use sqlx::PgPool;
use tracing::{error, info};

pub async fn run_migrations(pool: &PgPool, service_name: &str) -> anyhow::Result<()> {
    info!("Running migrations for {}", service_name);

    match service_name {
        "sales-tax" => run_sales_tax_migrations(pool).await,
        _ => {
            error!("Unknown service for migrations: {}", service_name);
            Ok(())
        }
    }
}

// ===== SALES TAX SERVICE MIGRATIONS =====
async fn run_sales_tax_migrations(pool: &PgPool) -> anyhow::Result<()> {
    info!("Running sales tax service migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rate_records (
            id UUID PRIMARY KEY,
            state VARCHAR(100) NOT NULL,
            county VARCHAR(100) NOT NULL DEFAULT '',
            locality VARCHAR(100),
            rate_state NUMERIC(6,4) NOT NULL,
            rate_county NUMERIC(6,4) NOT NULL,
            rate_locality NUMERIC(6,4) NOT NULL,
            rate_special NUMERIC(6,4),
            valid_from TIMESTAMPTZ NOT NULL,
            valid_to TIMESTAMPTZ,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_rate_records_state ON rate_records (LOWER(state))")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_rate_records_state_county ON rate_records (LOWER(state), LOWER(county))",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS geocode_cache (
            cache_key VARCHAR(255) PRIMARY KEY,
            provider VARCHAR(50) NOT NULL,
            lat_rounded NUMERIC(7,4) NOT NULL,
            lon_rounded NUMERIC(7,4) NOT NULL,
            state VARCHAR(100) NOT NULL,
            county VARCHAR(100) NOT NULL DEFAULT '',
            locality VARCHAR(100),
            raw_response JSONB,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id UUID PRIMARY KEY,
            lat NUMERIC(9,6) NOT NULL,
            lon NUMERIC(9,6) NOT NULL,
            subtotal NUMERIC(14,2) NOT NULL,
            order_timestamp TIMESTAMPTZ NOT NULL,
            geo_state VARCHAR(100) NOT NULL,
            geo_county VARCHAR(100) NOT NULL DEFAULT '',
            geo_locality VARCHAR(100),
            geo_source VARCHAR(50) NOT NULL,
            geo_raw_response JSONB,
            composite_rate NUMERIC(6,4) NOT NULL,
            tax_amount NUMERIC(14,2) NOT NULL,
            total_amount NUMERIC(14,2) NOT NULL,
            jurisdictions JSONB NOT NULL DEFAULT '[]',
            breakdown JSONB NOT NULL DEFAULT '[]',
            import_job_id UUID,
            import_row_index INTEGER,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_created_at ON orders (created_at)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS import_jobs (
            id UUID PRIMARY KEY,
            status VARCHAR(20) NOT NULL DEFAULT 'PENDING',
            total_rows INTEGER NOT NULL DEFAULT 0,
            processed_rows INTEGER NOT NULL DEFAULT 0,
            success_rows INTEGER NOT NULL DEFAULT 0,
            failed_rows INTEGER NOT NULL DEFAULT 0,
            error_report JSONB NOT NULL DEFAULT '[]',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            started_at TIMESTAMPTZ,
            finished_at TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Sales tax migrations completed");
    Ok(())
}
