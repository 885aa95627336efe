use tracing::info;

#[path = "../seed.rs"]
mod seed;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let pool = database::create_database_pool("sales-tax").await?;
    database::migrations::run_migrations(&pool, "sales-tax").await?;

    seed::seed_default_rates(&pool).await?;
    info!("seeded default rate records");

    Ok(())
}
