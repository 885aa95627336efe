use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::PgPool;
use uuid::Uuid;

struct SeedRow {
    state: &'static str,
    county: &'static str,
    locality: Option<&'static str>,
    rate_state: Decimal,
    rate_county: Decimal,
    rate_locality: Decimal,
    rate_special: Option<Decimal>,
}

/// New York's combined state rate plus a representative slice of county and
/// NYC-borough rates. Matches the jurisdictions the bundled county GeoJSON
/// and the nearest-neighbor dataset can actually resolve to.
fn seed_rows() -> Vec<SeedRow> {
    vec![
        // Statewide fallback: county left empty so tier 3 of the cascade can
        // find it for any New York coordinate with no county-level match.
        SeedRow { state: "New York", county: "", locality: None, rate_state: dec!(0.04), rate_county: dec!(0.0), rate_locality: dec!(0.0), rate_special: None },
        SeedRow { state: "New York", county: "New York", locality: Some("Manhattan"), rate_state: dec!(0.04), rate_county: dec!(0.0), rate_locality: dec!(0.045), rate_special: Some(dec!(0.00375)) },
        SeedRow { state: "New York", county: "Kings", locality: Some("Brooklyn"), rate_state: dec!(0.04), rate_county: dec!(0.0), rate_locality: dec!(0.045), rate_special: Some(dec!(0.00375)) },
        SeedRow { state: "New York", county: "Queens", locality: Some("Queens"), rate_state: dec!(0.04), rate_county: dec!(0.0), rate_locality: dec!(0.045), rate_special: Some(dec!(0.00375)) },
        SeedRow { state: "New York", county: "Bronx", locality: Some("Bronx"), rate_state: dec!(0.04), rate_county: dec!(0.0), rate_locality: dec!(0.045), rate_special: Some(dec!(0.00375)) },
        SeedRow { state: "New York", county: "Richmond", locality: Some("Staten Island"), rate_state: dec!(0.04), rate_county: dec!(0.0), rate_locality: dec!(0.045), rate_special: Some(dec!(0.00375)) },
        SeedRow { state: "New York", county: "Erie", locality: Some("Buffalo"), rate_state: dec!(0.04), rate_county: dec!(0.0475), rate_locality: dec!(0.0), rate_special: None },
        SeedRow { state: "New York", county: "Albany", locality: Some("Albany"), rate_state: dec!(0.04), rate_county: dec!(0.04), rate_locality: dec!(0.0), rate_special: None },
        SeedRow { state: "New York", county: "Monroe", locality: Some("Rochester"), rate_state: dec!(0.04), rate_county: dec!(0.04), rate_locality: dec!(0.0), rate_special: None },
        SeedRow { state: "New York", county: "Onondaga", locality: Some("Syracuse"), rate_state: dec!(0.04), rate_county: dec!(0.04), rate_locality: dec!(0.0), rate_special: None },
        SeedRow { state: "New York", county: "Westchester", locality: Some("Yonkers"), rate_state: dec!(0.04), rate_county: dec!(0.04), rate_locality: dec!(0.0), rate_special: None },
    ]
}

pub async fn seed_default_rates(pool: &PgPool) -> anyhow::Result<()> {
    let valid_from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    for row in seed_rows() {
        sqlx::query(
            r#"INSERT INTO rate_records (id, state, county, locality, rate_state, rate_county, rate_locality, rate_special, valid_from)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#,
        )
        .bind(Uuid::new_v4())
        .bind(row.state)
        .bind(row.county)
        .bind(row.locality)
        .bind(row.rate_state)
        .bind(row.rate_county)
        .bind(row.rate_locality)
        .bind(row.rate_special)
        .bind(valid_from)
        .execute(pool)
        .await?;
    }

    Ok(())
}
