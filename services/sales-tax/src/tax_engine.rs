use chrono::{DateTime, Utc};
use common::ServiceError;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use utils::{round_money, round_rate};
use uuid::Uuid;

use crate::geocode::{quantize, GeocodeResult, Resolver};
use crate::models::{BreakdownEntry, Order, RateRecord};
use crate::rate_store::RateStore;

pub struct OrderInput {
    pub lat: f64,
    pub lon: f64,
    pub subtotal: Decimal,
    pub order_timestamp: DateTime<Utc>,
    pub import_job_id: Option<Uuid>,
    pub import_row_index: Option<i32>,
}

fn breakdown_entries(record: &RateRecord) -> Vec<BreakdownEntry> {
    let mut entries = Vec::new();
    if record.rate_state != Decimal::ZERO {
        entries.push(BreakdownEntry {
            name: record.state.clone(),
            rate: record.rate_state,
            tax_amount: Decimal::ZERO,
        });
    }
    if record.rate_county != Decimal::ZERO {
        let name = if record.county.is_empty() {
            "County (Generic)".to_string()
        } else {
            record.county.clone()
        };
        entries.push(BreakdownEntry {
            name,
            rate: record.rate_county,
            tax_amount: Decimal::ZERO,
        });
    }
    if record.rate_locality != Decimal::ZERO {
        let name = record.locality.clone().unwrap_or_else(|| "Locality".to_string());
        entries.push(BreakdownEntry {
            name,
            rate: record.rate_locality,
            tax_amount: Decimal::ZERO,
        });
    }
    if let Some(special) = record.rate_special {
        if special != Decimal::ZERO {
            entries.push(BreakdownEntry {
                name: "Special District".to_string(),
                rate: special,
                tax_amount: Decimal::ZERO,
            });
        }
    }
    entries
}

/// Jurisdiction names are a distinct list from the breakdown: always
/// `[state, county]`, with `locality`/`"Special District"` appended only
/// when their rate component is actually present. Unlike the breakdown,
/// these names are never relabeled (no "County (Generic)" substitution).
fn jurisdictions_for(record: &RateRecord) -> Vec<String> {
    let mut jurisdictions = vec![record.state.clone(), record.county.clone()];
    if record.rate_locality > Decimal::ZERO {
        if let Some(locality) = &record.locality {
            if !locality.is_empty() {
                jurisdictions.push(locality.clone());
            }
        }
    }
    if let Some(special) = record.rate_special {
        if special > Decimal::ZERO {
            jurisdictions.push("Special District".to_string());
        }
    }
    jurisdictions
}

/// Resolves a coordinate, consults the rate table, and computes tax.
/// `tax_amount` is always `subtotal * composite_rate` quantized once, never
/// the sum of the independently-rounded breakdown amounts (those are for
/// display only and can differ from the total by a cent at the margins).
pub async fn process_order(
    pool: &PgPool,
    resolver: &Resolver,
    rate_store: &RateStore,
    input: OrderInput,
) -> Result<Order, ServiceError> {
    if input.subtotal < Decimal::ZERO {
        return Err(ServiceError::Validation("subtotal must be non-negative".to_string()));
    }

    let geo: GeocodeResult = resolver.resolve(input.lat, input.lon).await?;

    let rate_record = rate_store
        .fetch_rate(&geo.state, &geo.county, geo.locality.as_deref(), input.order_timestamp)
        .await
        .map_err(ServiceError::Database)?;

    let (composite_rate, breakdown, jurisdictions) = match &rate_record {
        Some(record) => {
            let composite = round_rate(record.composite_rate());
            let mut entries = breakdown_entries(record);
            for entry in &mut entries {
                entry.tax_amount = round_money(input.subtotal * entry.rate);
            }
            let jurisdictions = jurisdictions_for(record);
            (composite, entries, jurisdictions)
        }
        None => (Decimal::ZERO, Vec::new(), Vec::new()),
    };

    let tax_amount = round_money(input.subtotal * composite_rate);
    let total_amount = input.subtotal + tax_amount;

    let geo_source = resolver.provider_name().to_string();
    let lat = quantize(input.lat, 6)?;
    let lon = quantize(input.lon, 6)?;

    let order = sqlx::query_as::<_, Order>(
        r#"INSERT INTO orders (
             id, lat, lon, subtotal, order_timestamp,
             geo_state, geo_county, geo_locality, geo_source, geo_raw_response,
             composite_rate, tax_amount, total_amount, jurisdictions, breakdown,
             import_job_id, import_row_index
           ) VALUES (
             $1, $2, $3, $4, $5,
             $6, $7, $8, $9, $10,
             $11, $12, $13, $14, $15,
             $16, $17
           ) RETURNING *"#,
    )
    .bind(Uuid::new_v4())
    .bind(lat)
    .bind(lon)
    .bind(input.subtotal)
    .bind(input.order_timestamp)
    .bind(&geo.state)
    .bind(&geo.county)
    .bind(&geo.locality)
    .bind(&geo_source)
    .bind(&geo.raw_response)
    .bind(composite_rate)
    .bind(tax_amount)
    .bind(total_amount)
    .bind(json!(jurisdictions))
    .bind(json!(breakdown))
    .bind(input.import_job_id)
    .bind(input.import_row_index)
    .fetch_one(pool)
    .await
    .map_err(ServiceError::Database)?;

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn record(rate_state: Decimal, rate_county: Decimal, rate_locality: Decimal, county: &str) -> RateRecord {
        RateRecord {
            id: Uuid::new_v4(),
            state: "New York".to_string(),
            county: county.to_string(),
            locality: Some("New York".to_string()),
            rate_state,
            rate_county,
            rate_locality,
            rate_special: None,
            valid_from: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            valid_to: None,
            created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn composite_tax_can_differ_from_sum_of_breakdown_amounts() {
        let record = record(dec!(0.02925), dec!(0.02925), dec!(0.0), "New York");
        let subtotal = dec!(10.00);
        let composite = round_rate(record.composite_rate());
        let mut entries = breakdown_entries(&record);
        for entry in &mut entries {
            entry.tax_amount = round_money(subtotal * entry.rate);
        }
        let sum_of_breakdown: Decimal = entries.iter().map(|e| e.tax_amount).sum();
        let composite_tax = round_money(subtotal * composite);
        assert_eq!(sum_of_breakdown, dec!(0.58));
        assert_eq!(composite_tax, dec!(0.59));
        // The two computations are allowed to diverge by a cent; the engine
        // always persists composite_tax, never sum_of_breakdown.
        assert_ne!(sum_of_breakdown, composite_tax);
    }
}
