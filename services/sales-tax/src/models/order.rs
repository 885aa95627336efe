use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One entry of an order's tax breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub name: String,
    pub rate: Decimal,
    pub tax_amount: Decimal,
}

/// An immutable, persisted tax computation for a single point-of-sale order.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,
    pub lat: Decimal,
    pub lon: Decimal,
    pub subtotal: Decimal,
    pub order_timestamp: DateTime<Utc>,
    pub geo_state: String,
    pub geo_county: String,
    pub geo_locality: Option<String>,
    pub geo_source: String,
    pub geo_raw_response: Option<Value>,
    pub composite_rate: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    /// Ordered list of jurisdiction names, stored as a JSON array of strings.
    pub jurisdictions: Value,
    /// Ordered list of `BreakdownEntry`, stored as a JSON array.
    pub breakdown: Value,
    pub import_job_id: Option<Uuid>,
    pub import_row_index: Option<i32>,
    pub created_at: DateTime<Utc>,
}
