use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the rate table, valid over a half-open time interval.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RateRecord {
    pub id: Uuid,
    pub state: String,
    /// Empty string denotes the state-level generic fallback.
    pub county: String,
    pub locality: Option<String>,
    pub rate_state: Decimal,
    pub rate_county: Decimal,
    pub rate_locality: Decimal,
    pub rate_special: Option<Decimal>,
    pub valid_from: DateTime<Utc>,
    pub valid_to: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RateRecord {
    pub fn composite_rate(&self) -> Decimal {
        self.rate_state + self.rate_county + self.rate_locality + self.rate_special.unwrap_or(Decimal::ZERO)
    }
}
