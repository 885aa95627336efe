use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::RateRecord;

/// Looks up the rate record that applies at `as_of` for a resolved
/// jurisdiction, cascading through progressively looser matches until one
/// hits. Each tier is a single query; the first to return a row wins, so a
/// tier is never skipped by construction.
pub struct RateStore {
    pool: PgPool,
}

impl RateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn query_tier(&self, sql: &str, state: &str, county: &str, as_of: DateTime<Utc>) -> Result<Option<RateRecord>, sqlx::Error> {
        sqlx::query_as::<_, RateRecord>(sql)
            .bind(state)
            .bind(county)
            .bind(as_of)
            .fetch_optional(&self.pool)
            .await
    }

    async fn query_locality_tier(
        &self,
        sql: &str,
        state: &str,
        county: &str,
        locality: &str,
        as_of: DateTime<Utc>,
    ) -> Result<Option<RateRecord>, sqlx::Error> {
        sqlx::query_as::<_, RateRecord>(sql)
            .bind(state)
            .bind(county)
            .bind(locality)
            .bind(as_of)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn fetch_rate(
        &self,
        state: &str,
        county: &str,
        locality: Option<&str>,
        as_of: DateTime<Utc>,
    ) -> Result<Option<RateRecord>, sqlx::Error> {
        // Tier 1: exact state + exact county + exact locality, when a
        // locality was actually resolved. Takes priority over a
        // county-level row so a locality-specific rate is never shadowed.
        if let Some(locality) = locality.filter(|l| !l.is_empty()) {
            const EXACT_LOCALITY: &str = r#"
                SELECT * FROM rate_records
                WHERE LOWER(state) = LOWER($1) AND LOWER(county) = LOWER($2) AND LOWER(locality) = LOWER($3)
                  AND valid_from <= $4 AND (valid_to IS NULL OR valid_to >= $4)
                ORDER BY valid_from DESC LIMIT 1"#;
            if let Some(record) = self.query_locality_tier(EXACT_LOCALITY, state, county, locality, as_of).await? {
                return Ok(Some(record));
            }
        }

        // Tier 2: exact state + exact county.
        const EXACT: &str = r#"
            SELECT * FROM rate_records
            WHERE LOWER(state) = LOWER($1) AND LOWER(county) = LOWER($2)
              AND valid_from <= $3 AND (valid_to IS NULL OR valid_to >= $3)
            ORDER BY valid_from DESC LIMIT 1"#;
        if let Some(record) = self.query_tier(EXACT, state, county, as_of).await? {
            return Ok(Some(record));
        }

        // Tier 3: fuzzy county match against a version of the county name
        // with a trailing " County"/" City" suffix stripped, so "Erie
        // County" and "Erie" both match rows stored under either spelling.
        const FUZZY: &str = r#"
            SELECT * FROM rate_records
            WHERE LOWER(state) = LOWER($1) AND LOWER(county) LIKE LOWER($2) || '%'
              AND valid_from <= $3 AND (valid_to IS NULL OR valid_to >= $3)
            ORDER BY valid_from DESC LIMIT 1"#;
        let stripped_county = strip_county_markers(county);
        if let Some(record) = self.query_tier(FUZZY, state, &stripped_county, as_of).await? {
            return Ok(Some(record));
        }

        // Tier 4: generic state-level fallback (county left empty at seed
        // time to represent a state-wide rate with no county component).
        const GENERIC: &str = r#"
            SELECT * FROM rate_records
            WHERE LOWER(state) = LOWER($1) AND county = ''
              AND valid_from <= $3 AND (valid_to IS NULL OR valid_to >= $3)
            ORDER BY valid_from DESC LIMIT 1"#;
        if let Some(record) = self.query_tier(GENERIC, state, county, as_of).await? {
            return Ok(Some(record));
        }

        // Tier 5: any record for the state at all, regardless of county.
        const ANY_IN_STATE: &str = r#"
            SELECT * FROM rate_records
            WHERE LOWER(state) = LOWER($1)
              AND valid_from <= $3 AND (valid_to IS NULL OR valid_to >= $3)
            ORDER BY valid_from DESC LIMIT 1"#;
        self.query_tier(ANY_IN_STATE, state, county, as_of).await
    }
}

/// Strips a trailing " County" or " City" suffix (case-insensitive) before
/// the fuzzy tier is attempted, so "Erie County" and "Erie" both match rows
/// stored under either spelling.
pub fn strip_county_markers(county: &str) -> String {
    let trimmed = county.trim();
    let lower = trimmed.to_lowercase();
    for suffix in [" county", " city"] {
        if let Some(stripped) = lower.strip_suffix(suffix) {
            return trimmed[..stripped.len()].to_string();
        }
    }
    trimmed.to_string()
}
