pub mod geocode_cache;
pub mod import_job;
pub mod order;
pub mod rate_record;

pub use geocode_cache::GeocodeCacheEntry;
pub use import_job::{ImportJob, JobStatus, RowError};
pub use order::{BreakdownEntry, Order};
pub use rate_record::RateRecord;
