use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::str::FromStr;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

const LAT_ALIASES: &[&str] = &["lat", "latitude"];
const LON_ALIASES: &[&str] = &["lon", "lng", "longitude"];
const SUBTOTAL_ALIASES: &[&str] = &["subtotal", "amount"];
const TIMESTAMP_ALIASES: &[&str] = &["timestamp", "order_timestamp", "date"];

#[derive(Debug, Clone)]
pub struct ImportRow {
    pub lat: f64,
    pub lon: f64,
    pub subtotal: Decimal,
    pub order_timestamp: DateTime<Utc>,
}

/// Strips a leading UTF-8 BOM if present, then decodes as UTF-8; if that
/// fails (the file is actually Latin-1), falls back to a byte-for-byte
/// Latin-1 decode, since every byte value 0x00-0xFF maps 1:1 to the
/// identically-numbered Unicode code point.
pub fn decode_file_bytes(bytes: &[u8]) -> String {
    let bytes = if bytes.starts_with(&UTF8_BOM) { &bytes[UTF8_BOM.len()..] } else { bytes };
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim().to_lowercase();
        aliases.iter().any(|alias| *alias == h)
    })
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap()));
    }
    Err(format!("unrecognized timestamp {:?}", raw))
}

/// Parses delimited text into rows, pairing each with its 1-based data-row
/// number (the first data row, immediately after the header, is row 1) so
/// per-row errors reference the same row numbering as the original importer.
pub fn parse_rows(text: &str) -> Result<Vec<(i64, Result<ImportRow, String>)>, String> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(text.as_bytes());
    let headers = reader.headers().map_err(|e| format!("failed to read header row: {}", e))?.clone();

    let lat_idx = find_column(&headers, LAT_ALIASES).ok_or("missing latitude column")?;
    let lon_idx = find_column(&headers, LON_ALIASES).ok_or("missing longitude column")?;
    let subtotal_idx = find_column(&headers, SUBTOTAL_ALIASES).ok_or("missing subtotal column")?;
    let timestamp_idx = find_column(&headers, TIMESTAMP_ALIASES).ok_or("missing timestamp column")?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row_number = (i as i64) + 1;
        let parsed = (|| -> Result<ImportRow, String> {
            let record = record.map_err(|e| format!("malformed row: {}", e))?;

            let lat: f64 = record
                .get(lat_idx)
                .ok_or("missing lat value")?
                .trim()
                .parse()
                .map_err(|_| "lat is not a number".to_string())?;
            let lon: f64 = record
                .get(lon_idx)
                .ok_or("missing lon value")?
                .trim()
                .parse()
                .map_err(|_| "lon is not a number".to_string())?;
            let subtotal = Decimal::from_str(record.get(subtotal_idx).ok_or("missing subtotal value")?.trim())
                .map_err(|_| "subtotal is not a valid decimal".to_string())?;
            if subtotal < Decimal::ZERO {
                return Err("subtotal must be non-negative".to_string());
            }
            let order_timestamp = parse_timestamp(record.get(timestamp_idx).ok_or("missing timestamp value")?)?;

            Ok(ImportRow { lat, lon, subtotal, order_timestamp })
        })();

        rows.push((row_number, parsed));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_and_decodes_utf8() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("lat,lon,subtotal,timestamp\n".as_bytes());
        assert_eq!(decode_file_bytes(&bytes), "lat,lon,subtotal,timestamp\n");
    }

    #[test]
    fn falls_back_to_latin1_on_invalid_utf8() {
        let bytes = vec![b'c', 0xE9, b'c', b'i']; // "c<e-acute>ci" in Latin-1
        assert_eq!(decode_file_bytes(&bytes), "c\u{e9}ci");
    }

    #[test]
    fn parses_rows_with_aliased_columns_and_reports_row_numbers() {
        let text = "latitude,lng,amount,date\n40.7128,-74.0060,100.00,2024-01-01\nbad,lon,10,2024-01-01\n";
        let rows = parse_rows(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, 1);
        assert!(rows[0].1.is_ok());
        assert_eq!(rows[1].0, 2);
        assert!(rows[1].1.is_err());
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let text = "lat,lon,subtotal\n1,2,3\n";
        assert!(parse_rows(text).is_err());
    }
}
