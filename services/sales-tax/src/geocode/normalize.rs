//! County-name normalization shared by every offline and online resolver.

const BOROUGH_TABLE: &[(&str, &str)] = &[
    ("manhattan", "New York"),
    ("brooklyn", "Kings"),
    ("staten island", "Richmond"),
    ("bronx", "Bronx"),
    ("queens", "Queens"),
    // common locality aliases for Manhattan
    ("new york city", "New York"),
    ("new york", "New York"),
];

fn strip_county_suffix(s: &str) -> String {
    let trimmed = s.trim();
    let lower = trimmed.to_lowercase();
    if let Some(stripped) = lower.strip_suffix(" county") {
        trimmed[..stripped.len()].to_string()
    } else {
        trimmed.to_string()
    }
}

fn map_borough(name: &str) -> Option<&'static str> {
    let lower = name.trim().to_lowercase();
    BOROUGH_TABLE
        .iter()
        .find(|(borough, _)| *borough == lower)
        .map(|(_, county)| *county)
}

/// Strips whitespace and a trailing " County" suffix (case-insensitive), then
/// maps NYC borough names to their canonical county. When `county_str` is
/// empty, the same table is applied to `locality_str`; if neither yields a
/// match, returns an empty string (unknown).
pub fn normalize_county(county_str: &str, locality_str: &str) -> String {
    let county_str = county_str.trim();
    if !county_str.is_empty() {
        let stripped = strip_county_suffix(county_str);
        return map_borough(&stripped).map(str::to_string).unwrap_or(stripped);
    }

    let locality_str = locality_str.trim();
    if locality_str.is_empty() {
        return String::new();
    }
    let stripped = strip_county_suffix(locality_str);
    map_borough(&stripped).map(str::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_county_suffix_case_insensitively() {
        assert_eq!(normalize_county("Erie County", ""), "Erie");
        assert_eq!(normalize_county("erie county", ""), "Erie");
    }

    #[test]
    fn maps_boroughs() {
        assert_eq!(normalize_county("Manhattan", ""), "New York");
        assert_eq!(normalize_county("Brooklyn", ""), "Kings");
        assert_eq!(normalize_county("Staten Island", ""), "Richmond");
        assert_eq!(normalize_county("Bronx", ""), "Bronx");
        assert_eq!(normalize_county("Queens", ""), "Queens");
    }

    #[test]
    fn derives_from_locality_when_county_empty() {
        assert_eq!(normalize_county("", "Manhattan"), "New York");
        assert_eq!(normalize_county("", "New York City"), "New York");
    }

    #[test]
    fn unknown_empty_county_and_locality_yields_empty() {
        assert_eq!(normalize_county("", ""), "");
        assert_eq!(normalize_county("", "Nowhereville"), "");
    }
}
