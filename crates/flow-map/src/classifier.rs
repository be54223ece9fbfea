//! Sector Classifier
//!
//! Maps a commodity's category string and NAICS code to a coarse sector
//! label. Malformed input degrades to "Other"; nothing here fails.

/// Label used when nothing else matches
pub const OTHER: &str = "Other";

const AGRICULTURE: &str = "Agriculture, Forestry, Fishing";
const MANUFACTURING: &str = "Manufacturing";

/// Two-character NAICS prefix to sector label
const NAICS_SECTORS: &[(&str, &str)] = &[
    ("11", AGRICULTURE),
    ("21", "Mining"),
    ("22", "Utilities"),
    ("23", "Construction"),
    ("31", MANUFACTURING),
    ("32", MANUFACTURING),
    ("33", MANUFACTURING),
    ("42", "Wholesale Trade"),
    ("44", "Retail Trade"),
    ("45", "Retail Trade"),
    ("48", "Transportation"),
    ("49", "Transportation"),
    ("51", "Information"),
    ("52", "Finance & Insurance"),
    ("53", "Real Estate"),
    ("54", "Professional Services"),
    ("55", "Management"),
    ("56", "Admin & Waste Services"),
    ("61", "Education"),
    ("62", "Healthcare"),
    ("71", "Arts & Entertainment"),
    ("72", "Accommodation & Food"),
    ("81", "Other Services"),
    ("92", "Government"),
    ("S0", "Government"),
    ("F0", "Other Activities"),
];

/// Classify a sector from its category path (e.g. "31-33: Manufacturing/Food")
/// and its unsuffixed commodity code.
pub fn classify_sector(category: Option<&str>, code: &str) -> String {
    let label = category
        .and_then(category_label)
        .map(normalize_label)
        .unwrap_or_else(|| OTHER.to_string());

    if label == OTHER {
        naics_sector(code).to_string()
    } else {
        label
    }
}

/// Sector label for a NAICS code prefix
pub fn naics_sector(code: &str) -> &'static str {
    let prefix: String = code.chars().take(2).collect();
    NAICS_SECTORS
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, label)| *label)
        .unwrap_or(OTHER)
}

/// Commodity code with its region suffix
pub fn regional_code(code: &str) -> String {
    if code.contains("/US") {
        code.to_string()
    } else {
        format!("{code}/US")
    }
}

// "XX: Label: more/rest" -> "Label"
fn category_label(category: &str) -> Option<String> {
    let first_segment = category.split('/').next()?;
    first_segment
        .split(": ")
        .nth(1)
        .map(|label| label.trim().to_string())
}

fn normalize_label(label: String) -> String {
    if label.contains("Agriculture") {
        AGRICULTURE.to_string()
    } else if label.contains(MANUFACTURING) || label.starts_with('3') {
        MANUFACTURING.to_string()
    } else {
        label
    }
}
