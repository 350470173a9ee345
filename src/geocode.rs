// Static ZIP code geocoding
// Unknown but well-formed ZIPs resolve to the geographic center of the US.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

pub const MAX_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lng: f64,
    pub city: &'static str,
    pub state: &'static str,
}

pub const FALLBACK_CENTROID: GeocodeResult = GeocodeResult {
    lat: 39.8283,
    lng: -98.5795,
    city: "Geographic Center",
    state: "US",
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    #[error("Invalid ZIP code format. Use 5 digits (e.g., 98498) or 9 digits (e.g., 98498-1234)")]
    InvalidZip,
}

static ZIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("ZIP pattern is a valid regex"));

const fn entry(lat: f64, lng: f64, city: &'static str, state: &'static str) -> GeocodeResult {
    GeocodeResult { lat, lng, city, state }
}

static ZIP_TABLE: Lazy<HashMap<&'static str, GeocodeResult>> = Lazy::new(|| {
    HashMap::from([
        ("98498", entry(47.0379, -122.9015, "Lakewood", "WA")),
        ("98468", entry(47.0379, -122.9015, "Lakewood", "WA")),
        ("98499", entry(47.1718, -122.5185, "Lakewood", "WA")),
        ("98402", entry(47.2529, -122.4443, "Tacoma", "WA")),
        ("98003", entry(47.3223, -122.3126, "Federal Way", "WA")),
        ("98101", entry(47.6101, -122.3344, "Seattle", "WA")),
        ("98004", entry(47.6101, -122.2015, "Bellevue", "WA")),
        ("98201", entry(47.9790, -122.2021, "Everett", "WA")),
        ("98057", entry(47.4829, -122.2171, "Renton", "WA")),
        ("98032", entry(47.3809, -122.2348, "Kent", "WA")),
        ("98052", entry(47.6740, -122.1215, "Redmond", "WA")),
        ("98011", entry(47.7601, -122.2054, "Bothell", "WA")),
        ("98168", entry(47.4740, -122.2610, "Tukwila", "WA")),
        ("90210", entry(34.0901, -118.4065, "Beverly Hills", "CA")),
        ("10001", entry(40.7505, -73.9934, "New York", "NY")),
        ("60601", entry(41.8781, -87.6298, "Chicago", "IL")),
        ("75001", entry(32.9483, -96.7299, "Addison", "TX")),
        ("33101", entry(25.7617, -80.1918, "Miami", "FL")),
        ("77001", entry(29.7604, -95.3698, "Houston", "TX")),
        ("85001", entry(33.4484, -112.0740, "Phoenix", "AZ")),
        ("80201", entry(39.7392, -104.9903, "Denver", "CO")),
        ("97201", entry(45.5152, -122.6784, "Portland", "OR")),
        ("30301", entry(33.7490, -84.3880, "Atlanta", "GA")),
        ("02101", entry(42.3601, -71.0589, "Boston", "MA")),
        ("19101", entry(39.9526, -75.1652, "Philadelphia", "PA")),
        ("63101", entry(38.6270, -90.1994, "St. Louis", "MO")),
        ("55401", entry(44.9778, -93.2650, "Minneapolis", "MN")),
    ])
});

pub fn is_valid_zip(zip: &str) -> bool {
    ZIP_PATTERN.is_match(zip)
}

/// Resolves a 5-digit or ZIP+4 code. Only the first five digits are looked up.
pub fn lookup(zip: &str) -> Result<GeocodeResult, GeocodeError> {
    if !is_valid_zip(zip) {
        return Err(GeocodeError::InvalidZip);
    }
    let result = ZIP_TABLE.get(&zip[..5]).copied().unwrap_or_else(|| {
        tracing::debug!(zip, "ZIP not in table, using fallback centroid");
        FALLBACK_CENTROID
    });
    Ok(result)
}

pub fn known_zip_count() -> usize {
    ZIP_TABLE.len()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub zip: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<GeocodeResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Looks up every ZIP independently; a bad entry does not fail the batch.
pub fn lookup_batch(zips: &[String]) -> Vec<BatchEntry> {
    zips.iter()
        .map(|zip| match lookup(zip) {
            Ok(data) => BatchEntry {
                zip: zip.clone(),
                success: true,
                data: Some(data),
                error: None,
            },
            Err(e) => BatchEntry {
                zip: zip.clone(),
                success: false,
                data: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}
