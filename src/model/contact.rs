// Contact records and the eligibility predicate
//
// The pooled archive mixes SEQP log submissions with spotting-network
// detections, so a row is read with every scored field optional and
// validated afterwards. Malformed values become missing fields, which
// makes the row ineligible; reading never fails on bad data.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use super::bands::Band;
use super::grid;

/// One row of the pooled contact archive, as read from CSV
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawContact {
    /// Submitting (or spotting) station's callsign
    #[serde(rename = "call_0", default)]
    pub station_a: Option<String>,
    /// Contacted (or spotted) station's callsign
    #[serde(rename = "call_1", default)]
    pub station_b: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "de_band")]
    pub band: Option<u32>,
    #[serde(rename = "datetime", default, deserialize_with = "de_datetime")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "grid_0", default)]
    pub grid_a: Option<String>,
    #[serde(rename = "grid_1", default)]
    pub grid_b: Option<String>,
    /// Provenance tag of the log collection this row came from
    #[serde(default)]
    pub source: String,
}

/// A validated contact from the contest's own logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Submitter's callsign, uppercased
    pub station_a: String,
    /// Contacted callsign, uppercased
    pub station_b: String,
    /// Mode code, uppercased
    pub mode: String,
    pub band: Band,
    pub timestamp: DateTime<Utc>,
    /// Submitter's locator as logged (4+ characters, pattern-checked)
    pub grid_a: String,
    /// Contacted station's locator as logged
    pub grid_b: String,
}

/// A detection of a participant's signal by a third-party monitoring
/// source. Only the fields the spot bonus needs are validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotRecord {
    /// Spotted participant's callsign, uppercased
    pub spotted: String,
    pub band: Band,
    pub timestamp: DateTime<Utc>,
    /// Spotter's 4-character grid, uppercased
    pub grid: String,
}

impl RawContact {
    /// Validate this row into a scoring contact. Returns None when any
    /// required field is missing or either grid fails the locator check.
    pub fn validate(&self) -> Option<Contact> {
        let station_a = non_empty(self.station_a.as_deref())?;
        let station_b = non_empty(self.station_b.as_deref())?;
        let mode = non_empty(self.mode.as_deref())?;
        let band = Band::from_mhz_class(self.band?)?;
        let timestamp = self.timestamp?;
        let grid_a = non_empty(self.grid_a.as_deref())?;
        let grid_b = non_empty(self.grid_b.as_deref())?;
        if !grid::is_valid_grid(grid_a) || !grid::is_valid_grid(grid_b) {
            return None;
        }
        Some(Contact {
            station_a: station_a.to_ascii_uppercase(),
            station_b: station_b.to_ascii_uppercase(),
            mode: mode.to_ascii_uppercase(),
            band,
            timestamp,
            grid_a: grid_a.to_string(),
            grid_b: grid_b.to_string(),
        })
    }

    /// True when the row would survive validation
    pub fn is_eligible(&self) -> bool {
        self.validate().is_some()
    }

    /// Extract a spot record: spotted call, band, time, and spotter grid
    /// must be present, but the full eligibility predicate does not apply
    pub fn as_spot(&self) -> Option<SpotRecord> {
        let spotted = non_empty(self.station_b.as_deref())?;
        let band = Band::from_mhz_class(self.band?)?;
        let timestamp = self.timestamp?;
        let grid = non_empty(self.grid_a.as_deref())?;
        Some(SpotRecord {
            spotted: spotted.to_ascii_uppercase(),
            band,
            timestamp,
            grid: grid::normalize_grid(grid),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    match value.map(str::trim) {
        Some("") | None => None,
        Some(v) => Some(v),
    }
}

/// Accept "7" or "7.0"; anything else becomes None (ineligible later)
fn de_band<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(raw) = raw else { return Ok(None) };
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u32>() {
        return Ok(Some(n));
    }
    match raw.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f >= 0.0 => Ok(Some(f as u32)),
        _ => Ok(None),
    }
}

/// Accept "YYYY-MM-DD HH:MM:SS" (the archive's format) or RFC 3339;
/// anything else becomes None
fn de_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(raw) = raw else { return Ok(None) };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(Some(Utc.from_utc_datetime(&naive)));
    }
    Ok(DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn raw(
        call_0: &str,
        call_1: &str,
        mode: &str,
        band: u32,
        datetime: &str,
        grid_0: &str,
        grid_1: &str,
        source: &str,
    ) -> RawContact {
        RawContact {
            station_a: Some(call_0.to_string()),
            station_b: Some(call_1.to_string()),
            mode: Some(mode.to_string()),
            band: Some(band),
            timestamp: NaiveDateTime::parse_from_str(datetime, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|n| Utc.from_utc_datetime(&n)),
            grid_a: Some(grid_0.to_string()),
            grid_b: Some(grid_1.to_string()),
            source: source.to_string(),
        }
    }

    #[test]
    fn test_complete_row_is_eligible() {
        let row = raw(
            "w2abc", "k1xyz", "cw", 14, "2017-08-21 14:05:00", "FN20", "FN42", "seqp_logs",
        );
        let contact = row.validate().unwrap();
        assert_eq!(contact.station_a, "W2ABC");
        assert_eq!(contact.station_b, "K1XYZ");
        assert_eq!(contact.mode, "CW");
        assert_eq!(contact.band, Band::B20);
    }

    #[test]
    fn test_missing_fields_are_ineligible() {
        let mut row = raw(
            "W2ABC", "K1XYZ", "CW", 14, "2017-08-21 14:05:00", "FN20", "FN42", "seqp_logs",
        );
        row.station_b = None;
        assert!(!row.is_eligible());

        let mut row2 = raw(
            "W2ABC", "K1XYZ", "CW", 14, "2017-08-21 14:05:00", "FN20", "FN42", "seqp_logs",
        );
        row2.timestamp = None;
        assert!(!row2.is_eligible());
    }

    #[test]
    fn test_grid_rules() {
        // 3-character lowercase grid: ineligible
        let short = raw(
            "W2ABC", "K1XYZ", "CW", 14, "2017-08-21 14:05:00", "ab1", "FN42", "seqp_logs",
        );
        assert!(!short.is_eligible());

        // 6-character grid passes; scoring later truncates to AB12
        let long = raw(
            "W2ABC", "K1XYZ", "CW", 14, "2017-08-21 14:05:00", "AB12xy", "FN42", "seqp_logs",
        );
        assert!(long.is_eligible());
    }

    #[test]
    fn test_unknown_band_is_ineligible() {
        let row = raw(
            "W2ABC", "K1XYZ", "CW", 2, "2017-08-21 14:05:00", "FN20", "FN42", "seqp_logs",
        );
        assert!(!row.is_eligible());
    }

    #[test]
    fn test_spot_extraction() {
        let row = raw(
            "skimmer1", "w2abc", "CW", 14, "2017-08-21 14:30:00", "em73xx", "", "rbn",
        );
        let spot = row.as_spot().unwrap();
        assert_eq!(spot.spotted, "W2ABC");
        assert_eq!(spot.grid, "EM73");
        assert_eq!(spot.band, Band::B20);
        // but a full contact it is not: grid_1 is missing
        assert!(!row.is_eligible());
    }
}
