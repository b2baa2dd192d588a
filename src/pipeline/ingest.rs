// Ingestion filter
//
// Selects the contest's own log rows, validates them, and sorts by
// (station_a, station_b, mode, band, timestamp). The sort is load-bearing:
// it makes every duplicate run contiguous so deduplication can work in a
// single forward scan.

use std::collections::HashMap;

use crate::config::ContestConfig;
use crate::model::{Contact, RawContact, SpotRecord};

/// Output of the ingestion filter
#[derive(Debug, Clone, Default)]
pub struct IngestOutput {
    /// Eligible own-log contacts in canonical order
    pub contacts: Vec<Contact>,
    /// Ineligible own-log rows per submitter callsign. Rows whose
    /// submitter callsign is itself missing are counted under ""
    pub ineligible: HashMap<String, u64>,
}

/// Filter and order the archive's own-log rows
pub fn ingest(records: &[RawContact], cfg: &ContestConfig) -> IngestOutput {
    let mut out = IngestOutput::default();
    for row in records.iter().filter(|r| r.source == cfg.log_source) {
        match row.validate() {
            Some(contact) => out.contacts.push(contact),
            None => {
                let call = row
                    .station_a
                    .as_deref()
                    .map(|c| c.trim().to_ascii_uppercase())
                    .unwrap_or_default();
                *out.ineligible.entry(call).or_insert(0) += 1;
            }
        }
    }
    out.contacts.sort_by(|a, b| {
        (&a.station_a, &a.station_b, &a.mode, a.band, a.timestamp).cmp(&(
            &b.station_a,
            &b.station_b,
            &b.mode,
            b.band,
            b.timestamp,
        ))
    });
    let dropped: u64 = out.ineligible.values().sum();
    log::info!(
        "ingest: {} eligible contacts, {} ineligible rows dropped",
        out.contacts.len(),
        dropped
    );
    out
}

/// Extract spot records from the third-party spotting sources
pub fn collect_spots(records: &[RawContact], cfg: &ContestConfig) -> Vec<SpotRecord> {
    records
        .iter()
        .filter(|r| cfg.spot_sources.iter().any(|s| *s == r.source))
        .filter_map(RawContact::as_spot)
        .collect()
}
