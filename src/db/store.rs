// Attribute store interface and record shapes
//
// The relational submission store is injected behind a trait so the bonus
// resolver can run against an in-memory table in tests. Implementations
// load the whole store up front; the pipeline then joins in memory rather
// than querying per participant.

use std::collections::{BTreeSet, HashMap};

use crate::config::ParticipationFlags;
use crate::error::Result;
use crate::model::Band;

/// Flat per-participant facts from the submission store, already reduced
/// to what the bonus rules read
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRecord {
    /// Normalized callsign
    pub callsign: String,
    pub ground_conductivity: Option<f64>,
    /// Uploaded station-design document filename, when present
    pub design_filename: Option<String>,
    pub participation: ParticipationFlags,
    /// Bands with a qualifying antenna capability row
    pub antenna_bands: BTreeSet<Band>,
    /// Bands with a qualifying skimmer (monitoring node) capability row
    pub skimmer_bands: BTreeSet<Band>,
    /// Bands with a qualifying wideband-recording capability row
    pub wideband_bands: BTreeSet<Band>,
}

impl SubmissionRecord {
    pub fn new(callsign: impl AsRef<str>) -> Self {
        Self {
            callsign: callsign.as_ref().trim().to_ascii_uppercase(),
            ground_conductivity: None,
            design_filename: None,
            participation: ParticipationFlags::default(),
            antenna_bands: BTreeSet::new(),
            skimmer_bands: BTreeSet::new(),
            wideband_bands: BTreeSet::new(),
        }
    }

    /// Fold another record for the same callsign into this one. Multiple
    /// submissions by one operator union their capabilities; scalar facts
    /// keep the first meaningful value seen.
    pub fn merge(&mut self, other: SubmissionRecord) {
        if self.ground_conductivity.map_or(true, |v| v <= 0.0) {
            if let Some(v) = other.ground_conductivity {
                self.ground_conductivity = Some(v);
            }
        }
        if self.design_filename.is_none() {
            self.design_filename = other.design_filename;
        }
        self.participation.totality |= other.participation.totality;
        self.participation.outdoors |= other.participation.outdoors;
        self.participation.public_venue |= other.participation.public_venue;
        self.antenna_bands.extend(other.antenna_bands);
        self.skimmer_bands.extend(other.skimmer_bands);
        self.wideband_bands.extend(other.wideband_bands);
    }
}

/// Submission records keyed by normalized callsign
pub type AttributeTable = HashMap<String, SubmissionRecord>;

/// Read-only source of submission attribute records
#[allow(async_fn_in_trait)]
pub trait AttributeStore {
    /// Load every submission record, merged per callsign
    async fn load(&self) -> Result<AttributeTable>;
}

/// Insert a record into a table, merging with any existing entry for the
/// same callsign
pub fn insert_merged(table: &mut AttributeTable, record: SubmissionRecord) {
    if record.callsign.is_empty() {
        return;
    }
    match table.entry(record.callsign.clone()) {
        std::collections::hash_map::Entry::Occupied(mut entry) => {
            entry.get_mut().merge(record);
        }
        std::collections::hash_map::Entry::Vacant(entry) => {
            entry.insert(record);
        }
    }
}
