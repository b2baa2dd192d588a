// Contest rule configuration
//
// The accepted mode lists, bonus values, and spot windows have changed
// between contest revisions, so everything a contest year can tune lives
// here rather than in code. Defaults reproduce the 2017 SEQP rules.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Flat bonus point values, each applied at most once per eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusValues {
    /// Operated during totality
    pub operated_totality: i64,
    /// Operated outdoors
    pub operated_outdoors: i64,
    /// Operated at a publicly accessible venue
    pub operated_public: i64,
    /// Submitted a ground conductivity measurement > 0
    pub ground_conductivity: i64,
    /// Uploaded a station design document
    pub design_upload: i64,
    /// Per band with a qualifying antenna capability
    pub antenna_band: i64,
    /// Per band with a qualifying monitoring-node (skimmer) capability
    pub skimmer_band: i64,
    /// Per band with a qualifying wideband-recording capability
    pub wideband_band: i64,
}

impl Default for BonusValues {
    fn default() -> Self {
        Self {
            operated_totality: 100,
            operated_outdoors: 100,
            operated_public: 100,
            ground_conductivity: 50,
            design_upload: 100,
            antenna_band: 50,
            skimmer_band: 50,
            wideband_band: 50,
        }
    }
}

/// Per-participant participation bonus eligibility. The 2017 submission
/// form asked for these but the published results granted all three to
/// every submitter, so absent data defaults to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipationFlags {
    pub totality: bool,
    pub outdoors: bool,
    pub public_venue: bool,
}

impl Default for ParticipationFlags {
    fn default() -> Self {
        Self {
            totality: true,
            outdoors: true,
            public_venue: true,
        }
    }
}

/// Everything the scoring rules parameterize for one contest year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContestConfig {
    /// Provenance tag of the contest's own submitted logs
    pub log_source: String,
    /// Provenance tags of third-party spotting networks (pooled for the
    /// spot bonus)
    pub spot_sources: Vec<String>,
    /// Modes scored as phone contacts
    pub phone_modes: Vec<String>,
    /// Modes scored as CW/digital contacts
    pub cw_digital_modes: Vec<String>,
    /// Points per phone contact
    pub phone_points: i64,
    /// Points per CW/digital contact
    pub cw_digital_points: i64,
    /// Minutes a repeat contact must wait before it scores again
    pub dedup_window_minutes: i64,
    /// Start of the contest period, UTC
    pub contest_start: DateTime<Utc>,
    /// Number of one-hour spot windows from the contest start
    pub spot_hours: u32,
    /// Flat bonus point values
    pub bonus: BonusValues,
    /// Participation flags assumed for submitters without attribute data
    pub default_participation: ParticipationFlags,
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            log_source: "seqp_logs".to_string(),
            spot_sources: vec!["pskreporter".to_string(), "rbn".to_string()],
            phone_modes: to_strings(&["PH", "FM", "SSB", "VO"]),
            cw_digital_modes: to_strings(&[
                "CW", "RY", "FT", "PK", "PS", "JT", "RT", "US", "JT65", "DG", "DI", "OT",
                "FT8", "HE", "DA", "PSK31",
            ]),
            phone_points: 1,
            cw_digital_points: 2,
            dedup_window_minutes: 10,
            // 2017-08-21 14:00 UTC, the first full hour of the eclipse pass
            contest_start: Utc.with_ymd_and_hms(2017, 8, 21, 14, 0, 0).unwrap(),
            spot_hours: 8,
            bonus: BonusValues::default(),
            default_participation: ParticipationFlags::default(),
        }
    }
}

impl ContestConfig {
    /// Cooldown below which a repeat contact is a duplicate
    pub fn dedup_window(&self) -> Duration {
        Duration::minutes(self.dedup_window_minutes)
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
