// Per-participant scoring
//
// Rule 1: 1 point per phone contact, 2 per CW/digital contact. Modes in
// neither accepted set earn no points and no contact count, though their
// contacted grid still feeds Rule 2.
// Rule 2: each distinct 4-character contacted grid counts once per band;
// the same grid on two bands is two multipliers.
// QSO score = total contact points x total grid multiplier.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::config::ContestConfig;
use crate::error::{Error, GridConflict, Result};
use crate::model::bands::CONTEST_BANDS;
use crate::model::modes::{classify, ModeClass};
use crate::model::{grid, Band, Contact};

use super::ingest::IngestOutput;

/// One participant's line of the score table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorecard {
    /// Normalized callsign
    pub call: String,
    /// 4-character home grid, uppercased
    pub grid: String,
    /// Eligible contacts submitted, before deduplication
    pub submitted: u64,
    /// Own-log rows dropped at ingestion for ineligibility
    pub ineligible: u64,
    pub phone_count: u64,
    pub phone_points: i64,
    pub cw_digital_count: u64,
    pub cw_digital_points: i64,
    /// Distinct contacted grids per contest band, from the deduplicated set
    pub grid_multipliers: BTreeMap<Band, u64>,
    // Bonus columns, filled by the bonus resolver
    pub operated_totality: i64,
    pub operated_outdoors: i64,
    pub operated_public: i64,
    pub ground_conductivity: i64,
    pub design_upload: i64,
    pub antenna_bands: i64,
    pub skimmer_bands: i64,
    pub wideband_bands: i64,
    pub spot_bonus: i64,
}

impl Scorecard {
    pub fn total_qso_points(&self) -> i64 {
        self.phone_points + self.cw_digital_points
    }

    pub fn total_multiplier(&self) -> u64 {
        self.grid_multipliers.values().sum()
    }

    /// The central formula: points times multipliers, not a sum
    pub fn qso_score(&self) -> i64 {
        self.total_qso_points() * self.total_multiplier() as i64
    }

    pub fn valid_count(&self) -> u64 {
        self.phone_count + self.cw_digital_count
    }

    pub fn dropped_count(&self) -> u64 {
        self.submitted - self.valid_count()
    }

    pub fn bonus_total(&self) -> i64 {
        self.operated_totality
            + self.operated_outdoors
            + self.operated_public
            + self.ground_conductivity
            + self.design_upload
            + self.antenna_bands
            + self.skimmer_bands
            + self.wideband_bands
            + self.spot_bonus
    }

    pub fn grand_total(&self) -> i64 {
        self.qso_score() + self.bonus_total()
    }
}

/// Aggregate scorecards from the eligible and deduplicated contact sets.
/// Fails when any participant's contacts disagree on the home grid.
pub fn score(
    ingested: &IngestOutput,
    deduplicated: &[Contact],
    cfg: &ContestConfig,
) -> Result<BTreeMap<String, Scorecard>> {
    let mut cards: BTreeMap<String, Scorecard> = BTreeMap::new();
    let mut home_grids: HashMap<String, BTreeSet<String>> = HashMap::new();

    // Submitted counts and home grids come from the pre-dedup eligible set
    for contact in &ingested.contacts {
        let card = cards
            .entry(contact.station_a.clone())
            .or_insert_with(|| Scorecard {
                call: contact.station_a.clone(),
                ..Scorecard::default()
            });
        card.submitted += 1;
        home_grids
            .entry(contact.station_a.clone())
            .or_default()
            .insert(grid::normalize_grid(&contact.grid_a));
    }

    let mut conflicts = Vec::new();
    for (call, grids) in &home_grids {
        if grids.len() > 1 {
            conflicts.push(GridConflict {
                call: call.clone(),
                grids: grids.iter().cloned().collect(),
            });
        }
    }
    if !conflicts.is_empty() {
        conflicts.sort_by(|a, b| a.call.cmp(&b.call));
        return Err(Error::HomeGridConflict(conflicts));
    }
    for card in cards.values_mut() {
        if let Some(grids) = home_grids.get(&card.call) {
            // Exactly one grid per participant at this point
            card.grid = grids.iter().next().cloned().unwrap_or_default();
        }
        card.ineligible = ingested.ineligible.get(&card.call).copied().unwrap_or(0);
    }

    // Points and multipliers come from the deduplicated set
    let mut grids_worked: HashMap<(String, Band), BTreeSet<String>> = HashMap::new();
    for contact in deduplicated {
        let Some(card) = cards.get_mut(&contact.station_a) else {
            continue;
        };
        match classify(cfg, &contact.mode) {
            ModeClass::Phone => {
                card.phone_count += 1;
                card.phone_points += cfg.phone_points;
            }
            ModeClass::CwDigital => {
                card.cw_digital_count += 1;
                card.cw_digital_points += cfg.cw_digital_points;
            }
            ModeClass::Unmapped => {}
        }
        if CONTEST_BANDS.contains(&contact.band) {
            grids_worked
                .entry((contact.station_a.clone(), contact.band))
                .or_default()
                .insert(grid::normalize_grid(&contact.grid_b));
        }
    }
    for ((call, band), grids) in grids_worked {
        if let Some(card) = cards.get_mut(&call) {
            card.grid_multipliers.insert(band, grids.len() as u64);
        }
    }

    log::info!("scoring: {} participants", cards.len());
    Ok(cards)
}

/// Contact counts by mode over the deduplicated set, for audit
pub fn mode_summary(deduplicated: &[Contact]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for contact in deduplicated {
        *counts.entry(contact.mode.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::contact::tests::raw;
    use crate::pipeline::{dedup, ingest};

    fn run_scoring(rows: Vec<crate::model::RawContact>) -> Result<BTreeMap<String, Scorecard>> {
        let cfg = ContestConfig::default();
        let ingested = ingest::ingest(&rows, &cfg);
        let deduplicated = dedup::deduplicate(&ingested.contacts, cfg.dedup_window());
        score(&ingested, &deduplicated, &cfg)
    }

    #[test]
    fn test_scoring_formula() {
        // 3 phone + 2 CW on one band with 2 distinct grids:
        // points 3 + 4 = 7, multiplier 2, score 14
        let rows = vec![
            raw("W2ABC", "K1AAA", "SSB", 14, "2017-08-21 14:00:00", "FN20", "FN42", "seqp_logs"),
            raw("W2ABC", "K1BBB", "SSB", 14, "2017-08-21 14:20:00", "FN20", "FN42", "seqp_logs"),
            raw("W2ABC", "K1CCC", "SSB", 14, "2017-08-21 14:40:00", "FN20", "EM48", "seqp_logs"),
            raw("W2ABC", "K1DDD", "CW", 14, "2017-08-21 15:00:00", "FN20", "FN42", "seqp_logs"),
            raw("W2ABC", "K1EEE", "CW", 14, "2017-08-21 15:20:00", "FN20", "EM48", "seqp_logs"),
        ];
        let cards = run_scoring(rows).unwrap();
        let card = &cards["W2ABC"];
        assert_eq!(card.phone_count, 3);
        assert_eq!(card.cw_digital_count, 2);
        assert_eq!(card.total_qso_points(), 7);
        assert_eq!(card.total_multiplier(), 2);
        assert_eq!(card.qso_score(), 14);
        assert_eq!(card.valid_count(), 5);
        assert_eq!(card.dropped_count(), 0);
    }

    #[test]
    fn test_multiplier_distinct_per_band() {
        // Same grid twice on 20m counts once there; same grid on 40m
        // counts separately
        let rows = vec![
            raw("W2ABC", "K1AAA", "CW", 14, "2017-08-21 14:00:00", "FN20", "FN42ab", "seqp_logs"),
            raw("W2ABC", "K1BBB", "CW", 14, "2017-08-21 14:30:00", "FN20", "FN42cd", "seqp_logs"),
            raw("W2ABC", "K1AAA", "CW", 7, "2017-08-21 15:00:00", "FN20", "FN42ab", "seqp_logs"),
        ];
        let cards = run_scoring(rows).unwrap();
        let card = &cards["W2ABC"];
        assert_eq!(card.grid_multipliers.get(&Band::B20), Some(&1));
        assert_eq!(card.grid_multipliers.get(&Band::B40), Some(&1));
        assert_eq!(card.total_multiplier(), 2);
    }

    #[test]
    fn test_unmapped_mode_counts_nowhere() {
        let rows = vec![
            raw("W2ABC", "K1AAA", "CW", 14, "2017-08-21 14:00:00", "FN20", "FN42", "seqp_logs"),
            raw("W2ABC", "K1BBB", "SSTV", 14, "2017-08-21 14:30:00", "FN20", "EM48", "seqp_logs"),
        ];
        let cards = run_scoring(rows).unwrap();
        let card = &cards["W2ABC"];
        assert_eq!(card.phone_count, 0);
        assert_eq!(card.cw_digital_count, 1);
        assert_eq!(card.valid_count(), 1);
        // the SSTV contact is submitted but neither valid nor scored
        assert_eq!(card.submitted, 2);
        assert_eq!(card.dropped_count(), 1);
        // it still contributes its contacted grid to the band multiplier
        assert_eq!(card.total_multiplier(), 2);
    }

    #[test]
    fn test_duplicates_score_once() {
        let rows = vec![
            raw("W2ABC", "K1AAA", "CW", 14, "2017-08-21 14:00:00", "FN20", "FN42", "seqp_logs"),
            raw("W2ABC", "K1AAA", "CW", 14, "2017-08-21 14:05:00", "FN20", "FN42", "seqp_logs"),
        ];
        let cards = run_scoring(rows).unwrap();
        let card = &cards["W2ABC"];
        assert_eq!(card.submitted, 2);
        assert_eq!(card.cw_digital_count, 1);
        assert_eq!(card.dropped_count(), 1);
    }

    #[test]
    fn test_home_grid_conflict_is_surfaced() {
        let rows = vec![
            raw("W2ABC", "K1AAA", "CW", 14, "2017-08-21 14:00:00", "FN20", "FN42", "seqp_logs"),
            raw("W2ABC", "K1BBB", "CW", 14, "2017-08-21 14:30:00", "FN31", "FN42", "seqp_logs"),
        ];
        match run_scoring(rows) {
            Err(Error::HomeGridConflict(conflicts)) => {
                assert_eq!(conflicts.len(), 1);
                assert_eq!(conflicts[0].call, "W2ABC");
                assert_eq!(conflicts[0].grids, vec!["FN20", "FN31"]);
            }
            other => panic!("expected home grid conflict, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_longer_locator_same_prefix_is_no_conflict() {
        // FN20ab and FN20xx share the 4-character home grid FN20
        let rows = vec![
            raw("W2ABC", "K1AAA", "CW", 14, "2017-08-21 14:00:00", "FN20ab", "FN42", "seqp_logs"),
            raw("W2ABC", "K1BBB", "CW", 14, "2017-08-21 14:30:00", "FN20xx", "EM48", "seqp_logs"),
        ];
        let cards = run_scoring(rows).unwrap();
        assert_eq!(cards["W2ABC"].grid, "FN20");
    }

    #[test]
    fn test_mode_summary_counts() {
        let rows = vec![
            raw("W2ABC", "K1AAA", "CW", 14, "2017-08-21 14:00:00", "FN20", "FN42", "seqp_logs"),
            raw("W2ABC", "K1BBB", "CW", 14, "2017-08-21 14:30:00", "FN20", "EM48", "seqp_logs"),
            raw("W2ABC", "K1CCC", "SSB", 14, "2017-08-21 15:00:00", "FN20", "FN42", "seqp_logs"),
        ];
        let cfg = ContestConfig::default();
        let ingested = ingest::ingest(&rows, &cfg);
        let deduplicated = dedup::deduplicate(&ingested.contacts, cfg.dedup_window());
        let summary = mode_summary(&deduplicated);
        assert_eq!(summary.get("CW"), Some(&2));
        assert_eq!(summary.get("SSB"), Some(&1));
    }
}
