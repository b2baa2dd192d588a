// Bonus resolution and grand totals
//
// Every bonus is a flat award applied at most once per eligibility. The
// attribute store drives all but the spot bonus; absence from the store
// means zero for the store-driven bonuses, never an error. Participation
// bonuses fall back to the configured default flags when no submission
// record exists.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::ContestConfig;
use crate::db::store::{AttributeTable, SubmissionRecord};
use crate::model::bands::CONTEST_BANDS;
use crate::model::{Band, SpotRecord};

use super::scoring::Scorecard;

/// Fill the bonus columns of every scorecard
pub fn apply(
    cards: &mut BTreeMap<String, Scorecard>,
    attributes: &AttributeTable,
    spots: &[SpotRecord],
    cfg: &ContestConfig,
) {
    let spot_cells = index_spots(spots, cfg);
    for card in cards.values_mut() {
        let record = attributes.get(&card.call);
        apply_flat(card, record, cfg);
        card.spot_bonus = spot_bonus(&card.call, &card.grid, &spot_cells);
    }
}

fn apply_flat(card: &mut Scorecard, record: Option<&SubmissionRecord>, cfg: &ContestConfig) {
    let participation = record
        .map(|r| r.participation)
        .unwrap_or(cfg.default_participation);
    if participation.totality {
        card.operated_totality = cfg.bonus.operated_totality;
    }
    if participation.outdoors {
        card.operated_outdoors = cfg.bonus.operated_outdoors;
    }
    if participation.public_venue {
        card.operated_public = cfg.bonus.operated_public;
    }

    let Some(record) = record else { return };
    if record.ground_conductivity.map_or(false, |v| v > 0.0) {
        card.ground_conductivity = cfg.bonus.ground_conductivity;
    }
    if record.design_filename.is_some() {
        card.design_upload = cfg.bonus.design_upload;
    }
    card.antenna_bands = record.antenna_bands.len() as i64 * cfg.bonus.antenna_band;
    card.skimmer_bands = record.skimmer_bands.len() as i64 * cfg.bonus.skimmer_band;
    card.wideband_bands = record.wideband_bands.len() as i64 * cfg.bonus.wideband_band;
}

/// Distinct spotter grids per (spotted call, band, hour window)
type SpotCells = HashMap<(String, Band, u32), HashSet<String>>;

fn index_spots(spots: &[SpotRecord], cfg: &ContestConfig) -> SpotCells {
    let mut cells: SpotCells = HashMap::new();
    for spot in spots {
        if !CONTEST_BANDS.contains(&spot.band) {
            continue;
        }
        let elapsed = spot.timestamp - cfg.contest_start;
        let hours = elapsed.num_hours();
        if elapsed < chrono::Duration::zero() || hours >= i64::from(cfg.spot_hours) {
            continue;
        }
        cells
            .entry((spot.spotted.clone(), spot.band, hours as u32))
            .or_default()
            .insert(spot.grid.clone());
    }
    cells
}

/// Sum of distinct spotter grids over every band x hour cell, with the
/// participant's own home grid excluded from each cell
fn spot_bonus(call: &str, home_grid: &str, cells: &SpotCells) -> i64 {
    let mut bonus = 0i64;
    for ((spotted, _, _), grids) in cells {
        if spotted != call {
            continue;
        }
        bonus += grids.iter().filter(|g| g.as_str() != home_grid).count() as i64;
    }
    bonus
}
