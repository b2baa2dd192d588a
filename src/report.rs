// Score table and mode summary export
//
// Column layout follows the published results CSV: counts, per-band grid
// multipliers, bonus categories, grand total. Every column is
// recomputable from the raw inputs; the file is reporting only.

use std::path::Path;

use crate::error::Result;
use crate::model::bands::CONTEST_BANDS;
use crate::pipeline::ScoreTable;

/// Write one row per participant, ordered by callsign
pub fn write_score_table(path: &Path, table: &ScoreTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec![
        "call".to_string(),
        "grid".to_string(),
        "qsos_submitted".to_string(),
        "qsos_ineligible".to_string(),
        "qsos_dropped".to_string(),
        "qsos_valid".to_string(),
        "ph_qso".to_string(),
        "ph_qso_pts".to_string(),
        "cw_qso".to_string(),
        "cw_qso_pts".to_string(),
        "total_qso_pts".to_string(),
    ];
    for band in CONTEST_BANDS {
        header.push(format!("gs_{}", band.mhz_class()));
    }
    header.extend(
        [
            "total_gs",
            "qso_score",
            "operated_totality",
            "operated_outdoors",
            "operated_public",
            "ground_conductivity",
            "design_upload",
            "antenna_bands",
            "skimmer_bands",
            "wideband_bands",
            "spot_bonus",
            "total",
        ]
        .map(String::from),
    );
    writer.write_record(&header)?;

    for card in table.cards.values() {
        let mut row = vec![
            card.call.clone(),
            card.grid.clone(),
            card.submitted.to_string(),
            card.ineligible.to_string(),
            card.dropped_count().to_string(),
            card.valid_count().to_string(),
            card.phone_count.to_string(),
            card.phone_points.to_string(),
            card.cw_digital_count.to_string(),
            card.cw_digital_points.to_string(),
            card.total_qso_points().to_string(),
        ];
        for band in CONTEST_BANDS {
            row.push(
                card.grid_multipliers
                    .get(&band)
                    .copied()
                    .unwrap_or(0)
                    .to_string(),
            );
        }
        row.extend([
            card.total_multiplier().to_string(),
            card.qso_score().to_string(),
            card.operated_totality.to_string(),
            card.operated_outdoors.to_string(),
            card.operated_public.to_string(),
            card.ground_conductivity.to_string(),
            card.design_upload.to_string(),
            card.antenna_bands.to_string(),
            card.skimmer_bands.to_string(),
            card.wideband_bands.to_string(),
            card.spot_bonus.to_string(),
            card.grand_total().to_string(),
        ]);
        writer.write_record(&row)?;
    }
    writer.flush()?;
    log::info!(
        "score table: {} participants written to {}",
        table.cards.len(),
        path.display()
    );
    Ok(())
}

/// Write contact counts by mode over the deduplicated set
pub fn write_mode_summary(path: &Path, table: &ScoreTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["mode", "count"])?;
    for (mode, count) in &table.mode_summary {
        writer.write_record([mode.as_str(), &count.to_string()])?;
    }
    writer.flush()?;
    log::info!("mode summary written to {}", path.display());
    Ok(())
}
