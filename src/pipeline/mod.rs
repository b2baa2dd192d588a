// The scoring pipeline
//
// Four stages run to completion in order over one static dataset:
// ingestion filter -> deduplication -> per-participant scoring -> bonus
// resolution. Only the bonus stage touches the attribute store.

pub mod bonus;
pub mod dedup;
pub mod ingest;
pub mod scoring;

use std::collections::BTreeMap;

use crate::config::ContestConfig;
use crate::db::store::AttributeStore;
use crate::error::Result;
use crate::model::RawContact;
use scoring::Scorecard;

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct ScoreTable {
    /// One scorecard per participant, keyed by normalized callsign
    pub cards: BTreeMap<String, Scorecard>,
    /// Contact counts by mode over the deduplicated set, for audit
    pub mode_summary: BTreeMap<String, u64>,
}

/// Run the whole pipeline over a loaded archive and attribute store
pub async fn run<S: AttributeStore>(
    records: &[RawContact],
    store: &S,
    cfg: &ContestConfig,
) -> Result<ScoreTable> {
    let ingested = ingest::ingest(records, cfg);
    let deduplicated = dedup::deduplicate(&ingested.contacts, cfg.dedup_window());
    log::info!(
        "dedup: {} contacts kept of {} eligible",
        deduplicated.len(),
        ingested.contacts.len()
    );

    let mut cards = scoring::score(&ingested, &deduplicated, cfg)?;
    let mode_summary = scoring::mode_summary(&deduplicated);

    let attributes = store.load().await?;
    log::info!("attribute store: {} submission records", attributes.len());
    let spots = ingest::collect_spots(records, cfg);
    log::info!("spot records: {}", spots.len());
    bonus::apply(&mut cards, &attributes, &spots, cfg);

    Ok(ScoreTable {
        cards,
        mode_summary,
    })
}
