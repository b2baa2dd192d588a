// Contact archive loading
//
// The pooled archive is one CSV row per logged contact or spot, already
// decompressed. Rows whose fields are malformed still load (their bad
// fields become missing and the ingestion filter drops them); only rows
// the CSV layer cannot shape at all are skipped, with a tally.

use std::path::Path;

use crate::error::Result;
use crate::model::RawContact;

/// Read every contact row from a CSV archive
pub fn load_contacts(path: &Path) -> Result<Vec<RawContact>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;
    let mut rows = Vec::new();
    let mut unreadable = 0u64;
    for record in reader.deserialize::<RawContact>() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) => {
                unreadable += 1;
                log::warn!("skipping unreadable archive row: {}", err);
            }
        }
    }
    log::info!(
        "archive: {} rows read from {} ({} unreadable)",
        rows.len(),
        path.display(),
        unreadable
    );
    Ok(rows)
}
