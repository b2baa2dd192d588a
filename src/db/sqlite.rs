// SQLite-backed attribute store
//
// Mirrors the contest submission database: seqp_submissions plus the three
// per-band capability tables. Each table is read with one bulk query and
// joined in memory by submitter id, so a run issues four queries total
// regardless of participant count. Numeric columns are decoded leniently
// because the submission forms stored some of them as free text.

use std::collections::HashMap;

use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

use super::store::{insert_merged, AttributeStore, AttributeTable, SubmissionRecord};
use crate::config::ParticipationFlags;
use crate::error::Result;
use crate::model::Band;

/// Capability flag columns of seqp_antennas
const ANTENNA_COLS: [(&str, Band); 7] = [
    ("has_160", Band::B160),
    ("has_80", Band::B80),
    ("has_40", Band::B40),
    ("has_20", Band::B20),
    ("has_15", Band::B15),
    ("has_10", Band::B10),
    ("has_6", Band::B6),
];

/// Capability flag columns of seqp_skimmers and seqp_wideband
const MONITOR_COLS: [(&str, Band); 11] = [
    ("has_160", Band::B160),
    ("has_80", Band::B80),
    ("has_60", Band::B60),
    ("has_40", Band::B40),
    ("has_30", Band::B30),
    ("has_20", Band::B20),
    ("has_17", Band::B17),
    ("has_15", Band::B15),
    ("has_12", Band::B12),
    ("has_10", Band::B10),
    ("has_6", Band::B6),
];

/// Attribute store over the contest submission database
pub struct SqliteAttributeStore {
    pool: Pool<Sqlite>,
}

impl SqliteAttributeStore {
    /// Connect to the submission database. Store unavailability is fatal
    /// for the whole run, so this propagates any connection failure.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;
        log::info!("attribute store connected: {}", url);
        Ok(Self { pool })
    }

    pub fn from_pool(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    async fn load_submissions(&self) -> Result<HashMap<i64, SubmissionRecord>> {
        let rows = sqlx::query(
            "SELECT submitter_id, callsign, ground_conductivity, dsn_fname, \
             is_tot, is_out, is_pub FROM seqp_submissions",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_submitter = HashMap::with_capacity(rows.len());
        for row in rows {
            let callsign: Option<String> = row.try_get("callsign")?;
            let Some(callsign) = callsign.filter(|c| !c.trim().is_empty()) else {
                continue;
            };
            let mut record = SubmissionRecord::new(callsign);
            record.ground_conductivity = numeric_field(&row, "ground_conductivity");
            record.design_filename = row
                .try_get::<Option<String>, _>("dsn_fname")?
                .filter(|f| !f.trim().is_empty());
            // The submission form predates these flags being mandatory;
            // absent values fall back to the dataset-wide assumption
            let defaults = ParticipationFlags::default();
            record.participation = ParticipationFlags {
                totality: flag_field(&row, "is_tot").unwrap_or(defaults.totality),
                outdoors: flag_field(&row, "is_out").unwrap_or(defaults.outdoors),
                public_venue: flag_field(&row, "is_pub").unwrap_or(defaults.public_venue),
            };
            let submitter_id: i64 = row.try_get("submitter_id")?;
            by_submitter.insert(submitter_id, record);
        }
        Ok(by_submitter)
    }

    /// Fold one capability table's qualifying rows into the records
    async fn load_capabilities(
        &self,
        table: &str,
        columns: &[(&str, Band)],
        by_submitter: &mut HashMap<i64, SubmissionRecord>,
        select: fn(&mut SubmissionRecord) -> &mut std::collections::BTreeSet<Band>,
    ) -> Result<()> {
        let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
        let sql = format!(
            "SELECT submitter_id, erp, {} FROM {}",
            names.join(", "),
            table
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        for row in rows {
            // A capability row only counts with a qualifying power figure
            if numeric_field(&row, "erp").map_or(true, |v| v <= 0.0) {
                continue;
            }
            let submitter_id: i64 = row.try_get("submitter_id")?;
            let Some(record) = by_submitter.get_mut(&submitter_id) else {
                continue;
            };
            for (name, band) in columns {
                if truthy_field(&row, name) {
                    select(record).insert(*band);
                }
            }
        }
        Ok(())
    }
}

impl AttributeStore for SqliteAttributeStore {
    async fn load(&self) -> Result<AttributeTable> {
        let mut by_submitter = self.load_submissions().await?;
        self.load_capabilities("seqp_antennas", &ANTENNA_COLS, &mut by_submitter, |r| {
            &mut r.antenna_bands
        })
        .await?;
        self.load_capabilities("seqp_skimmers", &MONITOR_COLS, &mut by_submitter, |r| {
            &mut r.skimmer_bands
        })
        .await?;
        self.load_capabilities("seqp_wideband", &MONITOR_COLS, &mut by_submitter, |r| {
            &mut r.wideband_bands
        })
        .await?;

        let mut table = AttributeTable::new();
        for (_, record) in by_submitter {
            insert_merged(&mut table, record);
        }
        Ok(table)
    }
}

/// Decode a numeric column that may be stored as REAL, INTEGER, or TEXT
fn numeric_field(row: &SqliteRow, column: &str) -> Option<f64> {
    if let Ok(value) = row.try_get::<Option<f64>, _>(column) {
        return value;
    }
    row.try_get::<Option<String>, _>(column)
        .ok()
        .flatten()
        .and_then(|s| s.trim().parse().ok())
}

/// Decode a boolean-like column; None when NULL or undecodable
fn flag_field(row: &SqliteRow, column: &str) -> Option<bool> {
    row.try_get::<Option<i64>, _>(column)
        .ok()
        .flatten()
        .map(|v| v != 0)
}

fn truthy_field(row: &SqliteRow, column: &str) -> bool {
    numeric_field(row, column).map_or(false, |v| v != 0.0)
}
