// Crate-wide error and result types

use thiserror::Error;

/// Result type used across the scoring pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// One participant whose contacts disagree on the home grid square
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConflict {
    pub call: String,
    /// Distinct 4-character home grids seen in this participant's contacts
    pub grids: Vec<String>,
}

impl std::fmt::Display for GridConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} reports grids {}", self.call, self.grids.join("/"))
    }
}

/// Errors that abort a scoring run
#[derive(Error, Debug)]
pub enum Error {
    /// Attribute store operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Contact archive or score table CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Participants whose logged contacts report more than one home grid.
    /// These logs need manual review; the run never picks a grid silently.
    #[error("home grid disagreement: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    HomeGridConflict(Vec<GridConflict>),
}
