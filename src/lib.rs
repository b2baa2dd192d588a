// SEQP scoring library
// Re-export modules for use by the seqp-score binary and tests

pub mod archive;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod report;

pub use config::ContestConfig;
pub use error::{Error, Result};
