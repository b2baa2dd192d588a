// Mode classification for contact point scoring
//
// The accepted mode lists narrowed between contest revisions, so
// classification is table-driven from the contest configuration instead
// of a hardcoded match.

use crate::config::ContestConfig;

/// Scoring class of an operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeClass {
    /// Voice modes, 1 point per contact
    Phone,
    /// CW and digital modes, 2 points per contact
    CwDigital,
    /// Outside both accepted sets; neither scored nor counted
    Unmapped,
}

/// Classify a mode code against the configured accepted sets
pub fn classify(cfg: &ContestConfig, mode: &str) -> ModeClass {
    let mode = mode.trim().to_ascii_uppercase();
    if cfg.phone_modes.iter().any(|m| *m == mode) {
        ModeClass::Phone
    } else if cfg.cw_digital_modes.iter().any(|m| *m == mode) {
        ModeClass::CwDigital
    } else {
        ModeClass::Unmapped
    }
}
