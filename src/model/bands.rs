// Amateur radio band definitions
//
// The contact archive identifies bands by MHz class: the integer part of
// the band's lowest frequency (1 = 160m, 3 = 80m, ... 50 = 6m). Contacts
// score on seven HF/VHF bands; the capability bonus tables additionally
// cover the four WARC-and-60m bands that monitoring stations may record.

use serde::{Deserialize, Serialize};

/// One amateur band, ordered by ascending frequency
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Band {
    B160,
    B80,
    B60,
    B40,
    B30,
    B20,
    B17,
    B15,
    B12,
    B10,
    B6,
}

impl Band {
    /// Parse the MHz-class integer used by the contact archive
    pub fn from_mhz_class(mhz: u32) -> Option<Band> {
        match mhz {
            1 => Some(Band::B160),
            3 => Some(Band::B80),
            5 => Some(Band::B60),
            7 => Some(Band::B40),
            10 => Some(Band::B30),
            14 => Some(Band::B20),
            18 => Some(Band::B17),
            21 => Some(Band::B15),
            24 => Some(Band::B12),
            28 => Some(Band::B10),
            50 => Some(Band::B6),
            _ => None,
        }
    }

    /// The MHz-class integer for this band
    pub fn mhz_class(self) -> u32 {
        match self {
            Band::B160 => 1,
            Band::B80 => 3,
            Band::B60 => 5,
            Band::B40 => 7,
            Band::B30 => 10,
            Band::B20 => 14,
            Band::B17 => 18,
            Band::B15 => 21,
            Band::B12 => 24,
            Band::B10 => 28,
            Band::B6 => 50,
        }
    }

    /// Conventional wavelength name, e.g. "20m"
    pub fn meters(self) -> &'static str {
        match self {
            Band::B160 => "160m",
            Band::B80 => "80m",
            Band::B60 => "60m",
            Band::B40 => "40m",
            Band::B30 => "30m",
            Band::B20 => "20m",
            Band::B17 => "17m",
            Band::B15 => "15m",
            Band::B12 => "12m",
            Band::B10 => "10m",
            Band::B6 => "6m",
        }
    }
}

/// Bands on which SEQP contacts score and grid multipliers accrue
pub const CONTEST_BANDS: [Band; 7] = [
    Band::B160,
    Band::B80,
    Band::B40,
    Band::B20,
    Band::B15,
    Band::B10,
    Band::B6,
];

/// Bands the skimmer and wideband-recording capability tables cover
pub const MONITOR_BANDS: [Band; 11] = [
    Band::B160,
    Band::B80,
    Band::B60,
    Band::B40,
    Band::B30,
    Band::B20,
    Band::B17,
    Band::B15,
    Band::B12,
    Band::B10,
    Band::B6,
];
