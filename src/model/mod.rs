// Domain model: bands, grid squares, modes, and contact records

pub mod bands;
pub mod contact;
pub mod grid;
pub mod modes;

pub use bands::Band;
pub use contact::{Contact, RawContact, SpotRecord};
