pub mod engine;
pub mod ring;

pub use engine::{SlotPlacement, layout};
pub use ring::Ring;

use glam::DVec3;

/// World up. The ring lies in the plane perpendicular to it.
pub const UP: DVec3 = DVec3::Y;
/// Chords shorter than this are treated as a single point.
pub const MIN_CHORD_MM: f64 = 1e-6;
