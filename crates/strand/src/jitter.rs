use crate::catalog::{BeadId, BeadKind, Catalog, CatalogError, GemType};
use crate::layout::SlotPlacement;
use glam::DMat3;
use palette::Srgb;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotJitter {
    /// Rotation about the bead's own pole axis, radians.
    pub spin: f64,
    pub brightness: f64,
}

impl SlotJitter {
    pub const NONE: Self = Self {
        spin: 0.0,
        brightness: 1.0,
    };

    fn draw(rng: &mut StdRng, kind: &BeadKind) -> Self {
        let (lo, hi) = brightness_range(kind);
        let spin = rng.gen_range(-PI..PI);
        let brightness = if lo < hi { rng.gen_range(lo..hi) } else { lo };
        Self { spin, brightness }
    }

    /// Spins a round bead about its local Y axis. Flat beads are returned unchanged.
    pub fn apply(&self, placement: &SlotPlacement) -> SlotPlacement {
        let mut out = placement.clone();
        if !placement.flat {
            out.basis = placement.basis * DMat3::from_rotation_y(self.spin);
        }
        out
    }

    pub fn tint(&self, color: Srgb<u8>) -> Srgb<f64> {
        let c: Srgb<f64> = color.into_format();
        Srgb::new(
            c.red * self.brightness,
            c.green * self.brightness,
            c.blue * self.brightness,
        )
    }
}

pub fn brightness_range(kind: &BeadKind) -> (f64, f64) {
    match kind {
        BeadKind::Round { material, .. } => match material {
            GemType::WhiteJade => (0.92, 1.08),
            GemType::Malachite | GemType::Larvikite | GemType::TigerEye | GemType::Bronzite => {
                (0.8, 1.2)
            }
            GemType::RubyInZoisite => (0.9, 1.1),
            GemType::Quartz => (0.65, 1.25),
            GemType::MapStone => (0.8, 1.1),
            GemType::Carved | GemType::Onyx => (0.95, 1.05),
        },
        BeadKind::Spacer { .. } | BeadKind::Cube { .. } => (1.0, 1.0),
    }
}

/// Seeded spin and brightness per slot index. A slot is only redrawn when the bead at its index
/// changes.
pub struct JitterTable {
    rng: StdRng,
    slots: HashMap<usize, (BeadId, SlotJitter)>,
}

impl JitterTable {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            slots: HashMap::new(),
        }
    }

    /// Brings the table in line with `sequence`. Returns how many slots were redrawn.
    /// An unknown bead leaves the table untouched.
    pub fn sync(&mut self, sequence: &[BeadId], catalog: &Catalog) -> Result<usize, CatalogError> {
        let specs = sequence
            .iter()
            .map(|id| catalog.lookup(id))
            .collect::<Result<Vec<_>, _>>()?;

        let mut redrawn = 0;
        for (index, (id, spec)) in sequence.iter().zip(specs).enumerate() {
            if self.slots.get(&index).is_some_and(|(bead, _)| bead == id) {
                continue;
            }
            let jitter = SlotJitter::draw(&mut self.rng, &spec.kind);
            self.slots.insert(index, (id.clone(), jitter));
            redrawn += 1;
        }
        self.slots.retain(|&index, _| index < sequence.len());
        log::debug!("jitter table synced, {} slots redrawn", redrawn);
        Ok(redrawn)
    }

    pub fn get(&self, index: usize) -> SlotJitter {
        self.slots
            .get(&index)
            .map(|(_, jitter)| *jitter)
            .unwrap_or(SlotJitter::NONE)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn apply(&self, placements: &[SlotPlacement]) -> Vec<SlotPlacement> {
        placements
            .iter()
            .map(|p| self.get(p.index).apply(p))
            .collect()
    }
}
