use crate::catalog::{BeadId, Catalog, CatalogError, DEFAULT_SPACER, GemType, gem_id};
use crate::width::{total_width, width_of};
use derive_more::{AsRef, Deref, From, Into};
use serde::{Deserialize, Serialize};

/// Hard bound on sequence length, only reached by degenerate input.
pub const MAX_SEQUENCE_LEN: usize = 5000;

/// Ordered bead ids in stringing order.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct BeadSequence(Vec<BeadId>);

impl FromIterator<BeadId> for BeadSequence {
    fn from_iter<T: IntoIterator<Item = BeadId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternConfig {
    pub target_circumference_mm: f64,
    pub primary: GemType,
    pub main_size_mm: u32,
    pub secondary: Option<GemType>,
    pub use_spacers: bool,
    pub spacer: Option<BeadId>,
    pub triple_focal: bool,
    pub focal: Vec<BeadId>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            target_circumference_mm: 177.8,
            primary: GemType::Onyx,
            main_size_mm: 10,
            secondary: None,
            use_spacers: false,
            spacer: None,
            triple_focal: false,
            focal: Vec::new(),
        }
    }
}

impl PatternConfig {
    pub fn spacer_id(&self) -> BeadId {
        self.spacer
            .clone()
            .unwrap_or_else(|| BeadId::from(DEFAULT_SPACER))
    }

    fn focal_occurrences(&self) -> usize {
        match (self.focal.is_empty(), self.triple_focal) {
            (true, _) => 0,
            (false, false) => 1,
            (false, true) => 3,
        }
    }
}

/// Without a focal cluster the strand is whole copies of the core cycle. With one, the cluster
/// is placed verbatim (once, or three times for a triad) and each gap is filled with an equal
/// sub-run of the main material.
pub fn configure(config: &PatternConfig, catalog: &Catalog) -> Result<BeadSequence, CatalogError> {
    let occurrences = config.focal_occurrences();
    if occurrences == 0 {
        return repeat_core_cycle(config, catalog);
    }

    let focal_width = total_width(catalog, &config.focal)? * occurrences as f64;
    let spacer_width = if config.use_spacers {
        Some(width_of(catalog, &config.spacer_id())?)
    } else {
        None
    };
    let remaining = (config.target_circumference_mm - focal_width).max(0.0);

    let gems = sub_run_gems(remaining, config.main_size_mm as f64, spacer_width, occurrences)
        .min(max_gems_per_run(occurrences, config.focal.len(), config.use_spacers));
    log::debug!(
        "focal x{} width {:.2}mm, remaining {:.2}mm -> {} gems per sub-run",
        occurrences,
        focal_width,
        remaining,
        gems
    );

    let sub_run = build_sub_run(gems, config);
    let mut beads = Vec::with_capacity(occurrences * (config.focal.len() + sub_run.len()));
    for _ in 0..occurrences {
        beads.extend_from_slice(&config.focal);
        beads.extend_from_slice(&sub_run);
    }
    Ok(beads.into())
}

/// The repeating unit used when there is no focal cluster.
pub fn core_cycle(config: &PatternConfig) -> Vec<BeadId> {
    let a = gem_id(config.primary, config.main_size_mm);
    let b = config.secondary.map(|g| gem_id(g, config.main_size_mm));
    let spacer = config.use_spacers.then(|| config.spacer_id());

    match (b, spacer) {
        (None, None) => vec![a],
        (None, Some(s)) => vec![a, s],
        (Some(b), None) => vec![a, b],
        (Some(b), Some(s)) => vec![a, s.clone(), b, s],
    }
}

fn repeat_core_cycle(config: &PatternConfig, catalog: &Catalog) -> Result<BeadSequence, CatalogError> {
    let core = core_cycle(config);
    let cycle_width = total_width(catalog, &core)?;
    if cycle_width <= 0.0 {
        log::warn!("core cycle {:?} has no width, nothing to repeat", core);
        return Ok(BeadSequence::default());
    }

    let mut beads = Vec::new();
    let mut width = 0.0;
    while width < config.target_circumference_mm {
        if beads.len() + core.len() > MAX_SEQUENCE_LEN {
            log::warn!("sequence capped at {} beads", beads.len());
            break;
        }
        beads.extend_from_slice(&core);
        width += cycle_width;
    }
    log::debug!(
        "core cycle of {} beads ({:.2}mm) repeated {} times",
        core.len(),
        cycle_width,
        beads.len() / core.len()
    );
    Ok(beads.into())
}

/// Smallest gem count per sub-run so that `runs` equal sub-runs cover `remaining`.
///
/// A sub-run of N gems is `N * main` wide, plus `(N - 1) * spacer` when spacers sit between
/// the gems.
pub fn sub_run_gems(remaining: f64, main_mm: f64, spacer_mm: Option<f64>, runs: usize) -> usize {
    if remaining <= 0.0 || runs == 0 {
        return 0;
    }
    let runs = runs as f64;

    let gems = match spacer_mm {
        None => {
            let unit = runs * main_mm;
            if unit <= 0.0 {
                log::warn!("sub-run gem width {}mm is degenerate", main_mm);
                return 0;
            }
            (remaining / unit).ceil()
        }
        Some(spacer) => {
            let unit = runs * (main_mm + spacer);
            if unit <= 0.0 {
                log::warn!("sub-run unit width {}mm is degenerate", main_mm + spacer);
                return 0;
            }
            ((remaining + runs * spacer) / unit).ceil().max(1.0)
        }
    };
    gems.min(MAX_SEQUENCE_LEN as f64) as usize
}

fn max_gems_per_run(occurrences: usize, focal_len: usize, use_spacers: bool) -> usize {
    let per_run = (MAX_SEQUENCE_LEN / occurrences).saturating_sub(focal_len);
    if use_spacers {
        per_run.div_ceil(2)
    } else {
        per_run
    }
}

/// N gems of the main material. Spacers only ever sit between two gems.
pub fn build_sub_run(gems: usize, config: &PatternConfig) -> Vec<BeadId> {
    let spacer = config.spacer_id();
    (0..gems)
        .flat_map(|i| {
            let material = match config.secondary {
                Some(secondary) if i % 2 == 1 => secondary,
                _ => config.primary,
            };
            let between = (config.use_spacers && i + 1 < gems).then(|| spacer.clone());
            std::iter::once(gem_id(material, config.main_size_mm)).chain(between)
        })
        .collect()
}
