use crate::catalog::{BeadId, BeadSpec, Catalog, CatalogError};
use crate::layout::{MIN_CHORD_MM, Ring, UP};
use crate::width::MIN_CIRCUMFERENCE_MM;
use glam::{DMat3, DQuat, DVec3};
use serde::Serialize;

/// Where one bead of the sequence sits, in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotPlacement {
    pub index: usize,
    pub bead: BeadId,
    pub position: DVec3,
    /// Columns are the bead's local X, Y and Z axes.
    pub basis: DMat3,
    pub flat: bool,
}

impl SlotPlacement {
    pub fn rotation(&self) -> DQuat {
        DQuat::from_mat3(&self.basis)
    }
}

/// Computes one placement per sequence index, in sequence order.
///
/// Every id is resolved before anything is placed, so an unknown bead fails the whole call.
/// Circumferences under the buildable minimum are raised to it.
pub fn layout(
    sequence: &[BeadId],
    circumference_mm: f64,
    catalog: &Catalog,
) -> Result<Vec<SlotPlacement>, CatalogError> {
    let specs = sequence
        .iter()
        .map(|id| catalog.lookup(id))
        .collect::<Result<Vec<_>, _>>()?;

    let circumference = circumference_mm.max(MIN_CIRCUMFERENCE_MM);
    if circumference != circumference_mm {
        log::debug!(
            "circumference {}mm raised to {}mm",
            circumference_mm,
            circumference
        );
    }
    let ring = Ring::new(circumference);

    let mut placements = Vec::with_capacity(specs.len());
    let mut theta = 0.0;
    let mut i = 0;
    while i < specs.len() {
        if !specs[i].kind.is_flat() {
            theta += place_round(&ring, theta, i, specs[i], &mut placements);
            i += 1;
            continue;
        }

        let end = specs[i..]
            .iter()
            .position(|s| !s.kind.is_flat())
            .map_or(specs.len(), |n| i + n);
        theta += place_flat_run(&ring, theta, i, &specs[i..end], &mut placements);
        i = end;
    }

    log::debug!(
        "placed {} beads on a {:.2}mm ring",
        placements.len(),
        circumference
    );
    Ok(placements)
}

/// Puts a round bead on the arc with its poles along the cord. Returns the angle consumed.
fn place_round(
    ring: &Ring,
    theta: f64,
    index: usize,
    spec: &BeadSpec,
    out: &mut Vec<SlotPlacement>,
) -> f64 {
    let step = ring.angle_of(spec.kind.along_loop_mm());
    let angle = theta + step / 2.0;
    let radial = Ring::radial(angle);
    let tangent = UP.cross(radial).normalize();

    out.push(SlotPlacement {
        index,
        bead: spec.id.clone(),
        position: ring.point_at(angle),
        basis: DMat3::from_cols(tangent.cross(radial).normalize(), tangent, radial),
        flat: false,
    });
    step
}

/// Threads a run of consecutive flat beads on the chord between the centers of its first and
/// last bead. Returns the angle consumed by the whole run.
fn place_flat_run(
    ring: &Ring,
    theta: f64,
    start: usize,
    run: &[&BeadSpec],
    out: &mut Vec<SlotPlacement>,
) -> f64 {
    let widths: Vec<f64> = run.iter().map(|s| s.kind.along_loop_mm()).collect();
    let total: f64 = widths.iter().sum();
    let step = ring.angle_of(total);

    let first_center = widths[0] / 2.0;
    let last_center = total - widths[widths.len() - 1] / 2.0;
    let angle_l = theta + ring.angle_of(first_center);
    let angle_r = theta + ring.angle_of(last_center);
    let pl = ring.point_at(angle_l);
    let chord = ring.point_at(angle_r) - pl;
    let chord_len = chord.length();

    if chord_len < MIN_CHORD_MM {
        for (k, spec) in run.iter().enumerate() {
            out.push(SlotPlacement {
                index: start + k,
                bead: spec.id.clone(),
                position: pl,
                basis: single_flat_basis(spec, angle_l),
                flat: true,
            });
        }
        return step;
    }

    let direction = chord / chord_len;
    let center = theta + step / 2.0;
    let shared = DMat3::from_cols(Ring::side(center), UP, Ring::radial(center));
    let span = (last_center - first_center).max(MIN_CHORD_MM);

    let mut acc = 0.0;
    for (k, (spec, width)) in run.iter().zip(&widths).enumerate() {
        // linear along the chord, not along the arc
        let t = (acc + width / 2.0 - first_center) / span;
        let basis = if spec.kind.is_spacer() {
            bore_along(direction)
        } else {
            shared
        };
        out.push(SlotPlacement {
            index: start + k,
            bead: spec.id.clone(),
            position: pl + direction * (t * chord_len),
            basis,
            flat: true,
        });
        acc += width;
    }

    log::trace!(
        "flat run of {} at index {}: chord {:.3}mm",
        run.len(),
        start,
        chord_len
    );
    step
}

fn single_flat_basis(spec: &BeadSpec, angle: f64) -> DMat3 {
    if spec.kind.is_spacer() {
        bore_along(Ring::tangent(angle))
    } else {
        DMat3::from_cols(Ring::side(angle), UP, Ring::radial(angle))
    }
}

/// Rotation carrying the bead's local Y (its hole) onto `direction`.
fn bore_along(direction: DVec3) -> DMat3 {
    DMat3::from_quat(DQuat::from_rotation_arc(DVec3::Y, direction))
}
