use crate::layout::UP;
use glam::DVec3;
use std::f64::consts::TAU;

/// A circle of the given circumference in the XZ plane, centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub circumference_mm: f64,
    pub radius_mm: f64,
}

impl Ring {
    pub fn new(circumference_mm: f64) -> Self {
        Self {
            circumference_mm,
            radius_mm: circumference_mm / TAU,
        }
    }

    /// Angle subtended by an arc of `mm`.
    pub fn angle_of(&self, mm: f64) -> f64 {
        mm / self.circumference_mm * TAU
    }

    pub fn radial(angle: f64) -> DVec3 {
        DVec3::new(angle.cos(), 0.0, angle.sin())
    }

    /// Direction of increasing angle.
    pub fn tangent(angle: f64) -> DVec3 {
        DVec3::new(-angle.sin(), 0.0, angle.cos())
    }

    /// Horizontal axis perpendicular to the radial, `UP x radial`.
    pub fn side(angle: f64) -> DVec3 {
        UP.cross(Self::radial(angle)).normalize()
    }

    pub fn point_at(&self, angle: f64) -> DVec3 {
        Self::radial(angle) * self.radius_mm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_and_angles() {
        let ring = Ring::new(200.0);
        assert!((ring.radius_mm - 200.0 / TAU).abs() < 1e-12);
        assert!((ring.angle_of(200.0) - TAU).abs() < 1e-12);
        assert!((ring.angle_of(50.0) - TAU / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_points_lie_on_ring() {
        let ring = Ring::new(180.0);
        for i in 0..12 {
            let angle = i as f64 * 0.5;
            let p = ring.point_at(angle);
            assert!((p.length() - ring.radius_mm).abs() < 1e-9);
            assert_eq!(p.y, 0.0);
            assert!(Ring::tangent(angle).dot(Ring::radial(angle)).abs() < 1e-12);
            assert!((Ring::side(angle) + Ring::tangent(angle)).length() < 1e-12);
        }
    }
}
