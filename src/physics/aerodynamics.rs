use nalgebra::Vector2;

use crate::body::Planet;
use crate::vehicle::part::PartMap;

// ---------------------------------------------------------------------------
// Aerodynamic force model interface
// ---------------------------------------------------------------------------

/// Whole-vehicle aerodynamic force model.
///
/// `velocity` is surface-relative; the returned force is in the same frame.
/// The ascent derivative uses the magnitude and applies it opposite the
/// surface-relative velocity.
pub trait AeroModel: Send + Sync {
    fn drag_force(
        &self,
        parts: &PartMap,
        planet: &Planet,
        velocity: Vector2<f64>,
        altitude: f64,
    ) -> Vector2<f64>;
}

/// Quadratic drag with a fixed drag coefficient and reference area:
/// 0.5 * rho * v^2 * Cd * A, opposing velocity. Ignores the part list.
pub struct QuadraticDrag {
    pub cd: f64,
    pub area: f64, // m^2
}

impl AeroModel for QuadraticDrag {
    fn drag_force(
        &self,
        _parts: &PartMap,
        planet: &Planet,
        velocity: Vector2<f64>,
        altitude: f64,
    ) -> Vector2<f64> {
        let speed = velocity.norm();
        if speed > 1e-6 {
            let density = planet.atmosphere.density(altitude);
            let q_dyn = 0.5 * density * speed * speed;
            -velocity.normalize() * (q_dyn * self.cd * self.area)
        } else {
            Vector2::zeros()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
