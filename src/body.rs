use std::f64::consts::TAU;
use std::sync::Arc;

use thiserror::Error;

use crate::physics::atmosphere::{Atmosphere, Isa};

// ---------------------------------------------------------------------------
// Celestial body: shared, read-only context for a trajectory simulation
// ---------------------------------------------------------------------------

pub const EARTH_RADIUS: f64 = 6_371_000.0;      // m
pub const MU_EARTH: f64 = 3.986_004_418e14;     // m^3/s^2
pub const EARTH_SIDEREAL_DAY: f64 = 86_164.0905; // s

/// The body a vehicle ascends from.
///
/// Shared immutable context: many trajectories (e.g. a parameter sweep) may
/// hold references to the same `Planet` concurrently. Never mutated after
/// construction.
#[derive(Clone)]
pub struct Planet {
    pub radius: f64,          // m
    pub grav_parameter: f64,  // m^3/s^2 (GM)
    pub rotates: bool,
    pub rotation_period: f64, // s, sidereal; ignored when `rotates` is false
    pub atmosphere: Arc<dyn Atmosphere>,
}

#[derive(Debug, Error)]
pub enum BodyError {
    #[error("body radius must be positive, got {0}")]
    Radius(f64),
    #[error("gravitational parameter must be positive, got {0}")]
    GravParameter(f64),
    #[error("rotation period must be positive, got {0}")]
    RotationPeriod(f64),
}

impl Planet {
    /// Validated constructor. `rotation_period` of `None` means a
    /// non-rotating body.
    pub fn new(
        radius: f64,
        grav_parameter: f64,
        rotation_period: Option<f64>,
        atmosphere: Arc<dyn Atmosphere>,
    ) -> Result<Self, BodyError> {
        if radius <= 0.0 {
            return Err(BodyError::Radius(radius));
        }
        if grav_parameter <= 0.0 {
            return Err(BodyError::GravParameter(grav_parameter));
        }
        if let Some(period) = rotation_period {
            if period <= 0.0 {
                return Err(BodyError::RotationPeriod(period));
            }
        }
        Ok(Planet {
            radius,
            grav_parameter,
            rotates: rotation_period.is_some(),
            rotation_period: rotation_period.unwrap_or(0.0),
            atmosphere,
        })
    }

    /// Angular velocity of the body's rotation, rad/s. Zero when the body
    /// does not rotate.
    pub fn angular_velocity(&self) -> f64 {
        if self.rotates {
            TAU / self.rotation_period
        } else {
            0.0
        }
    }
}

// ---------------------------------------------------------------------------
// Preset bodies
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Earth with the layered standard atmosphere.
    pub fn earth() -> Planet {
        Planet {
            radius: EARTH_RADIUS,
            grav_parameter: MU_EARTH,
            rotates: true,
            rotation_period: EARTH_SIDEREAL_DAY,
            atmosphere: Arc::new(Isa),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
