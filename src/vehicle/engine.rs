use std::sync::Arc;

use crate::dynamics::state::G0;
use crate::vehicle::part::PartId;

// ---------------------------------------------------------------------------
// Engine capability interface
// ---------------------------------------------------------------------------

const P_STD: f64 = 101_325.0; // one standard atmosphere, Pa

/// One engine unit.
///
/// Implementations evaluate the engine's thrust and fuel-flow curves at an
/// operating point; the ascent core only ever talks to this trait.
pub trait Engine: Send + Sync {
    /// Thrust in N at the given throttle fraction, static pressure (Pa),
    /// Mach number, and air density (kg/m^3).
    fn thrust(&self, throttle: f64, pressure: f64, mach: f64, density: f64) -> f64;

    /// Propellant mass flow in kg/s at the given operating point.
    fn fuel_flow(&self, density: f64, mach: f64, throttle: f64) -> f64;
}

/// An engine unit found active by a part-graph scan, tagged with the part
/// that feeds it.
#[derive(Clone)]
pub struct ActiveEngine {
    pub part: PartId,
    pub engine: Arc<dyn Engine>,
}

impl ActiveEngine {
    pub fn thrust(&self, throttle: f64, pressure: f64, mach: f64, density: f64) -> f64 {
        self.engine.thrust(throttle, pressure, mach, density)
    }

    pub fn fuel_flow(&self, density: f64, mach: f64, throttle: f64) -> f64 {
        self.engine.fuel_flow(density, mach, throttle)
    }
}

// ---------------------------------------------------------------------------
// Stock engine: linear thrust curve, pressure-dependent Isp
// ---------------------------------------------------------------------------

/// Throttleable engine with thrust linear in throttle and specific impulse
/// interpolated between sea level and vacuum with ambient pressure.
pub struct SimpleEngine {
    pub max_thrust: f64, // N, full throttle in vacuum
    pub isp_vac: f64,    // s
    pub isp_sl: f64,     // s, at one standard atmosphere
}

impl SimpleEngine {
    pub fn new(max_thrust: f64, isp_vac: f64, isp_sl: f64) -> Self {
        Self {
            max_thrust,
            isp_vac,
            isp_sl,
        }
    }

    fn isp(&self, pressure: f64) -> f64 {
        let frac = (pressure / P_STD).clamp(0.0, 1.0);
        self.isp_vac + frac * (self.isp_sl - self.isp_vac)
    }
}

impl Engine for SimpleEngine {
    fn thrust(&self, throttle: f64, pressure: f64, _mach: f64, _density: f64) -> f64 {
        // Fuel flow is fixed by the vacuum operating point, so atmospheric
        // thrust scales with the Isp ratio.
        throttle.clamp(0.0, 1.0) * self.max_thrust * self.isp(pressure) / self.isp_vac
    }

    fn fuel_flow(&self, _density: f64, _mach: f64, throttle: f64) -> f64 {
        throttle.clamp(0.0, 1.0) * self.max_thrust / (self.isp_vac * G0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
