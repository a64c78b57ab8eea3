use crate::dynamics::state::G0;

// ---------------------------------------------------------------------------
// Atmosphere model interface
// ---------------------------------------------------------------------------

const R_AIR: f64 = 287.052_87; // specific gas constant for dry air, J/(kg·K)
const GAMMA: f64 = 1.4;        // ratio of specific heats

const T0: f64 = 288.15;        // sea-level temperature, K
const P0: f64 = 101_325.0;     // sea-level pressure, Pa

/// Atmospheric properties of a body, queried by altitude above the surface.
///
/// Implementations must be cheap: the derivative evaluates pressure and
/// density several times per integration sub-step.
pub trait Atmosphere: Send + Sync {
    /// Static pressure at geometric altitude, Pa.
    fn pressure(&self, altitude: f64) -> f64;

    /// Air density at geometric altitude, kg/m^3.
    fn density(&self, altitude: f64) -> f64;

    /// Speed of sound from local pressure and density, m/s. Zero in vacuum.
    fn speed_of_sound(&self, pressure: f64, density: f64) -> f64 {
        if pressure > 0.0 && density > 0.0 {
            (GAMMA * pressure / density).sqrt()
        } else {
            0.0
        }
    }
}

// ---------------------------------------------------------------------------
// ISA 1976 Standard Atmosphere (sea level to 86 km)
// ---------------------------------------------------------------------------

/// ISA 1976 standard atmosphere.
///
/// Piecewise temperature profile with 7 layers from 0-86 km.
/// Clamps negative altitudes to sea level; returns near-vacuum above 86 km.
pub struct Isa;

impl Atmosphere for Isa {
    fn pressure(&self, altitude: f64) -> f64 {
        isa_layers(altitude).1
    }

    fn density(&self, altitude: f64) -> f64 {
        let (temperature, pressure) = isa_layers(altitude);
        if temperature > 0.0 {
            pressure / (R_AIR * temperature)
        } else {
            0.0
        }
    }
}

/// Temperature and pressure for the layered profile.
fn isa_layers(altitude: f64) -> (f64, f64) {
    let h = altitude.max(0.0);

    if h < 11_000.0 {
        // Troposphere: lapse -6.5 K/km
        gradient_layer(h, 0.0, T0, -0.0065, P0)
    } else if h < 20_000.0 {
        // Tropopause: isothermal 216.65 K
        isothermal_layer(h, 11_000.0, 216.65, 22_632.1)
    } else if h < 32_000.0 {
        // Stratosphere I: lapse +1.0 K/km
        gradient_layer(h, 20_000.0, 216.65, 0.001, 5_474.89)
    } else if h < 47_000.0 {
        // Stratosphere II: lapse +2.8 K/km
        gradient_layer(h, 32_000.0, 228.65, 0.0028, 868.019)
    } else if h < 51_000.0 {
        // Mesosphere I: isothermal 270.65 K
        isothermal_layer(h, 47_000.0, 270.65, 110.906)
    } else if h < 71_000.0 {
        // Mesosphere II: lapse -2.8 K/km
        gradient_layer(h, 51_000.0, 270.65, -0.0028, 66.9389)
    } else if h < 86_000.0 {
        // Mesosphere III: lapse -2.0 K/km
        gradient_layer(h, 71_000.0, 214.65, -0.002, 3.956_42)
    } else {
        // Above 86 km: exponential decay approximation
        let t = 186.87;
        let p = 0.3734 * (-0.000_15 * (h - 86_000.0)).exp();
        (t, p.max(0.0))
    }
}

/// Gradient layer: T = T_base + lapse * (h - h_base)
fn gradient_layer(h: f64, h_base: f64, t_base: f64, lapse: f64, p_base: f64) -> (f64, f64) {
    let t = t_base + lapse * (h - h_base);
    let p = p_base * (t / t_base).powf(-G0 / (lapse * R_AIR));
    (t, p)
}

/// Isothermal layer: T = const, pressure decays exponentially
fn isothermal_layer(h: f64, h_base: f64, t: f64, p_base: f64) -> (f64, f64) {
    let p = p_base * ((-G0 / (R_AIR * t)) * (h - h_base)).exp();
    (t, p)
}

// ---------------------------------------------------------------------------
// Scale-height atmosphere for bodies without tabulated profiles
// ---------------------------------------------------------------------------

/// Exponential atmosphere: pressure and density both decay with a single
/// scale height, hard vacuum above `cutoff`.
pub struct Exponential {
    pub sea_level_pressure: f64, // Pa
    pub sea_level_density: f64,  // kg/m^3
    pub scale_height: f64,       // m
    pub cutoff: f64,             // m, treated as vacuum above this altitude
}

impl Atmosphere for Exponential {
    fn pressure(&self, altitude: f64) -> f64 {
        if altitude >= self.cutoff {
            return 0.0;
        }
        self.sea_level_pressure * (-altitude.max(0.0) / self.scale_height).exp()
    }

    fn density(&self, altitude: f64) -> f64 {
        if altitude >= self.cutoff {
            return 0.0;
        }
        self.sea_level_density * (-altitude.max(0.0) / self.scale_height).exp()
    }
}

/// No atmosphere at any altitude.
pub struct Airless;

impl Atmosphere for Airless {
    fn pressure(&self, _altitude: f64) -> f64 {
        0.0
    }

    fn density(&self, _altitude: f64) -> f64 {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
