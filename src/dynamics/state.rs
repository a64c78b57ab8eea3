use nalgebra::Vector2;

use crate::body::Planet;
use crate::vehicle::engine::ActiveEngine;

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G0: f64 = 9.80665;

/// Ceiling applied to the computed Mach number so thrust/drag curve lookups
/// stay inside their tabulated ranges at extreme speed.
pub const MACH_CEILING: f64 = 25.0;

// ---------------------------------------------------------------------------
// Planar ascent state: position, velocity, mass, throttle, engine cache
// ---------------------------------------------------------------------------

/// State of a vehicle ascending in the 2D plane of its trajectory, origin at
/// the body center.
///
/// Advancing a step never mutates the receiver: `increment` returns a new
/// snapshot, so several trajectories can branch from a shared state. The
/// only in-place mutations are the throttle cache written by `derivative`
/// and the engine cache written by `update_engines`.
#[derive(Clone)]
pub struct State {
    pub time: f64,
    pub x: f64,  // m, inertial
    pub y: f64,  // m, inertial
    pub vx: f64, // m/s
    pub vy: f64, // m/s
    pub mass: f64, // kg, must stay positive while derivatives are evaluated
    /// Commanded throttle in [0, 1]; rewritten by every `derivative` call.
    pub throttle: f64,
    /// Target acceleration the throttle law tracks, m/s^2.
    pub max_acceleration: f64,
    /// Reference heading context.
    pub forward: Vector2<f64>,
    // Aggregate thrust bounds for the active engine set, refreshed only by
    // `update_engines`.
    pub(crate) min_thrust: f64,
    pub(crate) max_thrust: f64,
    pub(crate) active_engines: Vec<ActiveEngine>,
}

impl State {
    /// Initial state at `departure_altitude` above the surface, at rest
    /// relative to the (possibly rotating) ground.
    ///
    /// `mass` and `max_acceleration` start at zero; set them with
    /// `with_mass` / `with_max_acceleration` before the first derivative.
    pub fn new(planet: &Planet, departure_altitude: f64, forward: Vector2<f64>) -> State {
        let y = planet.radius + departure_altitude;
        State {
            time: 0.0,
            x: 0.0,
            y,
            vx: y * planet.angular_velocity(),
            vy: 0.0,
            mass: 0.0,
            throttle: 1.0,
            max_acceleration: 0.0,
            forward,
            min_thrust: 0.0,
            max_thrust: 0.0,
            active_engines: Vec::new(),
        }
    }

    pub fn with_mass(mut self, mass: f64) -> State {
        self.mass = mass;
        self
    }

    pub fn with_max_acceleration(mut self, accel: f64) -> State {
        self.max_acceleration = accel;
        self
    }

    // -- Derived kinematic quantities -------------------------------------

    pub fn r(&self) -> f64 {
        self.r2().sqrt()
    }

    /// Squared radius; kept so the surface-collision test needs no sqrt.
    pub fn r2(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub(crate) fn u_x(&self) -> f64 {
        self.x / self.r()
    }

    pub(crate) fn u_y(&self) -> f64 {
        self.y / self.r()
    }

    pub fn altitude(&self, planet: &Planet) -> f64 {
        self.r() - planet.radius
    }

    /// Velocity relative to the rotating surface, x component.
    pub fn v_surf_x(&self, planet: &Planet) -> f64 {
        self.vx - self.u_y() * planet.angular_velocity() * self.r()
    }

    /// Velocity relative to the rotating surface, y component.
    pub fn v_surf_y(&self, planet: &Planet) -> f64 {
        self.vy + self.u_x() * planet.angular_velocity() * self.r()
    }

    pub fn v_surf(&self, planet: &Planet) -> f64 {
        let (sx, sy) = (self.v_surf_x(planet), self.v_surf_y(planet));
        (sx * sx + sy * sy).sqrt()
    }

    pub fn pressure(&self, planet: &Planet) -> f64 {
        planet.atmosphere.pressure(self.altitude(planet))
    }

    pub fn atm_density(&self, planet: &Planet) -> f64 {
        planet.atmosphere.density(self.altitude(planet))
    }

    /// Surface-relative Mach number, clamped to `MACH_CEILING`.
    ///
    /// In vacuum there is no meaningful Mach number: a moving vehicle
    /// reports the ceiling (curve lookups stay in range), one at rest
    /// reports zero.
    pub fn mach_number(&self, planet: &Planet) -> f64 {
        let pressure = self.pressure(planet);
        let density = self.atm_density(planet);
        let sound = planet.atmosphere.speed_of_sound(pressure, density);
        let v_surf = self.v_surf(planet);
        if sound <= 0.0 {
            if v_surf == 0.0 {
                0.0
            } else {
                MACH_CEILING
            }
        } else {
            (v_surf / sound).min(MACH_CEILING)
        }
    }

    /// Aggregate thrust at throttle 0 and 1 for the cached engine set.
    pub fn thrust_bounds(&self) -> (f64, f64) {
        (self.min_thrust, self.max_thrust)
    }

    // -- Step advance ------------------------------------------------------

    /// New snapshot advanced by `dt` times the derivative. The receiver is
    /// left untouched.
    ///
    /// If the update lands at or below the surface, the position is
    /// projected radially back onto it and the velocity reset to the
    /// ground's rigid rotation: the vehicle rests on the surface instead of
    /// tunneling through or keeping an inward velocity.
    pub fn increment(&self, d: &Deriv, dt: f64, planet: &Planet) -> State {
        let mut res = self.clone();
        res.time += dt;
        res.x += dt * d.vx;
        res.y += dt * d.vy;
        res.vx += dt * d.ax;
        res.vy += dt * d.ay;
        res.mass += dt * d.dm;
        if res.r2() <= planet.radius * planet.radius {
            let r = res.r();
            res.x *= planet.radius / r;
            res.y *= planet.radius / r;
            let omega = planet.angular_velocity();
            res.vx = res.y * omega;
            res.vy = -res.x * omega;
        }
        res
    }
}

// ---------------------------------------------------------------------------
// State derivative
// ---------------------------------------------------------------------------

/// Instantaneous derivative of a `State`, produced by `State::derivative`
/// and consumed within a single integration sub-step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deriv {
    pub vx: f64,
    pub vy: f64,
    pub ax: f64,
    pub ay: f64,
    pub dm: f64, // kg/s, negative under thrust
    /// Acceleration without the gravity term, kept for diagnostics/plots.
    pub ax_nograv: f64,
    pub ay_nograv: f64,
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub dt: f64,       // s, macro-step; engine activity refreshes at this rate
    pub max_time: f64, // s
    /// Terminal mass: the run stops once the vehicle burns down to this.
    /// Keep above zero for powered vehicles so mass never reaches zero.
    pub dry_mass: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            max_time: 600.0,
            dry_mass: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
