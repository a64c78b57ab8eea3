use crate::body::Planet;
use crate::dynamics::state::State;

/// Summary statistics computed from an ascent trajectory.
#[derive(Debug, Clone)]
pub struct AscentSummary {
    pub apogee_altitude: f64, // m
    pub apogee_time: f64,     // s
    pub max_speed: f64,       // m/s, surface-relative
    pub max_mach: f64,
    pub final_mass: f64,   // kg
    pub flight_time: f64,  // s
}

impl AscentSummary {
    /// Compute summary from trajectory data. `None` for an empty trajectory.
    pub fn from_trajectory(trajectory: &[State], planet: &Planet) -> Option<Self> {
        let last = trajectory.last()?;

        let apogee = trajectory
            .iter()
            .max_by(|a, b| a.r2().partial_cmp(&b.r2()).unwrap())?;

        let max_speed = trajectory
            .iter()
            .map(|s| s.v_surf(planet))
            .fold(0.0_f64, f64::max);

        let max_mach = trajectory
            .iter()
            .map(|s| s.mach_number(planet))
            .fold(0.0_f64, f64::max);

        Some(AscentSummary {
            apogee_altitude: apogee.altitude(planet),
            apogee_time: apogee.time,
            max_speed,
            max_mach,
            final_mass: last.mass,
            flight_time: last.time,
        })
    }
}
