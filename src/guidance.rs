use std::f64::consts::FRAC_PI_2;

// ---------------------------------------------------------------------------
// Ascent path: desired flight-path angle as a function of altitude
// ---------------------------------------------------------------------------

/// Ascent-path policy queried by the derivative for the thrust direction.
///
/// The returned angle is the offset from the local vertical, in radians:
/// 0 points radially outward, pi/2 is horizontal prograde.
pub trait AscentPath: Send + Sync {
    fn flight_path_angle(&self, altitude: f64) -> f64;
}

/// Gravity-turn style program:
/// - below `turn_start`: vertical ascent
/// - `turn_start` to `turn_end`: linear ramp to `final_angle`
/// - above `turn_end`: constant `final_angle`
pub struct DefaultAscentPath {
    pub turn_start: f64,  // m
    pub turn_end: f64,    // m
    pub final_angle: f64, // rad
}

impl DefaultAscentPath {
    /// Program turning all the way to horizontal at `turn_end`.
    pub fn new(turn_start: f64, turn_end: f64) -> Self {
        Self {
            turn_start,
            turn_end,
            final_angle: FRAC_PI_2,
        }
    }
}

impl AscentPath for DefaultAscentPath {
    fn flight_path_angle(&self, altitude: f64) -> f64 {
        if altitude <= self.turn_start {
            0.0
        } else if altitude >= self.turn_end {
            self.final_angle
        } else {
            let frac = (altitude - self.turn_start) / (self.turn_end - self.turn_start);
            frac * self.final_angle
        }
    }
}
