// ---------------------------------------------------------------------------
// Inverse-square gravity
// ---------------------------------------------------------------------------

/// Radial gravitational acceleration at distance `r` from the body center,
/// m/s^2. Negative: directed toward the center along the outward radial.
pub fn radial_accel(grav_parameter: f64, r: f64) -> f64 {
    -grav_parameter / (r * r)
}

/// Surface gravity magnitude of a body, m/s^2.
pub fn surface_gravity(grav_parameter: f64, radius: f64) -> f64 {
    grav_parameter / (radius * radius)
}
