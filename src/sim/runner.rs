use crate::dynamics::state::{SimConfig, State};
use crate::dynamics::AscentContext;

use super::integrator::rk4_step;

// ---------------------------------------------------------------------------
// Ascent simulation loop
// ---------------------------------------------------------------------------

/// Run an ascent from `initial` until `max_time`, the vehicle burns down to
/// `dry_mass`, or it falls back onto the surface after launching.
///
/// Engine activity is refreshed exactly once per macro-step; the four RK4
/// sub-steps inside share that engine snapshot. Returns the trajectory,
/// starting with the initial state.
pub fn simulate_ascent(
    initial: State,
    ctx: &AscentContext<'_>,
    config: &SimConfig,
) -> Vec<State> {
    let mut state = initial;

    let capacity = (config.max_time / config.dt) as usize + 1;
    let mut trajectory = Vec::with_capacity(capacity.min(200_000));
    trajectory.push(state.clone());

    let mut launched = false;

    while state.time < config.max_time {
        if state.mass <= config.dry_mass {
            break;
        }

        state.update_engines(ctx);
        state = rk4_step(&state, ctx, config.dt);

        if state.altitude(ctx.planet) > 1.0 {
            launched = true;
        }

        trajectory.push(state.clone());

        // Back on the ground after flying: done. The collision correction
        // leaves the vehicle exactly on the surface, within rounding.
        if launched && state.altitude(ctx.planet) <= 0.01 {
            break;
        }
    }

    trajectory
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
