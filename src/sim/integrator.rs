use crate::dynamics::state::{Deriv, State};
use crate::dynamics::AscentContext;

// ---------------------------------------------------------------------------
// Classical RK4 over the ascent derivative
// ---------------------------------------------------------------------------

/// Single RK4 step.
///
/// Engine activity is not refreshed here: callers refresh once per macro
/// step (`State::update_engines`) and all four evaluations run against that
/// stable engine set. The surface-collision correction applies on every
/// sub-step advance and on the final combination.
pub fn rk4_step(state: &State, ctx: &AscentContext<'_>, dt: f64) -> State {
    let mut s1 = state.clone();
    let k1 = s1.derivative(ctx);
    let mut s2 = s1.increment(&k1, dt * 0.5, ctx.planet);
    let k2 = s2.derivative(ctx);
    let mut s3 = s1.increment(&k2, dt * 0.5, ctx.planet);
    let k3 = s3.derivative(ctx);
    let mut s4 = s1.increment(&k3, dt, ctx.planet);
    let k4 = s4.derivative(ctx);

    let combined = Deriv {
        vx: (k1.vx + 2.0 * k2.vx + 2.0 * k3.vx + k4.vx) / 6.0,
        vy: (k1.vy + 2.0 * k2.vy + 2.0 * k3.vy + k4.vy) / 6.0,
        ax: (k1.ax + 2.0 * k2.ax + 2.0 * k3.ax + k4.ax) / 6.0,
        ay: (k1.ay + 2.0 * k2.ay + 2.0 * k3.ay + k4.ay) / 6.0,
        dm: (k1.dm + 2.0 * k2.dm + 2.0 * k3.dm + k4.dm) / 6.0,
        ax_nograv: (k1.ax_nograv + 2.0 * k2.ax_nograv + 2.0 * k3.ax_nograv + k4.ax_nograv) / 6.0,
        ay_nograv: (k1.ay_nograv + 2.0 * k2.ay_nograv + 2.0 * k3.ay_nograv + k4.ay_nograv) / 6.0,
    };
    s1.increment(&combined, dt, ctx.planet)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
