use std::sync::Arc;

use nalgebra::Vector2;

use crate::dynamics::state::{Deriv, State};
use crate::dynamics::AscentContext;
use crate::physics::gravity;
use crate::vehicle::engine::ActiveEngine;
use crate::vehicle::part::PartId;

// ---------------------------------------------------------------------------
// Engine aggregation and the ascent derivative
// ---------------------------------------------------------------------------

impl State {
    /// Rescan the part graph for active engines and refresh the aggregate
    /// throttle-0/throttle-1 thrust bounds at the current operating point.
    ///
    /// Call before the first `derivative` and after anything that may have
    /// changed the active engine set (e.g. a staging event). `derivative`
    /// deliberately never rescans: one refresh serves a whole macro-step.
    ///
    /// Returns the parts found active, for collaborators (staging/visual
    /// feedback).
    pub fn update_engines(&mut self, ctx: &AscentContext<'_>) -> Vec<PartId> {
        let pressure = self.pressure(ctx.planet);
        let mach = self.mach_number(ctx.planet);
        let density = self.atm_density(ctx.planet);

        let mut active_parts = Vec::new();
        self.active_engines.clear();
        for node in ctx.nodes.values() {
            if node.is_active_engine(ctx.nodes) && !node.is_separatron() {
                for engine in node.engines() {
                    self.active_engines.push(ActiveEngine {
                        part: node.part(),
                        engine: Arc::clone(engine),
                    });
                }
                active_parts.push(node.part());
            }
        }
        self.min_thrust = self
            .active_engines
            .iter()
            .map(|e| e.thrust(0.0, pressure, mach, density))
            .sum();
        self.max_thrust = self
            .active_engines
            .iter()
            .map(|e| e.thrust(1.0, pressure, mach, density))
            .sum();
        active_parts
    }

    /// Instantaneous derivative of the ascent state.
    ///
    /// Couples gravity, drag, the throttle control law, engine thrust, and
    /// mass depletion. Takes `&mut self` only to store the resolved
    /// throttle; everything else is a pure function of the current state
    /// and context.
    pub fn derivative(&mut self, ctx: &AscentContext<'_>) -> Deriv {
        let mut res = Deriv {
            vx: self.vx,
            vy: self.vy,
            ..Deriv::default()
        };

        let r = self.r();
        let altitude = r - ctx.planet.radius;

        // Thrust points along the radial direction rotated by the commanded
        // flight-path angle.
        let theta = self.u_x().atan2(self.u_y());
        let thrust_direction = theta + ctx.ascent_path.flight_path_angle(altitude);

        let grav_acc = gravity::radial_accel(ctx.planet.grav_parameter, r);

        // Drag magnitude; its direction (opposite the surface-relative
        // velocity) is resolved below.
        let v_surf = self.v_surf(ctx.planet);
        let drag_force =
            ctx.aero
                .drag_force(ctx.nodes, ctx.planet, Vector2::new(0.0, v_surf), altitude);
        let drag_acc = drag_force.norm() / self.mass;

        // Throttle tracking the requested acceleration, linearized between
        // the cached zero/full-throttle bounds. Coincident bounds leave no
        // controllable range: full throttle.
        let desired_thrust = self.max_acceleration * self.mass;
        self.throttle = if self.max_thrust != self.min_thrust {
            (desired_thrust - self.min_thrust) / (self.max_thrust - self.min_thrust)
        } else {
            1.0
        };
        self.throttle = self.throttle.clamp(0.0, 1.0);

        let pressure = self.pressure(ctx.planet);
        let mach = self.mach_number(ctx.planet);
        let density = self.atm_density(ctx.planet);

        let thrust: f64 = self
            .active_engines
            .iter()
            .map(|e| e.thrust(self.throttle, pressure, mach, density))
            .sum();

        res.dm = -self
            .active_engines
            .iter()
            .map(|e| e.fuel_flow(density, mach, self.throttle))
            .sum::<f64>();

        res.ax_nograv = thrust / self.mass * thrust_direction.sin();
        res.ay_nograv = thrust / self.mass * thrust_direction.cos();
        if v_surf != 0.0 {
            res.ax_nograv -= drag_acc * self.v_surf_x(ctx.planet) / v_surf;
            res.ay_nograv -= drag_acc * self.v_surf_y(ctx.planet) / v_surf;
        }
        res.ax = res.ax_nograv + grav_acc * self.u_x();
        res.ay = res.ay_nograv + grav_acc * self.u_y();

        res
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Planet;
    use crate::guidance::{AscentPath, DefaultAscentPath};
    use crate::physics::aerodynamics::QuadraticDrag;
    use crate::physics::atmosphere::{Airless, Exponential};
    use crate::vehicle::engine::{Engine, SimpleEngine};
    use crate::vehicle::part::{part_map, BasicNode, PartMap, PartNode};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    /// Engine that ignores its throttle entirely (solid-motor-like).
    struct ConstantEngine {
        thrust: f64,
    }

    impl Engine for ConstantEngine {
        fn thrust(&self, _throttle: f64, _pressure: f64, _mach: f64, _density: f64) -> f64 {
            self.thrust
        }

        fn fuel_flow(&self, _density: f64, _mach: f64, _throttle: f64) -> f64 {
            self.thrust / (200.0 * crate::dynamics::state::G0)
        }
    }

    fn moon() -> Planet {
        Planet::new(600_000.0, 3.531_6e12, None, Arc::new(Airless)).unwrap()
    }

    fn thick_air() -> Planet {
        let atm = Exponential {
            sea_level_pressure: 101_325.0,
            sea_level_density: 1.225,
            scale_height: 8_500.0,
            cutoff: 100_000.0,
        };
        Planet::new(600_000.0, 3.531_6e12, None, Arc::new(atm)).unwrap()
    }

    fn one_engine_vessel(max_thrust: f64) -> PartMap {
        part_map([Box::new(
            BasicNode::new(PartId(0))
                .engine(Arc::new(SimpleEngine::new(max_thrust, 300.0, 300.0)))
                .propellant(true),
        ) as Box<dyn PartNode>])
    }

    fn ctx<'a>(
        planet: &'a Planet,
        nodes: &'a PartMap,
        path: &'a dyn AscentPath,
        aero: &'a QuadraticDrag,
    ) -> AscentContext<'a> {
        AscentContext {
            planet,
            nodes,
            ascent_path: path,
            aero,
        }
    }

    fn vertical() -> DefaultAscentPath {
        DefaultAscentPath::new(f64::MAX, f64::MAX)
    }

    fn no_drag() -> QuadraticDrag {
        QuadraticDrag { cd: 0.0, area: 0.0 }
    }

    #[test]
    fn resolves_half_throttle_for_midrange_demand() {
        // Body radius 600 km, departure altitude 0, engine bounds 0..1000 N,
        // desired thrust 500 N.
        let planet = moon();
        let nodes = one_engine_vessel(1_000.0);
        let path = vertical();
        let aero = no_drag();
        let ctx = ctx(&planet, &nodes, &path, &aero);

        let mass = 50.0;
        let mut state = State::new(&planet, 0.0, Vector2::new(0.0, 1.0))
            .with_mass(mass)
            .with_max_acceleration(500.0 / mass);
        let active = state.update_engines(&ctx);
        assert_eq!(active, vec![PartId(0)]);
        assert_eq!(state.thrust_bounds(), (0.0, 1_000.0));

        state.derivative(&ctx);
        assert_relative_eq!(state.throttle, 0.5);
    }

    #[test]
    fn throttle_clamps_at_both_ends() {
        let planet = moon();
        let nodes = one_engine_vessel(1_000.0);
        let path = vertical();
        let aero = no_drag();
        let ctx = ctx(&planet, &nodes, &path, &aero);

        let mut state = State::new(&planet, 0.0, Vector2::new(0.0, 1.0))
            .with_mass(50.0)
            .with_max_acceleration(1e6);
        state.update_engines(&ctx);
        state.derivative(&ctx);
        assert_eq!(state.throttle, 1.0);

        state.max_acceleration = -100.0;
        state.derivative(&ctx);
        assert_eq!(state.throttle, 0.0);
    }

    #[test]
    fn coincident_thrust_bounds_force_full_throttle() {
        let planet = moon();
        let nodes = part_map([Box::new(
            BasicNode::new(PartId(0))
                .engine(Arc::new(ConstantEngine { thrust: 800.0 }))
                .propellant(true),
        ) as Box<dyn PartNode>]);
        let path = vertical();
        let aero = no_drag();
        let ctx = ctx(&planet, &nodes, &path, &aero);

        let mut state = State::new(&planet, 0.0, Vector2::new(0.0, 1.0))
            .with_mass(50.0)
            .with_max_acceleration(0.0);
        state.update_engines(&ctx);
        assert_eq!(state.thrust_bounds(), (800.0, 800.0));

        state.derivative(&ctx);
        assert_eq!(state.throttle, 1.0);
    }

    #[test]
    fn no_drag_term_at_zero_surface_velocity() {
        // Dense atmosphere, vehicle at rest relative to the ground, engines
        // off: the no-gravity acceleration must be identically zero, not
        // merely small.
        let planet = thick_air();
        let nodes = PartMap::new();
        let path = vertical();
        let aero = QuadraticDrag { cd: 1.0, area: 10.0 };
        let ctx = ctx(&planet, &nodes, &path, &aero);

        let mut state = State::new(&planet, 0.0, Vector2::new(0.0, 1.0)).with_mass(1_000.0);
        state.update_engines(&ctx);
        let d = state.derivative(&ctx);
        assert_eq!(d.ax_nograv, 0.0);
        assert_eq!(d.ay_nograv, 0.0);
    }

    #[test]
    fn drag_opposes_surface_velocity() {
        let planet = thick_air();
        let nodes = PartMap::new();
        let path = vertical();
        let aero = QuadraticDrag { cd: 0.5, area: 2.0 };
        let ctx = ctx(&planet, &nodes, &path, &aero);

        let mut state = State::new(&planet, 1_000.0, Vector2::new(0.0, 1.0)).with_mass(1_000.0);
        state.vy = 200.0; // climbing
        state.update_engines(&ctx);
        let d = state.derivative(&ctx);
        assert!(d.ay_nograv < 0.0, "drag should pull down, got {}", d.ay_nograv);
        assert_eq!(d.ax_nograv, 0.0);
    }

    #[test]
    fn velocity_passes_through() {
        let planet = moon();
        let nodes = PartMap::new();
        let path = vertical();
        let aero = no_drag();
        let ctx = ctx(&planet, &nodes, &path, &aero);

        let mut state = State::new(&planet, 70_000.0, Vector2::new(0.0, 1.0)).with_mass(500.0);
        state.vx = 1_234.0;
        state.vy = -56.0;
        let d = state.derivative(&ctx);
        assert_eq!(d.vx, 1_234.0);
        assert_eq!(d.vy, -56.0);
    }

    #[test]
    fn gravity_only_on_unpowered_state() {
        let planet = moon();
        let nodes = PartMap::new();
        let path = vertical();
        let aero = no_drag();
        let ctx = ctx(&planet, &nodes, &path, &aero);

        let alt = 100_000.0;
        let mut state = State::new(&planet, alt, Vector2::new(0.0, 1.0)).with_mass(500.0);
        let d = state.derivative(&ctx);

        let r = planet.radius + alt;
        let g = planet.grav_parameter / (r * r);
        assert_eq!(d.ax_nograv, 0.0);
        assert_eq!(d.ay_nograv, 0.0);
        assert_relative_eq!(d.ay, -g, max_relative = 1e-12);
        assert_relative_eq!(d.ax, 0.0, epsilon = 1e-15);
        assert_eq!(d.dm, 0.0);
    }

    #[test]
    fn thrust_follows_the_flight_path_angle() {
        let planet = moon();
        let nodes = one_engine_vessel(10_000.0);
        // Constant 45 degree command at any altitude.
        struct FortyFive;
        impl AscentPath for FortyFive {
            fn flight_path_angle(&self, _altitude: f64) -> f64 {
                std::f64::consts::FRAC_PI_4
            }
        }
        let path = FortyFive;
        let aero = no_drag();
        let ctx = ctx(&planet, &nodes, &path, &aero);

        let mass = 100.0;
        let mut state = State::new(&planet, 0.0, Vector2::new(0.0, 1.0))
            .with_mass(mass)
            .with_max_acceleration(10_000.0 / mass); // full throttle
        state.update_engines(&ctx);
        let d = state.derivative(&ctx);

        // Straight up from (0, r): theta = 0, so the thrust splits evenly
        // between x and y.
        assert_relative_eq!(d.ax_nograv, d.ay_nograv, max_relative = 1e-12);
        assert!(d.ax_nograv > 0.0);
    }

    #[test]
    fn mass_flow_is_negative_under_thrust() {
        let planet = moon();
        let nodes = one_engine_vessel(5_000.0);
        let path = vertical();
        let aero = no_drag();
        let ctx = ctx(&planet, &nodes, &path, &aero);

        let mut state = State::new(&planet, 0.0, Vector2::new(0.0, 1.0))
            .with_mass(200.0)
            .with_max_acceleration(20.0);
        state.update_engines(&ctx);
        let d = state.derivative(&ctx);
        assert!(d.dm < 0.0);

        let next = state.increment(&d, 2.0, &planet);
        assert_relative_eq!(next.mass, state.mass + 2.0 * d.dm);
        assert!(next.mass < state.mass);
    }

    #[test]
    fn update_engines_skips_separatrons_and_dry_nodes() {
        let planet = moon();
        let nodes = part_map([
            Box::new(
                BasicNode::new(PartId(0))
                    .engine(Arc::new(SimpleEngine::new(1_000.0, 300.0, 300.0)))
                    .propellant(true),
            ) as Box<dyn PartNode>,
            Box::new(
                BasicNode::new(PartId(1))
                    .engine(Arc::new(SimpleEngine::new(400.0, 250.0, 250.0)))
                    .propellant(true)
                    .separatron(true),
            ),
            Box::new(
                BasicNode::new(PartId(2))
                    .engine(Arc::new(SimpleEngine::new(700.0, 300.0, 300.0)))
                    .propellant(false),
            ),
        ]);
        let path = vertical();
        let aero = no_drag();
        let ctx = ctx(&planet, &nodes, &path, &aero);

        let mut state = State::new(&planet, 0.0, Vector2::new(0.0, 1.0)).with_mass(100.0);
        let active = state.update_engines(&ctx);
        assert_eq!(active, vec![PartId(0)]);
        assert_eq!(state.thrust_bounds(), (0.0, 1_000.0));
    }

    #[test]
    fn update_engines_replaces_previous_scan() {
        let planet = moon();
        let path = vertical();
        let aero = no_drag();

        let two = part_map([
            Box::new(
                BasicNode::new(PartId(0))
                    .engine(Arc::new(SimpleEngine::new(1_000.0, 300.0, 300.0)))
                    .propellant(true),
            ) as Box<dyn PartNode>,
            Box::new(
                BasicNode::new(PartId(1))
                    .engine(Arc::new(SimpleEngine::new(500.0, 300.0, 300.0)))
                    .propellant(true),
            ),
        ]);
        let one = part_map([Box::new(
            BasicNode::new(PartId(1))
                .engine(Arc::new(SimpleEngine::new(500.0, 300.0, 300.0)))
                .propellant(true),
        ) as Box<dyn PartNode>]);

        let mut state = State::new(&planet, 0.0, Vector2::new(0.0, 1.0)).with_mass(100.0);
        state.update_engines(&ctx(&planet, &two, &path, &aero));
        assert_eq!(state.thrust_bounds(), (0.0, 1_500.0));

        // After a staging-like change the old engine set is gone.
        state.update_engines(&ctx(&planet, &one, &path, &aero));
        assert_eq!(state.thrust_bounds(), (0.0, 500.0));
    }

    proptest! {
        #[test]
        fn throttle_always_lands_in_unit_interval(
            max_accel in -100.0f64..100.0,
            mass in 1.0f64..10_000.0,
            max_thrust in 1.0f64..1e6,
        ) {
            let planet = moon();
            let nodes = one_engine_vessel(max_thrust);
            let path = vertical();
            let aero = no_drag();
            let ctx = ctx(&planet, &nodes, &path, &aero);

            let mut state = State::new(&planet, 0.0, Vector2::new(0.0, 1.0))
                .with_mass(mass)
                .with_max_acceleration(max_accel);
            state.update_engines(&ctx);
            state.derivative(&ctx);
            prop_assert!((0.0..=1.0).contains(&state.throttle));
        }

        #[test]
        fn mach_never_exceeds_ceiling(speed in 0.0f64..1e6, alt in 0.0f64..90_000.0) {
            let planet = thick_air();
            let mut state = State::new(&planet, alt, Vector2::new(0.0, 1.0)).with_mass(1.0);
            state.vx = speed;
            prop_assert!(state.mach_number(&planet) <= crate::dynamics::state::MACH_CEILING);
        }
    }
}
