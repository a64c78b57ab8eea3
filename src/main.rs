use std::sync::Arc;

use nalgebra::Vector2;

use ascent_sim::body::presets;
use ascent_sim::guidance::DefaultAscentPath;
use ascent_sim::io::AscentSummary;
use ascent_sim::physics::aerodynamics::QuadraticDrag;
use ascent_sim::sim::simulate_ascent;
use ascent_sim::types::{AscentContext, PartNode, SimConfig, State, G0};
use ascent_sim::vehicle::{part_map, BasicNode, PartId, SimpleEngine};

fn main() {
    // -----------------------------------------------------------------------
    // Body and collaborators
    // -----------------------------------------------------------------------
    let planet = presets::earth();
    let ascent_path = DefaultAscentPath::new(1_000.0, 55_000.0);
    let aero = QuadraticDrag {
        cd: 0.25,
        area: 3.8, // m^2 (2.2 m diameter core)
    };

    // -----------------------------------------------------------------------
    // Vessel: single core with one pressure-sensitive engine
    // -----------------------------------------------------------------------
    let engine = Arc::new(SimpleEngine::new(760_000.0, 345.0, 282.0));
    let nodes = part_map([Box::new(
        BasicNode::new(PartId(0)).engine(engine).propellant(true),
    ) as Box<dyn PartNode>]);

    let ctx = AscentContext {
        planet: &planet,
        nodes: &nodes,
        ascent_path: &ascent_path,
        aero: &aero,
    };

    // -----------------------------------------------------------------------
    // Run simulation
    // -----------------------------------------------------------------------
    let initial = State::new(&planet, 0.0, Vector2::new(0.0, 1.0))
        .with_mass(28_000.0) // kg wet
        .with_max_acceleration(3.0 * G0);
    let config = SimConfig {
        dt: 0.25,
        max_time: 180.0,
        dry_mass: 4_500.0,
    };
    let trajectory = simulate_ascent(initial, &ctx, &config);

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    let last = trajectory.last().expect("trajectory is never empty");
    let summary =
        AscentSummary::from_trajectory(&trajectory, &planet).expect("trajectory is never empty");

    println!("=== Ascent report ===");
    println!("flight time     : {:>9.1} s", summary.flight_time);
    println!("final altitude  : {:>9.1} km", last.altitude(&planet) / 1_000.0);
    println!("apogee altitude : {:>9.1} km", summary.apogee_altitude / 1_000.0);
    println!("max surface vel : {:>9.1} m/s", summary.max_speed);
    println!("max Mach        : {:>9.2}", summary.max_mach);
    println!("final mass      : {:>9.1} kg", summary.final_mass);
    println!("final throttle  : {:>9.2}", last.throttle);
}
