use std::io::{self, Write};

use crate::body::Planet;
use crate::dynamics::state::State;

/// Write trajectory data to CSV format.
///
/// Columns: time, x, y, altitude, vx, vy, v_surf, mass, throttle
pub fn write_trajectory<W: Write>(
    writer: &mut W,
    trajectory: &[State],
    planet: &Planet,
) -> io::Result<()> {
    writeln!(writer, "time,x,y,altitude,vx,vy,v_surf,mass,throttle")?;

    for s in trajectory {
        writeln!(
            writer,
            "{:.4},{:.2},{:.2},{:.2},{:.4},{:.4},{:.4},{:.4},{:.4}",
            s.time,
            s.x,
            s.y,
            s.altitude(planet),
            s.vx,
            s.vy,
            s.v_surf(planet),
            s.mass,
            s.throttle,
        )?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: &str, trajectory: &[State], planet: &Planet) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_trajectory(&mut file, trajectory, planet)
}
