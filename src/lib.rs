pub mod body;
pub mod physics;
pub mod vehicle;
pub mod guidance;
pub mod dynamics;
pub mod sim;
pub mod io;

// Convenience re-exports
pub mod integrator {
    pub use crate::sim::integrator::rk4_step;
    pub use crate::sim::runner::simulate_ascent;
}

pub mod types {
    pub use crate::body::{BodyError, Planet};
    pub use crate::dynamics::state::{Deriv, SimConfig, State, G0, MACH_CEILING};
    pub use crate::dynamics::AscentContext;
    pub use crate::guidance::{AscentPath, DefaultAscentPath};
    pub use crate::physics::aerodynamics::{AeroModel, QuadraticDrag};
    pub use crate::physics::atmosphere::{Airless, Atmosphere, Exponential, Isa};
    pub use crate::vehicle::engine::{ActiveEngine, Engine, SimpleEngine};
    pub use crate::vehicle::part::{part_map, BasicNode, PartId, PartMap, PartNode};
}
