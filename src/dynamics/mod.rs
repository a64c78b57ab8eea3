pub mod state;
pub mod ascent;

use crate::body::Planet;
use crate::guidance::AscentPath;
use crate::physics::aerodynamics::AeroModel;
use crate::vehicle::part::PartMap;

pub use state::{Deriv, SimConfig, State, G0, MACH_CEILING};

// ---------------------------------------------------------------------------
// Shared collaborator context
// ---------------------------------------------------------------------------

/// Read-only collaborator bundle for derivative evaluation.
///
/// All references are non-owned and immutable: many trajectories may
/// evaluate against the same context in parallel, each owning its `State`.
pub struct AscentContext<'a> {
    pub planet: &'a Planet,
    pub nodes: &'a PartMap,
    pub ascent_path: &'a dyn AscentPath,
    pub aero: &'a dyn AeroModel,
}
