use std::collections::BTreeMap;
use std::sync::Arc;

use crate::vehicle::engine::Engine;

// ---------------------------------------------------------------------------
// Vessel part graph
// ---------------------------------------------------------------------------

/// Identifier of a structural part in the vessel graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartId(pub u32);

/// The vessel's part graph: one node per structural part. A `BTreeMap` so
/// engine scans visit nodes in part-id order, deterministically.
pub type PartMap = BTreeMap<PartId, Box<dyn PartNode>>;

/// Capability interface for one node of the vessel part graph.
///
/// Anything engine-like implements this trait and is queried through the
/// explicit `PartMap` collection.
pub trait PartNode: Send + Sync {
    /// Part this node belongs to.
    fn part(&self) -> PartId;

    /// Separatron-class motors never count as controllable ascent engines.
    fn is_separatron(&self) -> bool;

    /// Whether this node holds usable propellant of its own.
    fn has_propellant(&self) -> bool;

    /// Engine-activity predicate: true when this node's engines can fire
    /// given propellant feed availability across `graph`.
    fn is_active_engine(&self, graph: &PartMap) -> bool;

    /// Concrete engine units mounted on this node's part.
    fn engines(&self) -> &[Arc<dyn Engine>];
}

/// Build a part map from nodes, keyed by their part ids.
pub fn part_map<I>(nodes: I) -> PartMap
where
    I: IntoIterator<Item = Box<dyn PartNode>>,
{
    nodes.into_iter().map(|n| (n.part(), n)).collect()
}

// ---------------------------------------------------------------------------
// Stock node: onboard propellant plus optional crossfeed
// ---------------------------------------------------------------------------

/// Straightforward node implementation: engines fire when the part holds
/// propellant itself or can crossfeed from another part that does.
pub struct BasicNode {
    part: PartId,
    separatron: bool,
    propellant: bool,
    feeds_from: Option<PartId>,
    engines: Vec<Arc<dyn Engine>>,
}

impl BasicNode {
    pub fn new(part: PartId) -> Self {
        Self {
            part,
            separatron: false,
            propellant: false,
            feeds_from: None,
            engines: Vec::new(),
        }
    }

    pub fn engine(mut self, engine: Arc<dyn Engine>) -> Self {
        self.engines.push(engine);
        self
    }

    pub fn propellant(mut self, available: bool) -> Self {
        self.propellant = available;
        self
    }

    pub fn separatron(mut self, yes: bool) -> Self {
        self.separatron = yes;
        self
    }

    pub fn feeds_from(mut self, part: PartId) -> Self {
        self.feeds_from = Some(part);
        self
    }
}

impl PartNode for BasicNode {
    fn part(&self) -> PartId {
        self.part
    }

    fn is_separatron(&self) -> bool {
        self.separatron
    }

    fn has_propellant(&self) -> bool {
        self.propellant
    }

    fn is_active_engine(&self, graph: &PartMap) -> bool {
        if self.engines.is_empty() {
            return false;
        }
        if self.propellant {
            return true;
        }
        self.feeds_from
            .and_then(|id| graph.get(&id))
            .is_some_and(|n| n.has_propellant())
    }

    fn engines(&self) -> &[Arc<dyn Engine>] {
        &self.engines
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
