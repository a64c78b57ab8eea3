pub mod engine;
pub mod part;

pub use engine::{ActiveEngine, Engine, SimpleEngine};
pub use part::{part_map, BasicNode, PartId, PartMap, PartNode};
