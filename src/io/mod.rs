pub mod csv;
pub mod summary;

pub use csv::{write_trajectory, write_trajectory_file};
pub use summary::AscentSummary;
