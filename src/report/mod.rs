//! Report module - read-only summaries of the analysis sample

pub mod chart;
pub mod export;
pub mod missing;
pub mod summary;

pub use chart::*;
pub use export::*;
pub use missing::*;
pub use summary::*;
