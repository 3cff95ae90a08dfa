//! Pipeline module - the load, normalize, clean, and derive stages

pub mod binary;
pub mod clean;
pub mod cohort;
pub mod derive;
pub mod error;
pub mod loader;
pub mod normalize;

pub use binary::*;
pub use clean::*;
pub use cohort::*;
pub use derive::*;
pub use error::*;
pub use loader::*;
pub use normalize::*;
