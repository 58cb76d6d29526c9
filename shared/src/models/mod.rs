//! Domain models for crop claim evaluation

mod land;
mod weather;

pub use land::*;
pub use weather::*;
