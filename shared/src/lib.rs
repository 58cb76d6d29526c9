//! Shared types and scoring core for crop insurance claim evaluation
//!
//! Everything in this crate is pure: no network, no clock except where a function
//! says it reads the local date. The backend and the WASM module both build on it.

pub mod aggregation;
pub mod models;
pub mod scoring;
pub mod temporal;
pub mod types;
pub mod validation;
pub mod windowing;

pub use aggregation::*;
pub use models::*;
pub use scoring::*;
pub use temporal::*;
pub use types::*;
pub use validation::*;
pub use windowing::*;
