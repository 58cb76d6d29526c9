//! Crop insurance claim evaluator
//!
//! Estimates whether a crop insurance claim holds by comparing the weather over
//! the insured period with the ideal conditions for the insured crop.

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
