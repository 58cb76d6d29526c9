//! Business logic services

pub mod claim;

pub use claim::{ClaimAssessment, ClaimEvaluator, EvaluationOptions};
