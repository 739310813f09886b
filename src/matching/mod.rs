//! Matching module containing confidence scoring and the reconciliation service

pub mod evaluator;
pub mod reconciler;

pub use evaluator::*;
pub use reconciler::*;
