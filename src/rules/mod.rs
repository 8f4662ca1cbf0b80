//! Win conditions and the puzzle lifecycle.
//!
//! Levels declare a `Goal`; `WinEvaluator` applies it to the
//! propagated state. The engine never interprets variant-specific
//! goals directly.

pub mod evaluator;
pub mod status;

pub use evaluator::WinEvaluator;
pub use status::Status;
