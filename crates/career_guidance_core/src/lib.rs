//! Career guidance domain primitives.
//!
//! This crate owns query interpretation, the static course catalog, the
//! downstream lookup fan-out and response assembly. It intentionally excludes
//! AWS SDK and Lambda runtime concerns; those live in `career_guidance_lambda`
//! behind the `fanout::LookupInvoker` seam.

pub mod agents;
pub mod assembler;
pub mod careers;
pub mod catalog;
pub mod contract;
pub mod fanout;
pub mod interpreter;
