//! Lambda-facing layer for the career guidance service.
//!
//! Handlers translate API Gateway and direct-invocation events into calls on
//! `career_guidance_core`; adapters provide the `LookupInvoker` implementations
//! (AWS Lambda and in-process agents). Binaries under `src/bin` wire these
//! into `lambda_runtime` and the operator CLI.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod smoke;
pub mod telemetry;
