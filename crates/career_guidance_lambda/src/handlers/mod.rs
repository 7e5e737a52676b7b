pub mod agent;
pub mod event;
pub mod orchestrator;
