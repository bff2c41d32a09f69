pub mod cadence;
pub mod orchestrator;
pub mod resolver;
