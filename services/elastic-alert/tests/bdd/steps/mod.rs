//! BDD step definitions for alert compilation

pub mod compile_steps;
pub mod payload_steps;
