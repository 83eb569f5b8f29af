//! Outbound ports: dependencies the application calls out to.

pub mod llm;
pub mod random;
