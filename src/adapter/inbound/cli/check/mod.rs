//! Diagnostic check handlers.

pub mod config;
