//! Adapters: the concrete edges of the application.
//!
//! - [`inbound`] - HTTP gateway and command line
//! - [`outbound`] - Inference client and random source

pub mod inbound;
pub mod outbound;
