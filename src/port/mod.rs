//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the extension points the application layer is written
//! against. Adapters implement them to reach the outside world.
//!
//! ```text
//!          ┌─────────────────────────┐
//!          │       Application       │
//!          │   Predictor, Dashboard  │
//!          └───────────┬─────────────┘
//!                      │
//!          ┌───────────┴─────────────┐
//!          ▼                         ▼
//!     ┌─────────┐             ┌─────────────┐
//!     │   Llm   │             │RandomSource │
//!     └─────────┘             └─────────────┘
//! ```
//!
//! - [`outbound::llm::Llm`] - Chat-completion requests to the inference service
//! - [`outbound::random::RandomSource`] - Uniform random draws for synthetic values

pub mod outbound;

pub use outbound::llm::{ChatMessage, Llm, Role};
pub use outbound::random::RandomSource;
