//! LLM adapter modules.
//!
//! Provides the HTTP implementation of the [`Llm`](crate::port::outbound::llm::Llm)
//! trait for chat-completions style inference services.

pub mod chat;

pub use chat::ChatClient;
