//! Gateway: reverse proxy for the inference API plus static bundle hosting.
//!
//! ```text
//! client ──▶ /api/llama/{rest}?{query} ──▶ {origin}/v1/{rest}?{query}
//!        ──▶ /{file}                    ──▶ static_dir/{file}
//!        ──▶ anything else              ──▶ static_dir/index.html (200)
//! ```

pub mod proxy;
pub mod rewrite;
pub mod server;

pub use proxy::Proxy;
pub use rewrite::{rewrite, RewriteRule};
pub use server::{router, serve, serve_on};
