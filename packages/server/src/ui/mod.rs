//! UI layer: the axum server, its HTTP/WebSocket handlers, and shared state.

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::{ReaperConfig, Server};
