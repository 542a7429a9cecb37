//! Real-time collaborative session server for codepair mock interviews.
//!
//! Two participants share a code editor, a chat feed, and presence state
//! inside an ephemeral interview room. This crate provides the room registry,
//! the per-connection session coordinator, and the WebSocket/HTTP surface.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
