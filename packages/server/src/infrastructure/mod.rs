//! Infrastructure layer: concrete implementations of the domain interfaces
//! plus the wire-level DTOs.

pub mod auth;
pub mod dto;
pub mod pusher;
pub mod registry;
