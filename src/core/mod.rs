//! Core Engine Module
//!
//! Contains the fundamental systems: renderer, time management, error types.

pub mod error;
pub mod renderer;
pub mod time;

pub use renderer::Renderer;
pub use time::Time;
