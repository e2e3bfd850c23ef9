//! Game Module
//!
//! Contains the simulation side: the key-state table and the player pose
//! stepped from it at a fixed rate.

pub mod input;
pub mod state;

pub use input::KeyState;
pub use state::PlayerState;
