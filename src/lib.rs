//! Deterministic per-tick simulation core of a Pac-Man game variant.
//!
//! A [`game::Game`] owns the current [`level::Level`] and advances it one tick
//! at a time, returning the [`events::GameEvent`]s each tick produced.

pub mod actor;
pub mod bonus;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod gatekeeper;
pub mod ghost;
pub mod hunting;
pub mod level;
pub mod map;
pub mod power;
pub mod score;
pub mod speed;
pub mod targeting;
