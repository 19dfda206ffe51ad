//! Library crate for whiskey-ball, exposing the game, dispenser and storage
//! layers for the binary and integration tests.

pub mod config;
/// High-score persistence.
pub mod dao;
pub mod dto;
/// Error types shared across the crate.
pub mod error;
/// Dispenser, relay boards, display and frame loop.
pub mod services;
/// Game orchestration, screens and timing.
pub mod state;
