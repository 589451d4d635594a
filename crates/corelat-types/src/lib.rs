// ─────────────────────────────────────────────────────────────────────
// Corelat — Shared Types
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Shared types for the Corelat reactor lattice simulator.
//!
//! Error enum, configuration structs (all tunable constants live here),
//! and the JSON layout document schema.

pub mod config;
pub mod error;
pub mod layout;
