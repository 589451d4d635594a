// ─────────────────────────────────────────────────────────────────────
// Corelat — Simulation Engine
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Grid simulation engine for the Corelat reactor lattice simulator.
//!
//! A reactor core is a 2D grid of heterogeneous cells (fuel, moderator,
//! control rod, blank) whose temperature, remaining life, flux exposure
//! and energy output evolve through local neighbor interactions, one
//! discrete time step at a time.

pub mod burnup;
pub mod cell;
pub mod engine;
pub mod flux;
pub mod generate;
pub mod grid;
pub mod recorder;
