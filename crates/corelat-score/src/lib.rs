// ─────────────────────────────────────────────────────────────────────
// Corelat — Scoring Layer
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Scoring layer for the Corelat reactor lattice simulator.
//!
//! Deterministic penalty and fitness functions over a grid state, plus
//! the black-box `Evaluator` a layout optimizer calls as its fitness
//! oracle.

pub mod evaluator;
pub mod fitness;
pub mod penalty;
pub mod symmetry;
pub mod weights;
