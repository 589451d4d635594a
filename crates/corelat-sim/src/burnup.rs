// ─────────────────────────────────────────────────────────────────────
// Corelat — Burnup
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Pluggable burnup strategies.
//!
//! A strategy converts one step of flux/energy exposure into fuel life
//! consumption. Strategies are stateless and shared across fuel cells
//! via `Arc<dyn BurnupModel>`; both must be substitutable without
//! touching the fuel update contract.

use crate::cell::Fuel;
use corelat_types::config::CoreConfig;
use std::fmt;

/// Strategy interface: how much life one step consumes. Must return a
/// non-negative, finite value.
pub trait BurnupModel: fmt::Debug + Send + Sync {
    fn life_loss(&self, fuel: &Fuel, flux: f64, cfg: &CoreConfig) -> f64;
}

/// Life loss scales with the cell's own energy output relative to the
/// energy scale, amplified linearly when the fuel runs hot.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicBurnup;

impl BurnupModel for HeuristicBurnup {
    fn life_loss(&self, fuel: &Fuel, _flux: f64, cfg: &CoreConfig) -> f64 {
        let b = &cfg.burnup;
        let overheat_factor = 1.0 + (fuel.temperature - b.overheat_threshold).max(0.0);
        let burn_rate = b.base_rate * overheat_factor;
        fuel.life * burn_rate * (fuel.energy_output / cfg.fuel.energy_constant)
    }
}

/// Life loss from first principles: fission rate per target atom is
/// Φ·σ_f, integrated over the step, independent of energy output. A
/// per-step ceiling keeps a single step from exhausting a large life
/// fraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicsBurnup;

impl BurnupModel for PhysicsBurnup {
    fn life_loss(&self, _fuel: &Fuel, flux: f64, cfg: &CoreConfig) -> f64 {
        let b = &cfg.burnup;
        let phi = flux * b.reference_flux;
        let burn = phi * b.fission_cross_section * b.seconds_per_step;
        burn.min(b.max_loss_per_step)
    }
}
