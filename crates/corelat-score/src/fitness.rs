// ─────────────────────────────────────────────────────────────────────
// Corelat — Fitness
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Fitness aggregation.
//!
//! Folds the penalty terms, the symmetry score, and three reward terms
//! (normalized energy, life uniformity, thermal stability) into a
//! single scalar. The adaptive weights are updated from the observed
//! grid health first, so the state that exposes a failure mode is
//! already scored under the raised weight.

use crate::penalty::{hotspot_penalty, temperature_penalty};
use crate::symmetry::symmetry_score;
use crate::weights::{AdaptiveWeights, HealthSample};
use corelat_sim::grid::CoreGrid;
use corelat_types::config::ScoringConfig;
use corelat_types::layout::AssemblyKind;

/// All intermediate terms of one fitness computation, kept for the
/// step metadata stream and for debugging optimizer behavior.
#[derive(Debug, Clone, Copy)]
pub struct ScoreBreakdown {
    pub fitness: f64,
    pub energy_norm: f64,
    pub uniformity: f64,
    pub stability: f64,
    pub symmetry: f64,
    pub temp_penalty: f64,
    pub hotspot_penalty: f64,
    pub overheated_fraction: f64,
    pub healthy_fraction: f64,
}

/// Score one grid state. Mutates `weights` per the adaptation rule
/// before aggregating.
pub fn score_grid(
    grid: &CoreGrid,
    cfg: &ScoringConfig,
    weights: &mut AdaptiveWeights,
) -> ScoreBreakdown {
    let temp = temperature_penalty(grid, cfg);
    let hotspot = hotspot_penalty(grid, cfg);
    let symmetry = symmetry_score(grid, cfg);

    let fuel_lives: Vec<f64> = grid
        .iter()
        .filter(|(_, _, c)| c.kind() == AssemblyKind::Fuel)
        .map(|(_, _, c)| c.life())
        .collect();
    let fuel_count = fuel_lives.len();

    let (overheated_fraction, healthy_fraction, uniformity, stability) = if fuel_count == 0 {
        // No fuel: nothing can overheat or degrade, and there is no
        // life distribution to be non-uniform.
        (0.0, 1.0, 1.0, 1.0)
    } else {
        let n = fuel_count as f64;
        let overheated_fraction = temp.overheated as f64 / n;
        let degraded = fuel_lives
            .iter()
            .filter(|&&life| life < cfg.low_life_threshold)
            .count();
        let healthy_fraction = 1.0 - degraded as f64 / n;
        let mean = fuel_lives.iter().sum::<f64>() / n;
        let mad = fuel_lives.iter().map(|life| (life - mean).abs()).sum::<f64>() / n;
        let uniformity = (1.0 - mad).clamp(0.0, 1.0);
        let stability = 1.0 - overheated_fraction;
        (overheated_fraction, healthy_fraction, uniformity, stability)
    };

    weights.adapt(
        HealthSample {
            overheated_fraction,
            healthy_fraction,
        },
        cfg,
    );

    let total_energy: f64 = grid.iter().map(|(_, _, c)| c.total_energy()).sum();
    let energy_norm = total_energy / cfg.energy_reference;

    let fitness = cfg.w_energy * energy_norm
        + cfg.w_uniformity * uniformity
        + cfg.w_stability * stability
        + weights.symmetry * symmetry
        - weights.temp * temp.total
        - weights.hotspot * hotspot;

    ScoreBreakdown {
        fitness,
        energy_norm,
        uniformity,
        stability,
        symmetry,
        temp_penalty: temp.total,
        hotspot_penalty: hotspot,
        overheated_fraction,
        healthy_fraction,
    }
}
