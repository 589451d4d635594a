// ─────────────────────────────────────────────────────────────────────
// Corelat — Adaptive Weights
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Adaptive penalty weights.
//!
//! The scoring layer nudges its penalty weights upward when the grid
//! state shows the corresponding failure mode: widespread overheating
//! raises the temperature weight, a shrinking healthy-fuel population
//! raises the hotspot weight. Nudges compound multiplicatively and are
//! capped so a long pathological run cannot blow the fitness scale up.

use corelat_types::config::ScoringConfig;

/// Mutable weight state carried across scoring calls within one
/// evaluation. Fresh evaluations start from the configured values.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveWeights {
    pub temp: f64,
    pub hotspot: f64,
    pub symmetry: f64,
}

/// Grid health observations the adaptation rule reacts to.
#[derive(Debug, Clone, Copy)]
pub struct HealthSample {
    /// Fraction of fuel cells above the temperature limit, in [0, 1].
    pub overheated_fraction: f64,
    /// Fraction of fuel cells at or above the low-life threshold, in [0, 1].
    pub healthy_fraction: f64,
}

impl AdaptiveWeights {
    pub fn from_config(cfg: &ScoringConfig) -> Self {
        AdaptiveWeights {
            temp: cfg.w_temp,
            hotspot: cfg.w_hotspot,
            symmetry: cfg.w_symmetry,
        }
    }

    /// Apply the adaptation rule for one observed grid state. Called
    /// before the weights are consumed, so the step that exposes a
    /// failure mode already scores under the raised weight.
    pub fn adapt(&mut self, sample: HealthSample, cfg: &ScoringConfig) {
        if sample.overheated_fraction > cfg.overheat_trigger_fraction {
            self.temp = nudge(self.temp, "temperature", cfg);
        }
        if sample.healthy_fraction < cfg.healthy_fraction_trigger {
            self.hotspot = nudge(self.hotspot, "hotspot", cfg);
        }
    }

    /// Return to the configured starting weights.
    pub fn reset(&mut self, cfg: &ScoringConfig) {
        *self = Self::from_config(cfg);
    }
}

fn nudge(weight: f64, name: &str, cfg: &ScoringConfig) -> f64 {
    let raised = weight * cfg.weight_nudge;
    if raised >= cfg.weight_cap {
        if weight < cfg.weight_cap {
            log::warn!("{name} penalty weight hit cap {}", cfg.weight_cap);
        }
        cfg.weight_cap
    } else {
        raised
    }
}
