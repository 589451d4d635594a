// ─────────────────────────────────────────────────────────────────────
// Corelat — Penalty
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Temperature and hotspot penalties.

use corelat_sim::grid::CoreGrid;
use corelat_types::config::ScoringConfig;
use corelat_types::layout::AssemblyKind;

/// Result of the overheating scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemperaturePenalty {
    pub total: f64,
    pub overheated: usize,
}

/// Exponential penalty for fuel above the temperature limit. Zero when
/// nothing overheats; grows as exp((T - limit)/scale) per violator.
pub fn temperature_penalty(grid: &CoreGrid, cfg: &ScoringConfig) -> TemperaturePenalty {
    let mut result = TemperaturePenalty::default();
    for (_, _, cell) in grid.iter() {
        if cell.kind() != AssemblyKind::Fuel {
            continue;
        }
        let t = cell.temperature();
        if t > cfg.temp_limit {
            result.overheated += 1;
            result.total += ((t - cfg.temp_limit) / cfg.temp_scale).exp();
        }
    }
    result
}

/// Uniformity penalty over directly adjacent fuel pairs (up/down/left/
/// right only). Each unordered pair is visited once via a right/down
/// sweep; a pair contributes |Δlife| - threshold when the difference
/// exceeds the threshold.
pub fn hotspot_penalty(grid: &CoreGrid, cfg: &ScoringConfig) -> f64 {
    let mut total = 0.0;
    for (x, y, cell) in grid.iter() {
        if cell.kind() != AssemblyKind::Fuel {
            continue;
        }
        for (nx, ny) in [(x + 1, y), (x, y + 1)] {
            let Some(other) = grid.get(nx, ny) else {
                continue;
            };
            if other.kind() != AssemblyKind::Fuel {
                continue;
            }
            let diff = (cell.life() - other.life()).abs();
            if diff > cfg.hotspot_threshold {
                total += diff - cfg.hotspot_threshold;
            }
        }
    }
    total
}
