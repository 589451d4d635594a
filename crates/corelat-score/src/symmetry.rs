// ─────────────────────────────────────────────────────────────────────
// Corelat — Symmetry
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Mirror symmetry score.
//!
//! Every cell is compared against its horizontal and vertical mirror
//! across the grid's center axes. Kind mismatches cost according to a
//! fixed kind-pair weight table; mirrored fuel pairs additionally pay
//! for enrichment mismatch. The result is normalized to [0, 1] with
//! 1.0 meaning perfect symmetry.

use corelat_sim::grid::CoreGrid;
use corelat_types::config::ScoringConfig;
use corelat_types::layout::AssemblyKind;

/// Kind-pair mismatch weights, indexed by `AssemblyKind::index` in the
/// order Fuel, Moderator, ControlRod, Blank. Symmetric, zero diagonal.
const KIND_WEIGHTS: [[f64; 4]; 4] = [
    [0.0, 0.5, 1.0, 0.7],
    [0.5, 0.0, 0.8, 0.2],
    [1.0, 0.8, 0.0, 0.6],
    [0.7, 0.2, 0.6, 0.0],
];

fn kind_weight(a: AssemblyKind, b: AssemblyKind) -> f64 {
    KIND_WEIGHTS[a.index()][b.index()]
}

fn row_max(a: AssemblyKind) -> f64 {
    KIND_WEIGHTS[a.index()]
        .iter()
        .fold(0.0_f64, |m, &w| m.max(w))
}

/// Mismatch contribution of one mirrored pair.
fn pair_mismatch(grid: &CoreGrid, cfg: &ScoringConfig, a: (usize, usize), b: (usize, usize)) -> (f64, f64) {
    let (Some(ca), Some(cb)) = (grid.get(a.0, a.1), grid.get(b.0, b.1)) else {
        return (0.0, 0.0);
    };
    let mut diff = kind_weight(ca.kind(), cb.kind());
    if ca.kind() == AssemblyKind::Fuel && cb.kind() == AssemblyKind::Fuel {
        diff += cfg.enrichment_mismatch_weight * (ca.enrichment() - cb.enrichment()).abs();
    }
    (diff, row_max(ca.kind()))
}

/// Score in [0, 1]; exactly 1.0 for a grid identical to its own mirror.
pub fn symmetry_score(grid: &CoreGrid, cfg: &ScoringConfig) -> f64 {
    let (w, h) = (grid.width(), grid.height());
    let mut total_diff = 0.0;
    let mut max_diff = 0.0;

    for (x, y, _) in grid.iter() {
        let mirror_y = h - 1 - y;
        if mirror_y != y {
            let (d, m) = pair_mismatch(grid, cfg, (x, y), (x, mirror_y));
            total_diff += d;
            max_diff += m;
        }
        let mirror_x = w - 1 - x;
        if mirror_x != x {
            let (d, m) = pair_mismatch(grid, cfg, (x, y), (mirror_x, y));
            total_diff += d;
            max_diff += m;
        }
    }

    if max_diff > 0.0 {
        (1.0 - total_diff / max_diff).clamp(0.0, 1.0)
    } else {
        1.0
    }
}
