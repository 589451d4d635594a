// ─────────────────────────────────────────────────────────────────────
// Corelat — Flux
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Neutron flux field, diffusion approximation.
//!
//! Per-cell neutron yield is seeded into a field, spread once through a
//! discrete Laplacian convolution, then attenuated by each cell's
//! absorption factor. The field is ephemeral: recomputed from scratch
//! every step and consumed once by the update engine.

use crate::grid::CoreGrid;
use corelat_types::config::CoreConfig;
use ndarray::Array2;

/// Discrete Laplacian kernel (weights sum to zero). Diagonal terms are
/// down-weighted relative to the orthogonal ones.
const LAPLACIAN_KERNEL: [[f64; 3]; 3] = [
    [1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0],
    [2.0 / 3.0, -10.0 / 3.0, 2.0 / 3.0],
    [1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0],
];

/// Compute the flux field for the current grid state.
///
/// Edge handling replicates the nearest border value, so edge cells see
/// themselves in place of out-of-grid positions. Small negative
/// excursions from the Laplacian are clamped to zero; flux is a
/// non-negative quantity everywhere downstream.
pub fn diffusion_flux(grid: &CoreGrid, cfg: &CoreConfig) -> Array2<f64> {
    let (h, w) = (grid.height(), grid.width());
    let mut seed = Array2::zeros((h, w));
    for (x, y, cell) in grid.iter() {
        seed[[y, x]] = cell.neutron_yield();
    }

    let mut field = Array2::zeros((h, w));
    for y in 0..h {
        for x in 0..w {
            let mut spread = 0.0;
            for (ky, row) in LAPLACIAN_KERNEL.iter().enumerate() {
                for (kx, &k) in row.iter().enumerate() {
                    let sy = (y + ky).saturating_sub(1).min(h - 1);
                    let sx = (x + kx).saturating_sub(1).min(w - 1);
                    spread += k * seed[[sy, sx]];
                }
            }
            field[[y, x]] = seed[[y, x]] + cfg.flux.diffusion_coeff * spread;
        }
    }

    for (x, y, cell) in grid.iter() {
        field[[y, x]] = (field[[y, x]] * (1.0 - cell.absorption_factor())).max(0.0);
    }
    field
}
