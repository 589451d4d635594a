// ─────────────────────────────────────────────────────────────────────
// Corelat — Engine
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! The update engine: one discrete time step over the whole grid.
//!
//! A step is: compute the flux field, snapshot every cell, update each
//! cell from the snapshot and its flux value, then audit the committed
//! state for numerical validity. Cells never observe a neighbor's
//! same-step update; the snapshot is the only neighbor view.

use crate::cell::Cell;
use crate::flux::diffusion_flux;
use crate::grid::CoreGrid;
use crate::recorder::CellRecord;
use corelat_types::config::CoreConfig;
use corelat_types::error::{CoreError, CoreResult};
use ndarray::Array2;

/// What one step produced.
#[derive(Debug)]
pub struct StepReport {
    pub step: usize,
    /// Energy generated across the grid during this step.
    pub total_energy: f64,
    /// The flux field the step consumed.
    pub flux: Array2<f64>,
}

/// Owns a grid exclusively and advances it step by step. Independent
/// simulators share nothing; concurrent fitness evaluations each get
/// their own.
#[derive(Debug)]
pub struct Simulator {
    grid: CoreGrid,
    cfg: CoreConfig,
    step: usize,
}

impl Simulator {
    pub fn new(grid: CoreGrid, cfg: CoreConfig) -> Self {
        Simulator { grid, cfg, step: 0 }
    }

    pub fn grid(&self) -> &CoreGrid {
        &self.grid
    }

    /// Mutable grid access for the optimizer between evaluations.
    pub fn grid_mut(&mut self) -> &mut CoreGrid {
        &mut self.grid
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    /// Advance the grid by one time step.
    pub fn step(&mut self) -> CoreResult<StepReport> {
        let flux = diffusion_flux(&self.grid, &self.cfg);
        let snapshot = self.grid.snapshot();

        let (w, h) = (self.grid.width(), self.grid.height());
        let mut total_energy = 0.0;
        for y in 0..h {
            for x in 0..w {
                let neighbors = self.grid.neighbor_snapshots(&snapshot, x, y);
                let phi = flux[[y, x]];
                let cell = self
                    .grid
                    .get_mut(x, y)
                    .ok_or(CoreError::GridOutOfBounds { x, y })?;
                cell.update(&neighbors, phi, &self.cfg);
                total_energy += cell.energy_output();
            }
        }

        self.audit()?;
        self.step += 1;
        log::debug!(
            "step {} complete, energy generated {:.4}",
            self.step,
            total_energy
        );
        Ok(StepReport {
            step: self.step,
            total_energy,
            flux,
        })
    }

    /// Run the configured number of steps; returns the cumulative energy
    /// generated. Deterministic and bounded.
    pub fn run(&mut self) -> CoreResult<f64> {
        let mut cumulative = 0.0;
        for _ in 0..self.cfg.steps {
            cumulative += self.step()?.total_energy;
        }
        Ok(cumulative)
    }

    /// Per-cell snapshot records for the outbound recorder interface.
    pub fn cell_records(&self) -> Vec<CellRecord> {
        self.grid
            .iter()
            .map(|(_, _, cell)| CellRecord {
                kind: cell.kind(),
                enrichment: cell.enrichment(),
                life: cell.life(),
                temperature: cell.temperature(),
                energy_output: cell.energy_output(),
                total_energy: cell.total_energy(),
            })
            .collect()
    }

    /// A NaN or infinity in committed state is a modeling bug; surface
    /// it instead of clamping it away.
    fn audit(&self) -> CoreResult<()> {
        for (x, y, cell) in self.grid.iter() {
            let quantity = match cell {
                Cell::Fuel(f) => {
                    if !f.temperature.is_finite() {
                        Some("temperature")
                    } else if !f.life.is_finite() {
                        Some("life")
                    } else if !f.energy_output.is_finite() || !f.total_energy.is_finite() {
                        Some("energy")
                    } else {
                        None
                    }
                }
                _ => (!cell.temperature().is_finite()).then_some("temperature"),
            };
            if let Some(quantity) = quantity {
                return Err(CoreError::NumericalInvalid {
                    quantity,
                    context: format!("cell ({x}, {y})"),
                    step: self.step,
                });
            }
        }
        Ok(())
    }
}
