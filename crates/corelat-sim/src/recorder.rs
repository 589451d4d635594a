// ─────────────────────────────────────────────────────────────────────
// Corelat — Recorder
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! In-memory step records for downstream consumers.
//!
//! The engine produces these after every step; serialization to disk is
//! the caller's business, the core only builds the records.

use crate::grid::CoreGrid;
use corelat_types::layout::AssemblyKind;
use ndarray::Array2;
use serde::Serialize;

/// Per-cell state exposed after each step.
#[derive(Debug, Clone, Serialize)]
pub struct CellRecord {
    #[serde(rename = "type")]
    pub kind: AssemblyKind,
    pub enrichment: f64,
    pub life: f64,
    pub temperature: f64,
    pub energy_output: f64,
    pub total_energy: f64,
}

/// Step metadata: totals, penalties, and fitness as filled in by the
/// scoring layer.
#[derive(Debug, Clone, Serialize, Default)]
pub struct StepMeta {
    pub step: usize,
    pub total_energy: f64,
    pub temp_penalty: f64,
    pub hotspot_penalty: f64,
    pub symmetry: f64,
    pub fitness: f64,
}

/// Accumulates per-step logs for a whole run. The kind plane is static
/// within a run, so it is stored once and refreshed only when the grid
/// handed in no longer matches it (a reused recorder across layouts);
/// scalar planes are appended per step.
#[derive(Debug, Default)]
pub struct Recorder {
    pub kinds: Option<Vec<AssemblyKind>>,
    pub temperature: Vec<Array2<f64>>,
    pub energy_output: Vec<Array2<f64>>,
    pub life: Vec<Array2<f64>>,
    pub flux: Vec<Array2<f64>>,
    pub cells: Vec<Vec<CellRecord>>,
    pub meta: Vec<StepMeta>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }

    /// Record one completed step. `flux` is the field the step consumed.
    pub fn record(&mut self, grid: &CoreGrid, flux: Array2<f64>, meta: StepMeta) {
        let stale = match &self.kinds {
            Some(kinds) => {
                kinds.len() != grid.width() * grid.height()
                    || grid.iter().zip(kinds.iter()).any(|((_, _, c), k)| c.kind() != *k)
            }
            None => true,
        };
        if stale {
            self.kinds = Some(grid.iter().map(|(_, _, c)| c.kind()).collect());
        }
        let (h, w) = (grid.height(), grid.width());
        let mut temperature = Array2::zeros((h, w));
        let mut energy_output = Array2::zeros((h, w));
        let mut life = Array2::zeros((h, w));
        let mut cells = Vec::with_capacity(w * h);
        for (x, y, cell) in grid.iter() {
            temperature[[y, x]] = cell.temperature();
            energy_output[[y, x]] = cell.energy_output();
            life[[y, x]] = cell.life();
            cells.push(CellRecord {
                kind: cell.kind(),
                enrichment: cell.enrichment(),
                life: cell.life(),
                temperature: cell.temperature(),
                energy_output: cell.energy_output(),
                total_energy: cell.total_energy(),
            });
        }
        self.temperature.push(temperature);
        self.energy_output.push(energy_output);
        self.life.push(life);
        self.flux.push(flux);
        self.cells.push(cells);
        self.meta.push(meta);
    }

    pub fn steps_recorded(&self) -> usize {
        self.meta.len()
    }
}
