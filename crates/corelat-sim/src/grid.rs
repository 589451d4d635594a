// ─────────────────────────────────────────────────────────────────────
// Corelat — Grid
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! 2D cell container with adjacency weights and bounds checking.
//!
//! Dimensions are fixed for the grid's lifetime and every position
//! always holds exactly one cell (`Blank` is the empty variant).
//! Traversal is row-major (y outer, x inner) everywhere; algorithms
//! that compare cells rely on this order for reproducibility.

use crate::burnup::BurnupModel;
use crate::cell::{Cell, CellSnapshot};
use corelat_types::config::CoreConfig;
use corelat_types::error::{CoreError, CoreResult};
use corelat_types::layout::{AssemblyKind, LayoutSpec};
use std::sync::Arc;

/// Orthogonal neighbors carry full influence.
pub const ORTHO_WEIGHT: f64 = 1.0;

/// Diagonal neighbors contribute less.
pub const DIAG_WEIGHT: f64 = 0.4;

/// Fixed probe order: orthogonal first, then diagonals.
const NEIGHBOR_OFFSETS: [(i64, i64, f64); 8] = [
    (-1, 0, ORTHO_WEIGHT),
    (1, 0, ORTHO_WEIGHT),
    (0, -1, ORTHO_WEIGHT),
    (0, 1, ORTHO_WEIGHT),
    (-1, -1, DIAG_WEIGHT),
    (-1, 1, DIAG_WEIGHT),
    (1, -1, DIAG_WEIGHT),
    (1, 1, DIAG_WEIGHT),
];

/// The reactor core lattice.
#[derive(Debug, Clone)]
pub struct CoreGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CoreGrid {
    /// All-blank grid of the given dimensions.
    pub fn new_blank(width: usize, height: usize, cfg: &CoreConfig) -> Self {
        CoreGrid {
            width,
            height,
            cells: (0..width * height).map(|_| Cell::blank(cfg)).collect(),
        }
    }

    /// Build a grid from a validated layout document. Fuel entries that
    /// omit enrichment or life get the configured defaults; unknown
    /// type names abort the build.
    pub fn from_layout(
        layout: &LayoutSpec,
        cfg: &CoreConfig,
        burnup: &Arc<dyn BurnupModel>,
    ) -> CoreResult<Self> {
        layout.validate()?;
        let mut cells = Vec::with_capacity(layout.width * layout.height);
        for row in &layout.grid {
            for spec in row {
                let cell = match spec.kind()? {
                    AssemblyKind::Fuel => {
                        let enrichment =
                            spec.enrichment().unwrap_or(cfg.fuel.default_enrichment);
                        let life = spec.life().unwrap_or(1.0);
                        Cell::fuel(enrichment, life, cfg, Arc::clone(burnup))
                    }
                    AssemblyKind::Moderator => Cell::moderator(cfg),
                    AssemblyKind::ControlRod => Cell::control_rod(cfg),
                    AssemblyKind::Blank => Cell::blank(cfg),
                };
                cells.push(cell);
            }
        }
        Ok(CoreGrid {
            width: layout.width,
            height: layout.height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Bounds-checked lookup. `None` is expected control flow for
    /// neighbor probes beyond the edge, not an error.
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Replace a cell wholesale. Used at initialization and by the
    /// optimizer between evaluations, never inside a step.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> CoreResult<()> {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                Ok(())
            }
            None => Err(CoreError::GridOutOfBounds { x, y }),
        }
    }

    /// Up to 8 neighbor positions with adjacency weights, in a fixed
    /// order; out-of-grid positions are omitted (no wraparound).
    pub fn neighbor_positions(&self, x: usize, y: usize) -> Vec<((usize, usize), f64)> {
        let mut out = Vec::with_capacity(8);
        for &(dx, dy, w) in &NEIGHBOR_OFFSETS {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx >= 0 && ny >= 0 && (nx as usize) < self.width && (ny as usize) < self.height {
                out.push(((nx as usize, ny as usize), w));
            }
        }
        out
    }

    /// Neighbor cells with weights, same order as `neighbor_positions`.
    pub fn neighbors(&self, x: usize, y: usize) -> Vec<(&Cell, f64)> {
        self.neighbor_positions(x, y)
            .into_iter()
            .map(|((nx, ny), w)| (&self.cells[ny * self.width + nx], w))
            .collect()
    }

    /// Row-major traversal (y outer, x inner). Restartable.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i % width, i / width, cell))
    }

    /// Prior-step views of every cell, row-major, for double-buffered
    /// updates.
    pub fn snapshot(&self) -> Vec<CellSnapshot> {
        self.cells.iter().map(Cell::snapshot).collect()
    }

    /// Neighbor snapshots with weights, pulled from a prior-step
    /// snapshot rather than the live grid.
    pub fn neighbor_snapshots(
        &self,
        snapshot: &[CellSnapshot],
        x: usize,
        y: usize,
    ) -> Vec<(CellSnapshot, f64)> {
        self.neighbor_positions(x, y)
            .into_iter()
            .map(|((nx, ny), w)| (snapshot[ny * self.width + nx], w))
            .collect()
    }

    pub fn fuel_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.kind() == AssemblyKind::Fuel)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::burnup::HeuristicBurnup;

    fn burnup() -> Arc<dyn BurnupModel> {
        Arc::new(HeuristicBurnup)
    }

    fn layout_3x2() -> LayoutSpec {
        serde_json::from_str(
            r#"{
                "width": 3,
                "height": 2,
                "grid": [
                    ["Fuel", "Moderator", "ControlRod"],
                    ["Blank", {"fa_type": "Fuel", "enrichment": 0.045, "life": 0.5}, "Fuel"]
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_from_layout_places_every_cell() {
        let cfg = CoreConfig::default();
        let grid = CoreGrid::from_layout(&layout_3x2(), &cfg, &burnup()).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(0, 0).unwrap().kind(), AssemblyKind::Fuel);
        assert_eq!(grid.get(1, 0).unwrap().kind(), AssemblyKind::Moderator);
        assert_eq!(grid.get(2, 0).unwrap().kind(), AssemblyKind::ControlRod);
        assert_eq!(grid.get(0, 1).unwrap().kind(), AssemblyKind::Blank);
        // Detailed spec carries its own enrichment and life
        let fuel = grid.get(1, 1).unwrap();
        assert!((fuel.enrichment() - 0.045).abs() < 1e-12);
        assert!((fuel.life() - 0.5).abs() < 1e-12);
        // Bare name falls back to the default enrichment
        assert!((grid.get(0, 0).unwrap().enrichment() - cfg.fuel.default_enrichment).abs() < 1e-12);
    }

    #[test]
    fn test_get_out_of_bounds_is_none() {
        let cfg = CoreConfig::default();
        let grid = CoreGrid::new_blank(4, 3, &cfg);
        assert!(grid.get(4, 0).is_none());
        assert!(grid.get(0, 3).is_none());
        assert!(grid.get(0, 0).is_some());
    }

    #[test]
    fn test_set_out_of_bounds_is_error() {
        let cfg = CoreConfig::default();
        let mut grid = CoreGrid::new_blank(2, 2, &cfg);
        let err = grid.set(5, 5, Cell::blank(&cfg)).unwrap_err();
        assert!(matches!(err, CoreError::GridOutOfBounds { x: 5, y: 5 }));
        grid.set(1, 1, Cell::moderator(&cfg)).unwrap();
        assert_eq!(grid.get(1, 1).unwrap().kind(), AssemblyKind::Moderator);
    }

    #[test]
    fn test_neighbor_weights_and_edges() {
        let cfg = CoreConfig::default();
        let grid = CoreGrid::new_blank(3, 3, &cfg);
        // Center: 4 orthogonal at 1.0 plus 4 diagonal at 0.4
        let center = grid.neighbor_positions(1, 1);
        assert_eq!(center.len(), 8);
        let ortho: f64 = center.iter().take(4).map(|(_, w)| w).sum();
        let diag: f64 = center.iter().skip(4).map(|(_, w)| w).sum();
        assert!((ortho - 4.0).abs() < 1e-12);
        assert!((diag - 1.6).abs() < 1e-12);
        // Corner: 2 orthogonal + 1 diagonal, out-of-grid omitted
        let corner = grid.neighbor_positions(0, 0);
        assert_eq!(corner.len(), 3);
    }

    #[test]
    fn test_iter_row_major_and_restartable() {
        let cfg = CoreConfig::default();
        let grid = CoreGrid::from_layout(&layout_3x2(), &cfg, &burnup()).unwrap();
        let order: Vec<(usize, usize)> = grid.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(
            order,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)],
            "Traversal must be row-major with y outer"
        );
        // Restartable: a second pass yields the same sequence
        let again: Vec<(usize, usize)> = grid.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(order, again);
    }

    #[test]
    fn test_snapshot_matches_live_state() {
        let cfg = CoreConfig::default();
        let grid = CoreGrid::from_layout(&layout_3x2(), &cfg, &burnup()).unwrap();
        let snap = grid.snapshot();
        assert_eq!(snap.len(), 6);
        for (x, y, cell) in grid.iter() {
            let s = snap[y * grid.width() + x];
            assert_eq!(s.kind, cell.kind());
            assert!((s.temperature - cell.temperature()).abs() < 1e-12);
            assert!((s.life - cell.life()).abs() < 1e-12);
        }
    }
}
