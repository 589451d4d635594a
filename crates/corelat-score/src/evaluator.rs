// ─────────────────────────────────────────────────────────────────────
// Corelat — Evaluator
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! The fitness oracle a layout optimizer calls.
//!
//! Each `evaluate` call builds a fresh grid from the candidate layout,
//! runs the configured number of simulation steps, scores every step
//! so the adaptive weights can react to the run as it unfolds, and
//! returns the final fitness. Evaluations are independent: weights are
//! reset at the start of each call, so candidate ordering never leaks
//! into scores.

use crate::fitness::{score_grid, ScoreBreakdown};
use crate::weights::AdaptiveWeights;
use corelat_sim::burnup::{BurnupModel, HeuristicBurnup};
use corelat_sim::engine::Simulator;
use corelat_sim::grid::CoreGrid;
use corelat_sim::recorder::{Recorder, StepMeta};
use corelat_types::config::CoreConfig;
use corelat_types::error::{CoreError, CoreResult};
use corelat_types::layout::LayoutSpec;
use std::sync::Arc;

/// Black-box fitness function over candidate layouts.
#[derive(Debug)]
pub struct Evaluator {
    cfg: CoreConfig,
    weights: AdaptiveWeights,
    burnup: Arc<dyn BurnupModel>,
}

impl Evaluator {
    pub fn new(cfg: CoreConfig) -> Self {
        let weights = AdaptiveWeights::from_config(&cfg.scoring);
        Evaluator {
            cfg,
            weights,
            burnup: Arc::new(HeuristicBurnup),
        }
    }

    /// Swap in an alternative burnup strategy.
    pub fn with_burnup(mut self, burnup: Arc<dyn BurnupModel>) -> Self {
        self.burnup = burnup;
        self
    }

    /// Weight state after the most recent evaluation.
    pub fn weights(&self) -> &AdaptiveWeights {
        &self.weights
    }

    /// Score one candidate layout.
    pub fn evaluate(&mut self, layout: &LayoutSpec) -> CoreResult<f64> {
        self.run(layout, None)
    }

    /// Score one candidate layout while streaming per-step state into
    /// the recorder.
    pub fn evaluate_recorded(
        &mut self,
        layout: &LayoutSpec,
        recorder: &mut Recorder,
    ) -> CoreResult<f64> {
        self.run(layout, Some(recorder))
    }

    fn run(&mut self, layout: &LayoutSpec, mut recorder: Option<&mut Recorder>) -> CoreResult<f64> {
        self.weights.reset(&self.cfg.scoring);
        let grid = CoreGrid::from_layout(layout, &self.cfg, &self.burnup)?;
        let mut sim = Simulator::new(grid, self.cfg.clone());

        let mut last = ScoreBreakdown {
            fitness: 0.0,
            energy_norm: 0.0,
            uniformity: 1.0,
            stability: 1.0,
            symmetry: 1.0,
            temp_penalty: 0.0,
            hotspot_penalty: 0.0,
            overheated_fraction: 0.0,
            healthy_fraction: 1.0,
        };
        for _ in 0..self.cfg.steps {
            let report = sim.step()?;
            last = score_grid(sim.grid(), &self.cfg.scoring, &mut self.weights);
            if let Some(rec) = recorder.as_deref_mut() {
                rec.record(
                    sim.grid(),
                    report.flux,
                    StepMeta {
                        step: report.step,
                        total_energy: report.total_energy,
                        temp_penalty: last.temp_penalty,
                        hotspot_penalty: last.hotspot_penalty,
                        symmetry: last.symmetry,
                        fitness: last.fitness,
                    },
                );
            }
        }

        if !last.fitness.is_finite() {
            return Err(CoreError::NumericalInvalid {
                quantity: "fitness",
                context: "aggregate over final grid state".to_string(),
                step: sim.current_step(),
            });
        }
        log::info!(
            "evaluated {}x{} layout over {} steps: fitness {:.4} (energy {:.4}, sym {:.3})",
            layout.width,
            layout.height,
            self.cfg.steps,
            last.fitness,
            last.energy_norm,
            last.symmetry
        );
        Ok(last.fitness)
    }
}
