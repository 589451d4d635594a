// ─────────────────────────────────────────────────────────────────────
// Corelat — Cell
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Polymorphic cell variants and their per-step state machines.
//!
//! Every grid position holds exactly one `Cell`. Updates read a
//! prior-step `CellSnapshot` of each neighbor, never a live neighbor,
//! so results do not depend on traversal order within a step.

use crate::burnup::BurnupModel;
use corelat_types::config::CoreConfig;
use corelat_types::layout::AssemblyKind;
use std::sync::Arc;

/// Neutron yield per unit fuel enrichment seeded into the flux field.
const FUEL_YIELD_PER_ENRICHMENT: f64 = 1.5;

/// Small constant neutron yield of a moderator.
const MODERATOR_YIELD: f64 = 0.1;

/// Per-kind flux absorption factors applied by the flux field model.
const ABSORPTION_FUEL: f64 = 0.7;
const ABSORPTION_MODERATOR: f64 = 0.3;
const ABSORPTION_CONTROL_ROD: f64 = 1.0;
const ABSORPTION_BLANK: f64 = 0.0;

/// Hot fuel passes on less flux: multiplier drops by this much per
/// Kelvin above ambient, floored at `FUEL_FLUX_TEMP_FLOOR`.
const FUEL_FLUX_TEMP_SLOPE: f64 = 0.0005;
const FUEL_FLUX_TEMP_FLOOR: f64 = 0.8;

/// Spent fuel passes on less flux: multiplier ramps from 0.8 (spent)
/// to 1.2 (fresh) with remaining life.
const FUEL_FLUX_BURN_BASE: f64 = 0.8;
const FUEL_FLUX_BURN_SLOPE: f64 = 0.4;

/// Read-only view of a cell as it was at the start of the step.
#[derive(Debug, Clone, Copy)]
pub struct CellSnapshot {
    pub kind: AssemblyKind,
    pub temperature: f64,
    pub life: f64,
    pub enrichment: f64,
    /// Moderator heating / control-rod cooling influence; 0 otherwise.
    pub thermal_power: f64,
    /// Control-rod insertion level; 0 otherwise.
    pub insertion_level: f64,
}

impl CellSnapshot {
    pub fn is_fuel(&self) -> bool {
        self.kind == AssemblyKind::Fuel
    }

    /// How strongly this cell attenuates or amplifies flux reaching a
    /// neighbor. Always positive.
    pub fn flux_multiplier(&self, cfg: &CoreConfig) -> f64 {
        match self.kind {
            AssemblyKind::ControlRod => 1.0 - self.insertion_level * cfg.control_rod.damping,
            AssemblyKind::Moderator => cfg.moderator.flux_multiplier,
            AssemblyKind::Fuel => {
                let temp_penalty = (1.0
                    - FUEL_FLUX_TEMP_SLOPE * (self.temperature - cfg.thermal.t_ambient))
                    .max(FUEL_FLUX_TEMP_FLOOR);
                let burn_penalty = FUEL_FLUX_BURN_BASE + FUEL_FLUX_BURN_SLOPE * self.life;
                burn_penalty * temp_penalty
            }
            AssemblyKind::Blank => 1.0,
        }
    }
}

/// Fuel assembly state.
#[derive(Debug, Clone)]
pub struct Fuel {
    pub enrichment: f64,
    pub temperature: f64,
    pub life: f64,
    pub energy_output: f64,
    pub total_energy: f64,
    /// Steps since placement; drives the startup ramp.
    pub age: u64,
    pub is_movable: bool,
    burnup: Arc<dyn BurnupModel>,
}

/// Moderator state. `thermal_power` self-tunes against the local fuel
/// temperature.
#[derive(Debug, Clone)]
pub struct Moderator {
    pub temperature: f64,
    pub thermal_power: f64,
}

/// Control rod state. `insertion_level` self-tunes against the local
/// fuel temperature.
#[derive(Debug, Clone)]
pub struct ControlRod {
    pub temperature: f64,
    pub insertion_level: f64,
    pub thermal_power: f64,
}

/// Blank position. Terminal no-op variant.
#[derive(Debug, Clone)]
pub struct Blank {
    pub temperature: f64,
}

/// One grid position. Closed set of variants; dispatch is by match,
/// never by downcasting.
#[derive(Debug, Clone)]
pub enum Cell {
    Fuel(Fuel),
    Moderator(Moderator),
    ControlRod(ControlRod),
    Blank(Blank),
}

impl Cell {
    pub fn fuel(enrichment: f64, life: f64, cfg: &CoreConfig, burnup: Arc<dyn BurnupModel>) -> Self {
        Cell::Fuel(Fuel {
            enrichment,
            temperature: cfg.fuel.initial_temperature,
            life: life.clamp(0.0, 1.0),
            energy_output: 0.0,
            total_energy: 0.0,
            age: 0,
            is_movable: true,
            burnup,
        })
    }

    pub fn moderator(cfg: &CoreConfig) -> Self {
        Cell::Moderator(Moderator {
            temperature: cfg.moderator.initial_temperature,
            thermal_power: cfg.moderator.initial_power,
        })
    }

    pub fn control_rod(cfg: &CoreConfig) -> Self {
        Cell::ControlRod(ControlRod {
            temperature: cfg.control_rod.initial_temperature,
            insertion_level: cfg.control_rod.initial_insertion,
            thermal_power: cfg.control_rod.thermal_power,
        })
    }

    pub fn blank(cfg: &CoreConfig) -> Self {
        Cell::Blank(Blank {
            temperature: cfg.thermal.t_ambient,
        })
    }

    pub fn kind(&self) -> AssemblyKind {
        match self {
            Cell::Fuel(_) => AssemblyKind::Fuel,
            Cell::Moderator(_) => AssemblyKind::Moderator,
            Cell::ControlRod(_) => AssemblyKind::ControlRod,
            Cell::Blank(_) => AssemblyKind::Blank,
        }
    }

    pub fn temperature(&self) -> f64 {
        match self {
            Cell::Fuel(f) => f.temperature,
            Cell::Moderator(m) => m.temperature,
            Cell::ControlRod(r) => r.temperature,
            Cell::Blank(b) => b.temperature,
        }
    }

    /// Remaining fuel life; non-fuel cells never wear out.
    pub fn life(&self) -> f64 {
        match self {
            Cell::Fuel(f) => f.life,
            _ => 1.0,
        }
    }

    pub fn enrichment(&self) -> f64 {
        match self {
            Cell::Fuel(f) => f.enrichment,
            _ => 0.0,
        }
    }

    pub fn energy_output(&self) -> f64 {
        match self {
            Cell::Fuel(f) => f.energy_output,
            _ => 0.0,
        }
    }

    pub fn total_energy(&self) -> f64 {
        match self {
            Cell::Fuel(f) => f.total_energy,
            _ => 0.0,
        }
    }

    pub fn is_movable(&self) -> bool {
        match self {
            Cell::Fuel(f) => f.is_movable,
            _ => false,
        }
    }

    /// Neutron source strength seeded into the flux field.
    pub fn neutron_yield(&self) -> f64 {
        match self {
            Cell::Fuel(f) => f.enrichment * FUEL_YIELD_PER_ENRICHMENT,
            Cell::Moderator(_) => MODERATOR_YIELD,
            Cell::ControlRod(_) | Cell::Blank(_) => 0.0,
        }
    }

    /// Fraction of the diffused flux this cell absorbs.
    pub fn absorption_factor(&self) -> f64 {
        match self {
            Cell::Fuel(_) => ABSORPTION_FUEL,
            Cell::Moderator(_) => ABSORPTION_MODERATOR,
            Cell::ControlRod(_) => ABSORPTION_CONTROL_ROD,
            Cell::Blank(_) => ABSORPTION_BLANK,
        }
    }

    /// Capture the prior-step view used by neighbors during this step.
    pub fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            kind: self.kind(),
            temperature: self.temperature(),
            life: self.life(),
            enrichment: self.enrichment(),
            thermal_power: match self {
                Cell::Moderator(m) => m.thermal_power,
                Cell::ControlRod(r) => r.thermal_power,
                _ => 0.0,
            },
            insertion_level: match self {
                Cell::ControlRod(r) => r.insertion_level,
                _ => 0.0,
            },
        }
    }

    /// Advance this cell by one time step. `neighbors` are prior-step
    /// snapshots paired with adjacency weights; `flux` is this cell's
    /// value from the current flux field.
    pub fn update(&mut self, neighbors: &[(CellSnapshot, f64)], flux: f64, cfg: &CoreConfig) {
        match self {
            Cell::Blank(b) => b.temperature = cfg.thermal.t_ambient,
            Cell::Moderator(m) => m.update(neighbors, cfg),
            Cell::ControlRod(r) => r.update(neighbors, cfg),
            Cell::Fuel(f) => f.update(neighbors, flux, cfg),
        }
    }
}

/// Weighted average temperature over fuel neighbors, or `None` when
/// there is no fuel in the neighborhood.
fn weighted_fuel_temperature(neighbors: &[(CellSnapshot, f64)]) -> Option<f64> {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for (n, w) in neighbors {
        if n.is_fuel() {
            weighted_sum += n.temperature * w;
            total_weight += w;
        }
    }
    if total_weight > 0.0 {
        Some(weighted_sum / total_weight)
    } else {
        None
    }
}

impl Moderator {
    fn update(&mut self, neighbors: &[(CellSnapshot, f64)], cfg: &CoreConfig) {
        let m = &cfg.moderator;
        if let Some(avg_fuel_temp) = weighted_fuel_temperature(neighbors) {
            if avg_fuel_temp > m.fuel_temp_high {
                self.thermal_power = (self.thermal_power - m.power_step).max(m.power_min);
            } else if avg_fuel_temp < m.fuel_temp_low {
                self.thermal_power = (self.thermal_power + m.power_step).min(m.power_max);
            }
        }
        self.temperature = m.operating_temperature;
    }
}

impl ControlRod {
    fn update(&mut self, neighbors: &[(CellSnapshot, f64)], cfg: &CoreConfig) {
        let r = &cfg.control_rod;
        self.temperature = r.operating_temperature;

        let Some(avg_fuel_temp) = weighted_fuel_temperature(neighbors) else {
            return;
        };
        if avg_fuel_temp > r.fuel_temp_high {
            self.insertion_level = (self.insertion_level + r.insertion_step).min(1.0);
        } else if avg_fuel_temp < r.fuel_temp_low {
            self.insertion_level = (self.insertion_level - r.insertion_step).max(0.0);
        }
    }
}

impl Fuel {
    fn update(&mut self, neighbors: &[(CellSnapshot, f64)], flux: f64, cfg: &CoreConfig) {
        let fc = &cfg.fuel;
        self.age += 1;

        // Thermal coupling: moderators add heat, control rods remove it.
        let mut temp_change = 0.0;
        for (n, w) in neighbors {
            match n.kind {
                AssemblyKind::Moderator => temp_change += n.thermal_power * fc.heat_transfer * w,
                AssemblyKind::ControlRod => temp_change -= n.thermal_power * fc.heat_transfer * w,
                _ => {}
            }
        }
        self.temperature += temp_change;

        // Cooling reference: mean fuel-neighbor temperature, ambient
        // when the cell sits alone.
        let fuel_temps: Vec<f64> = neighbors
            .iter()
            .filter(|(n, _)| n.is_fuel())
            .map(|(n, _)| n.temperature)
            .collect();
        let avg_temp = if fuel_temps.is_empty() {
            cfg.thermal.t_ambient
        } else {
            fuel_temps.iter().sum::<f64>() / fuel_temps.len() as f64
        };

        // Each neighbor attenuates or amplifies local flux; the weight
        // enters as an exponent so a diagonal neighbor counts less.
        let mut flux_modifier = 1.0;
        for (n, w) in neighbors {
            flux_modifier *= n.flux_multiplier(cfg).powf(*w);
        }
        flux_modifier = flux_modifier.max(fc.flux_multiplier_floor);

        // Startup transient: sigmoid ramp over the first ~2·midpoint steps.
        let age_factor = 1.0
            / (1.0 + (-fc.age_ramp_steepness * (self.age as f64 - fc.age_ramp_midpoint)).exp());

        let life_efficiency = 1.0 - (-fc.life_efficiency_rate * self.life).exp();

        let core_flux = flux * fc.flux_scale;
        let local_flux = core_flux * flux_modifier * age_factor * life_efficiency;
        let flux_factor = if core_flux > 0.0 {
            (local_flux / core_flux).min(1.0)
        } else {
            0.0
        };

        let enrichment_term =
            fc.gamma_enrichment * self.enrichment / (1.0 + fc.gamma_enrichment * self.enrichment);
        let temp_factor = (-0.5 * ((self.temperature - fc.t_opt) / fc.sigma_t).powi(2)).exp();

        self.energy_output =
            flux_factor * self.life * enrichment_term * temp_factor * fc.energy_constant;

        let heating = self.energy_output;
        let cooling = fc.cooling_coeff * (self.temperature - avg_temp);
        let delta_t = (heating - cooling) / fc.thermal_capacity;
        self.temperature = (self.temperature + delta_t).clamp(cfg.thermal.t_min, cfg.thermal.t_max);

        let burnup = Arc::clone(&self.burnup);
        let life_loss = burnup.life_loss(self, flux, cfg).max(0.0);
        self.life = (self.life - life_loss).max(0.0);

        self.total_energy += self.energy_output;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::burnup::{HeuristicBurnup, PhysicsBurnup};

    fn cfg() -> CoreConfig {
        CoreConfig::default()
    }

    fn heuristic() -> Arc<dyn BurnupModel> {
        Arc::new(HeuristicBurnup)
    }

    fn fuel_snapshot(temperature: f64, life: f64) -> CellSnapshot {
        CellSnapshot {
            kind: AssemblyKind::Fuel,
            temperature,
            life,
            enrichment: 0.03,
            thermal_power: 0.0,
            insertion_level: 0.0,
        }
    }

    #[test]
    fn test_blank_resets_to_ambient() {
        let cfg = cfg();
        let mut cell = Cell::blank(&cfg);
        if let Cell::Blank(b) = &mut cell {
            b.temperature = 950.0;
        }
        let hot = [(fuel_snapshot(1800.0, 1.0), 1.0)];
        cell.update(&hot, 1.0, &cfg);
        assert!(
            (cell.temperature() - 300.0).abs() < 1e-12,
            "Blank must return to ambient regardless of neighbors"
        );
        assert_eq!(cell.energy_output(), 0.0);
    }

    #[test]
    fn test_moderator_power_ramps_up_when_fuel_cold() {
        let cfg = cfg();
        let mut cell = Cell::moderator(&cfg);
        let cold = [(fuel_snapshot(800.0, 1.0), 1.0)];
        cell.update(&cold, 1.0, &cfg);
        if let Cell::Moderator(m) = &cell {
            assert!(
                (m.thermal_power - 1.1).abs() < 1e-12,
                "Power should step up below the low threshold: {}",
                m.thermal_power
            );
            assert!((m.temperature - 320.0).abs() < 1e-12);
        } else {
            panic!("kind changed");
        }
    }

    #[test]
    fn test_moderator_power_bounded() {
        let cfg = cfg();
        let mut cell = Cell::moderator(&cfg);
        let hot = [(fuel_snapshot(1800.0, 1.0), 1.0)];
        for _ in 0..50 {
            cell.update(&hot, 1.0, &cfg);
        }
        if let Cell::Moderator(m) = &cell {
            assert!(
                (m.thermal_power - cfg.moderator.power_min).abs() < 1e-12,
                "Power must bottom out at the configured minimum"
            );
        }
        let cold = [(fuel_snapshot(500.0, 1.0), 1.0)];
        for _ in 0..50 {
            cell.update(&cold, 1.0, &cfg);
        }
        if let Cell::Moderator(m) = &cell {
            assert!(
                (m.thermal_power - cfg.moderator.power_max).abs() < 1e-12,
                "Power must top out at the configured maximum"
            );
        }
    }

    #[test]
    fn test_control_rod_inserts_when_surrounded_by_hot_fuel() {
        let cfg = cfg();
        let mut cell = Cell::control_rod(&cfg);
        let neighbors: Vec<_> = (0..4)
            .map(|_| (fuel_snapshot(1700.0, 1.0), 1.0))
            .chain((0..4).map(|_| (fuel_snapshot(1700.0, 1.0), 0.4)))
            .collect();
        cell.update(&neighbors, 1.0, &cfg);
        if let Cell::ControlRod(r) = &cell {
            assert!(
                (r.insertion_level - 0.55).abs() < 1e-12,
                "Insertion must move toward 1.0: {}",
                r.insertion_level
            );
        }
        // Keep pushing: capped at full insertion
        for _ in 0..20 {
            cell.update(&neighbors, 1.0, &cfg);
        }
        if let Cell::ControlRod(r) = &cell {
            assert!((r.insertion_level - 1.0).abs() < 1e-12, "Capped at 1.0");
        }
    }

    #[test]
    fn test_control_rod_withdraws_when_fuel_cold() {
        let cfg = cfg();
        let mut cell = Cell::control_rod(&cfg);
        let cold = [(fuel_snapshot(700.0, 1.0), 1.0)];
        for _ in 0..20 {
            cell.update(&cold, 1.0, &cfg);
        }
        if let Cell::ControlRod(r) = &cell {
            assert!((r.insertion_level - 0.0).abs() < 1e-12, "Floored at 0.0");
        }
    }

    #[test]
    fn test_control_rod_holds_without_fuel_neighbors() {
        let cfg = cfg();
        let mut cell = Cell::control_rod(&cfg);
        let non_fuel = [(
            CellSnapshot {
                kind: AssemblyKind::Blank,
                temperature: 300.0,
                life: 1.0,
                enrichment: 0.0,
                thermal_power: 0.0,
                insertion_level: 0.0,
            },
            1.0,
        )];
        cell.update(&non_fuel, 1.0, &cfg);
        if let Cell::ControlRod(r) = &cell {
            assert!(
                (r.insertion_level - cfg.control_rod.initial_insertion).abs() < 1e-12,
                "No fuel feedback means no insertion change"
            );
            assert!((r.temperature - cfg.control_rod.operating_temperature).abs() < 1e-12);
        }
    }

    #[test]
    fn test_fuel_produces_energy_and_burns() {
        let cfg = cfg();
        let mut cell = Cell::fuel(0.03, 1.0, &cfg, heuristic());
        let neighbors: Vec<_> = (0..4)
            .map(|_| (fuel_snapshot(800.0, 1.0), 1.0))
            .chain((0..4).map(|_| (fuel_snapshot(800.0, 1.0), 0.4)))
            .collect();
        cell.update(&neighbors, 1.0, &cfg);
        assert!(
            cell.energy_output() > 0.0,
            "Fuel at 800K with flux 1.0 must produce energy: {}",
            cell.energy_output()
        );
        assert!(
            cell.life() < 1.0,
            "Life must be consumed after one step: {}",
            cell.life()
        );
        assert!((cell.total_energy() - cell.energy_output()).abs() < 1e-12);
    }

    #[test]
    fn test_fuel_isolated_uses_ambient_fallback() {
        let cfg = cfg();
        let mut cell = Cell::fuel(0.03, 1.0, &cfg, heuristic());
        // No neighbors at all: cooling references ambient, no panic.
        cell.update(&[], 1.0, &cfg);
        assert!(cell.temperature().is_finite());
        assert!(cell.temperature() < cfg.fuel.initial_temperature);
    }

    #[test]
    fn test_fuel_zero_flux_produces_nothing() {
        let cfg = cfg();
        let mut cell = Cell::fuel(0.045, 1.0, &cfg, heuristic());
        cell.update(&[], 0.0, &cfg);
        assert_eq!(cell.energy_output(), 0.0);
        assert_eq!(cell.total_energy(), 0.0);
    }

    #[test]
    fn test_fuel_bounds_hold_over_many_steps() {
        let cfg = cfg();
        for burnup in [
            Arc::new(HeuristicBurnup) as Arc<dyn BurnupModel>,
            Arc::new(PhysicsBurnup) as Arc<dyn BurnupModel>,
        ] {
            let mut cell = Cell::fuel(0.045, 1.0, &cfg, burnup);
            let neighbors = [(fuel_snapshot(1900.0, 1.0), 1.0)];
            let mut prev_total = 0.0;
            for _ in 0..500 {
                cell.update(&neighbors, 1.0, &cfg);
                assert!((0.0..=1.0).contains(&cell.life()), "life out of range");
                assert!(
                    cell.temperature() >= cfg.thermal.t_min
                        && cell.temperature() <= cfg.thermal.t_max,
                    "temperature out of range: {}",
                    cell.temperature()
                );
                assert!(cell.total_energy() >= prev_total, "total energy decreased");
                prev_total = cell.total_energy();
            }
        }
    }

    #[test]
    fn test_flux_multiplier_always_positive() {
        let cfg = cfg();
        let rod = CellSnapshot {
            kind: AssemblyKind::ControlRod,
            temperature: 450.0,
            life: 1.0,
            enrichment: 0.0,
            thermal_power: 1.0,
            insertion_level: 1.0,
        };
        // Fully inserted rod still lets a sliver of flux through.
        assert!(rod.flux_multiplier(&cfg) > 0.0);
        let spent_hot = fuel_snapshot(2000.0, 0.0);
        assert!(spent_hot.flux_multiplier(&cfg) > 0.0);
    }
}
