// ─────────────────────────────────────────────────────────────────────
// Corelat — Config
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Simulation and scoring configuration.
//!
//! Every tunable constant of the model lives here rather than as a
//! hard-coded magic number, so alternative parameterizations are a
//! config file away. All sections are optional in JSON; missing
//! sections fall back to the canonical defaults below.

use serde::{Deserialize, Serialize};

/// Top-level configuration for one simulation / evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub thermal: ThermalConfig,
    pub fuel: FuelConfig,
    pub moderator: ModeratorConfig,
    pub control_rod: ControlRodConfig,
    pub burnup: BurnupConfig,
    pub flux: FluxConfig,
    pub scoring: ScoringConfig,
    /// Number of discrete time steps per evaluation run.
    pub steps: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            thermal: ThermalConfig::default(),
            fuel: FuelConfig::default(),
            moderator: ModeratorConfig::default(),
            control_rod: ControlRodConfig::default(),
            burnup: BurnupConfig::default(),
            flux: FluxConfig::default(),
            scoring: ScoringConfig::default(),
            steps: 100,
        }
    }
}

impl CoreConfig {
    /// Load from a JSON config file.
    pub fn from_file(path: &str) -> crate::error::CoreResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Global temperature bounds, shared by every cell kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalConfig {
    /// Lower clamp for any cell temperature [K].
    pub t_min: f64,
    /// Upper clamp for any cell temperature [K].
    pub t_max: f64,
    /// Ambient baseline [K]; blank cells reset here, and it is the
    /// documented fallback when a cell has no valid neighbors.
    pub t_ambient: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        ThermalConfig {
            t_min: 300.0,
            t_max: 2000.0,
            t_ambient: 300.0,
        }
    }
}

/// Fuel assembly physics parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelConfig {
    /// Fuel temperature at placement [K].
    pub initial_temperature: f64,
    /// Optimal operating temperature for energy production [K].
    pub t_opt: f64,
    /// Spread of the Gaussian temperature factor [K].
    pub sigma_t: f64,
    /// Peak energy output scale per step.
    pub energy_constant: f64,
    /// Cooling coefficient toward the neighborhood average temperature.
    pub cooling_coeff: f64,
    /// Thermal capacity dividing the net heating/cooling balance.
    pub thermal_capacity: f64,
    /// Saturation constant for the enrichment term γe/(1+γe).
    pub gamma_enrichment: f64,
    /// Steepness of the sigmoid startup ramp (per step).
    pub age_ramp_steepness: f64,
    /// Midpoint of the sigmoid startup ramp [steps].
    pub age_ramp_midpoint: f64,
    /// Rate of the saturating life-efficiency term 1 - exp(-rate·life).
    pub life_efficiency_rate: f64,
    /// Heat transferred per unit of neighbor thermal power per step [K].
    pub heat_transfer: f64,
    /// Scale mapping the normalized flux field value to core flux.
    pub flux_scale: f64,
    /// Floor for the combined neighbor flux multiplier (underflow guard).
    pub flux_multiplier_floor: f64,
    /// Enrichment used when a layout fuel entry omits it.
    pub default_enrichment: f64,
}

impl Default for FuelConfig {
    fn default() -> Self {
        FuelConfig {
            initial_temperature: 800.0,
            t_opt: 900.0,
            sigma_t: 200.0,
            energy_constant: 100.0,
            cooling_coeff: 0.1,
            thermal_capacity: 5.0,
            gamma_enrichment: 50.0,
            age_ramp_steepness: 0.05,
            age_ramp_midpoint: 50.0,
            life_efficiency_rate: 3.0,
            heat_transfer: 5.0,
            flux_scale: 100.0,
            flux_multiplier_floor: 1e-6,
            default_enrichment: 0.032,
        }
    }
}

/// Moderator parameters. The moderator self-tunes its thermal power
/// against the weighted-average temperature of neighboring fuel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeratorConfig {
    /// Fixed operating temperature the moderator resets to [K].
    pub operating_temperature: f64,
    /// Temperature at placement [K].
    pub initial_temperature: f64,
    /// Flux amplification seen by neighbors (> 1).
    pub flux_multiplier: f64,
    /// Thermal power adjustment per step.
    pub power_step: f64,
    /// Lower bound on thermal power.
    pub power_min: f64,
    /// Upper bound on thermal power.
    pub power_max: f64,
    /// Below this fuel temperature the moderator ramps power up [K].
    pub fuel_temp_low: f64,
    /// Above this fuel temperature the moderator ramps power down [K].
    pub fuel_temp_high: f64,
    /// Thermal power at placement.
    pub initial_power: f64,
}

impl Default for ModeratorConfig {
    fn default() -> Self {
        ModeratorConfig {
            operating_temperature: 320.0,
            initial_temperature: 600.0,
            flux_multiplier: 1.1,
            power_step: 0.1,
            power_min: 0.1,
            power_max: 2.0,
            fuel_temp_low: 1000.0,
            fuel_temp_high: 1500.0,
            initial_power: 1.0,
        }
    }
}

/// Control rod parameters. Insertion self-tunes against the
/// weighted-average temperature of neighboring fuel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlRodConfig {
    /// Fixed operating temperature the rod resets to [K].
    pub operating_temperature: f64,
    /// Temperature at placement [K].
    pub initial_temperature: f64,
    /// Insertion level adjustment per step.
    pub insertion_step: f64,
    /// Flux damping at full insertion: multiplier = 1 - insertion·damping.
    pub damping: f64,
    /// Below this fuel temperature the rod withdraws [K].
    pub fuel_temp_low: f64,
    /// Above this fuel temperature the rod inserts further [K].
    pub fuel_temp_high: f64,
    /// Insertion level at placement, in [0, 1].
    pub initial_insertion: f64,
    /// Cooling influence on neighboring fuel.
    pub thermal_power: f64,
}

impl Default for ControlRodConfig {
    fn default() -> Self {
        ControlRodConfig {
            operating_temperature: 450.0,
            initial_temperature: 500.0,
            insertion_step: 0.05,
            damping: 0.7,
            fuel_temp_low: 1000.0,
            fuel_temp_high: 1600.0,
            initial_insertion: 0.5,
            thermal_power: 1.0,
        }
    }
}

/// Burnup strategy parameters, shared by both strategies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BurnupConfig {
    /// Base life-loss rate for the heuristic strategy (per step).
    pub base_rate: f64,
    /// Temperature above which the heuristic overheat multiplier kicks in [K].
    pub overheat_threshold: f64,
    /// Reference neutron flux Φ₀ [n/cm²/s].
    pub reference_flux: f64,
    /// U-235 fission cross-section [cm²] (585 barns).
    pub fission_cross_section: f64,
    /// Wall-clock seconds per time step (one day).
    pub seconds_per_step: f64,
    /// Ceiling on life consumed in a single step.
    pub max_loss_per_step: f64,
}

impl Default for BurnupConfig {
    fn default() -> Self {
        BurnupConfig {
            base_rate: 1e-5,
            overheat_threshold: 600.0,
            reference_flux: 1e14,
            fission_cross_section: 585e-24,
            seconds_per_step: 86_400.0,
            max_loss_per_step: 0.1,
        }
    }
}

/// Neutron flux field parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FluxConfig {
    /// Diffusion coefficient scaling the Laplacian spread.
    pub diffusion_coeff: f64,
}

impl Default for FluxConfig {
    fn default() -> Self {
        FluxConfig {
            diffusion_coeff: 0.2,
        }
    }
}

/// Scoring layer parameters: penalty thresholds, adaptive weight
/// policy, and fitness aggregation weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Fuel temperature limit before the exponential penalty applies [K].
    pub temp_limit: f64,
    /// Scale of the exponential temperature penalty [K].
    pub temp_scale: f64,
    /// Life difference between adjacent fuel cells before the hotspot
    /// penalty applies.
    pub hotspot_threshold: f64,
    /// Extra symmetry penalty per unit enrichment mismatch between
    /// mirrored fuel cells.
    pub enrichment_mismatch_weight: f64,
    /// Fraction of overheated fuel that triggers a temperature-weight nudge.
    pub overheat_trigger_fraction: f64,
    /// Fuel below this life fraction counts as degraded.
    pub low_life_threshold: f64,
    /// Healthy-fuel fraction below which the hotspot weight is nudged.
    pub healthy_fraction_trigger: f64,
    /// Multiplicative nudge applied to adaptive weights.
    pub weight_nudge: f64,
    /// Cap on any adaptive weight.
    pub weight_cap: f64,
    /// Initial adaptive weight for the temperature penalty.
    pub w_temp: f64,
    /// Initial adaptive weight for the hotspot penalty.
    pub w_hotspot: f64,
    /// Initial adaptive weight for the symmetry reward.
    pub w_symmetry: f64,
    /// Static fitness weight for normalized total energy.
    pub w_energy: f64,
    /// Static fitness weight for life uniformity.
    pub w_uniformity: f64,
    /// Static fitness weight for thermal stability.
    pub w_stability: f64,
    /// Normalization reference for total energy in the fitness sum.
    pub energy_reference: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            temp_limit: 620.0,
            temp_scale: 50.0,
            hotspot_threshold: 0.15,
            enrichment_mismatch_weight: 1.0,
            overheat_trigger_fraction: 0.2,
            low_life_threshold: 0.5,
            healthy_fraction_trigger: 0.5,
            weight_nudge: 1.1,
            weight_cap: 10.0,
            w_temp: 1.0,
            w_hotspot: 1.0,
            w_symmetry: 1.0,
            w_energy: 1.0,
            w_uniformity: 1.0,
            w_stability: 1.0,
            energy_reference: 1000.0,
        }
    }
}
