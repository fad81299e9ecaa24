use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::world::{Atmosphere, Gas, Grid, LifeForm, TileCover, World, WorldParams};

fn default_seed() -> u64 {
    42
}

fn default_report_interval() -> u64 {
    25
}

fn default_width() -> usize {
    128
}

fn default_height() -> usize {
    64
}

fn default_max_altitude() -> f64 {
    10000.0
}

fn default_sea_level() -> f64 {
    1000.0
}

fn default_erosion_rate() -> f64 {
    0.002
}

fn default_full_luminosity_heat() -> f64 {
    100.0
}

fn default_polar_luminosity() -> f64 {
    0.35
}

fn default_freezing_point() -> f64 {
    40.0
}

fn default_heat_inertia() -> f64 {
    0.8
}

fn default_water_reflectivity() -> f64 {
    0.1
}

fn default_ice_reflectivity() -> f64 {
    0.25
}

fn default_gas_loss_rate() -> f64 {
    0.001
}

fn default_carbon_retention() -> f64 {
    0.0005
}

fn default_vapor_retention() -> f64 {
    0.002
}

fn default_vapour_per_water_tile() -> f64 {
    100.0
}

fn default_eruptions_per_tick() -> u32 {
    1
}

fn default_min_upthrust() -> f64 {
    500.0
}

fn default_upthrust_variation() -> f64 {
    1000.0
}

fn default_outgassing_carbon() -> f64 {
    2.0
}

fn default_outgassing_nitrogen() -> f64 {
    4.0
}

fn default_outgassing_methane() -> f64 {
    0.1
}

fn default_life() -> Vec<LifeFormConfig> {
    vec![LifeFormConfig::default()]
}

fn default_habitat() -> TileCover {
    TileCover::Water
}

fn default_max_heat() -> f64 {
    120.0
}

fn default_intake_gas() -> Gas {
    Gas::CarbonDioxide
}

fn default_exhale_gas() -> Gas {
    Gas::Oxygen
}

fn default_reproduction_rate() -> f64 {
    0.05
}

fn default_intake_per_unit() -> f64 {
    0.002
}

fn default_exhale_per_unit() -> f64 {
    0.0015
}

fn default_capacity_per_energy() -> f64 {
    5.0
}

fn default_spawn_heat_min() -> f64 {
    55.0
}

fn default_spawn_probability() -> f64 {
    0.0001
}

fn default_diffusion_floor() -> f64 {
    2.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default = "default_report_interval")]
    pub report_interval_ticks: u64,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub terrain: TerrainConfig,
    #[serde(default)]
    pub climate: ClimateConfig,
    #[serde(default)]
    pub volcanism: VolcanismConfig,
    #[serde(default)]
    pub atmosphere: AtmosphereConfig,
    #[serde(default = "default_life")]
    pub life: Vec<LifeFormConfig>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "default".into(),
            description: None,
            seed: default_seed(),
            ticks: None,
            report_interval_ticks: default_report_interval(),
            grid: GridConfig::default(),
            terrain: TerrainConfig::default(),
            climate: ClimateConfig::default(),
            volcanism: VolcanismConfig::default(),
            atmosphere: AtmosphereConfig::default(),
            life: default_life(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TerrainConfig {
    #[serde(default = "default_max_altitude")]
    pub max_altitude: f64,
    #[serde(default = "default_sea_level")]
    pub sea_level: f64,
    #[serde(default = "default_erosion_rate")]
    pub erosion_rate: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            max_altitude: default_max_altitude(),
            sea_level: default_sea_level(),
            erosion_rate: default_erosion_rate(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClimateConfig {
    #[serde(default = "default_full_luminosity_heat")]
    pub full_luminosity_heat: f64,
    #[serde(default = "default_polar_luminosity")]
    pub polar_luminosity: f64,
    #[serde(default = "default_freezing_point")]
    pub freezing_point: f64,
    #[serde(default = "default_heat_inertia")]
    pub heat_inertia: f64,
    #[serde(default = "default_water_reflectivity")]
    pub water_reflectivity: f64,
    #[serde(default = "default_ice_reflectivity")]
    pub ice_reflectivity: f64,
    #[serde(default = "default_gas_loss_rate")]
    pub gas_loss_rate: f64,
    #[serde(default = "default_carbon_retention")]
    pub carbon_retention: f64,
    #[serde(default = "default_vapor_retention")]
    pub vapor_retention: f64,
    #[serde(default = "default_vapour_per_water_tile")]
    pub vapour_per_water_tile: f64,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            full_luminosity_heat: default_full_luminosity_heat(),
            polar_luminosity: default_polar_luminosity(),
            freezing_point: default_freezing_point(),
            heat_inertia: default_heat_inertia(),
            water_reflectivity: default_water_reflectivity(),
            ice_reflectivity: default_ice_reflectivity(),
            gas_loss_rate: default_gas_loss_rate(),
            carbon_retention: default_carbon_retention(),
            vapor_retention: default_vapor_retention(),
            vapour_per_water_tile: default_vapour_per_water_tile(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolcanismConfig {
    #[serde(default = "default_eruptions_per_tick")]
    pub eruptions_per_tick: u32,
    #[serde(default = "default_min_upthrust")]
    pub min_upthrust: f64,
    #[serde(default = "default_upthrust_variation")]
    pub upthrust_variation: f64,
    #[serde(default)]
    pub outgassing: OutgassingConfig,
}

impl Default for VolcanismConfig {
    fn default() -> Self {
        Self {
            eruptions_per_tick: default_eruptions_per_tick(),
            min_upthrust: default_min_upthrust(),
            upthrust_variation: default_upthrust_variation(),
            outgassing: OutgassingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutgassingConfig {
    #[serde(default = "default_outgassing_carbon")]
    pub carbon_dioxide: f64,
    #[serde(default = "default_outgassing_nitrogen")]
    pub nitrogen: f64,
    #[serde(default = "default_outgassing_methane")]
    pub methane: f64,
}

impl Default for OutgassingConfig {
    fn default() -> Self {
        Self {
            carbon_dioxide: default_outgassing_carbon(),
            nitrogen: default_outgassing_nitrogen(),
            methane: default_outgassing_methane(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AtmosphereConfig {
    #[serde(default)]
    pub nitrogen: f64,
    #[serde(default)]
    pub oxygen: f64,
    #[serde(default)]
    pub carbon_dioxide: f64,
    #[serde(default)]
    pub methane: f64,
    #[serde(default)]
    pub water_vapour: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LifeFormConfig {
    pub name: String,
    #[serde(default = "default_habitat")]
    pub habitat: TileCover,
    #[serde(default)]
    pub min_heat: Option<f64>,
    #[serde(default = "default_max_heat")]
    pub max_heat: f64,
    #[serde(default = "default_intake_gas")]
    pub intake_gas: Gas,
    #[serde(default = "default_exhale_gas")]
    pub exhale_gas: Gas,
    #[serde(default)]
    pub min_intake_share: f64,
    #[serde(default = "default_reproduction_rate")]
    pub reproduction_rate: f64,
    #[serde(default = "default_intake_per_unit")]
    pub intake_per_unit: f64,
    #[serde(default = "default_exhale_per_unit")]
    pub exhale_per_unit: f64,
    #[serde(default = "default_capacity_per_energy")]
    pub capacity_per_energy: f64,
    #[serde(default = "default_spawn_heat_min")]
    pub spawn_heat_min: f64,
    #[serde(default = "default_spawn_probability")]
    pub spawn_probability: f64,
    #[serde(default = "default_diffusion_floor")]
    pub diffusion_floor: f64,
}

impl Default for LifeFormConfig {
    fn default() -> Self {
        Self {
            name: "cyanophyte".into(),
            habitat: default_habitat(),
            min_heat: None,
            max_heat: default_max_heat(),
            intake_gas: default_intake_gas(),
            exhale_gas: default_exhale_gas(),
            min_intake_share: 0.0,
            reproduction_rate: default_reproduction_rate(),
            intake_per_unit: default_intake_per_unit(),
            exhale_per_unit: default_exhale_per_unit(),
            capacity_per_energy: default_capacity_per_energy(),
            spawn_heat_min: default_spawn_heat_min(),
            spawn_probability: default_spawn_probability(),
            diffusion_floor: default_diffusion_floor(),
        }
    }
}

impl LifeFormConfig {
    fn to_form(&self) -> LifeForm {
        LifeForm {
            name: self.name.clone(),
            habitat: self.habitat,
            min_heat: self.min_heat,
            max_heat: self.max_heat,
            intake_gas: self.intake_gas,
            exhale_gas: self.exhale_gas,
            min_intake_share: self.min_intake_share,
            reproduction_rate: self.reproduction_rate,
            intake_per_unit: self.intake_per_unit,
            exhale_per_unit: self.exhale_per_unit,
            capacity_per_energy: self.capacity_per_energy,
            spawn_heat_min: self.spawn_heat_min,
            spawn_probability: self.spawn_probability,
            diffusion_floor: self.diffusion_floor,
        }
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        if self.habitat == TileCover::NotComputed {
            return Err(ScenarioError::InvalidLifeForm {
                name: self.name.clone(),
                problem: "habitat must be rock, water or ice".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ScenarioError::InvalidLifeForm {
                name: self.name.clone(),
                problem: format!(
                    "spawn_probability must lie in [0, 1], got {}",
                    self.spawn_probability
                ),
            });
        }
        let non_negative = [
            ("min_intake_share", self.min_intake_share),
            ("reproduction_rate", self.reproduction_rate),
            ("intake_per_unit", self.intake_per_unit),
            ("exhale_per_unit", self.exhale_per_unit),
            ("capacity_per_energy", self.capacity_per_energy),
            ("diffusion_floor", self.diffusion_floor),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ScenarioError::InvalidLifeForm {
                    name: self.name.clone(),
                    problem: format!("{field} must not be negative, got {value}"),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("grid must have at least one tile, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("{field} must lie in [0, 1], got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    NegativeValue { field: &'static str, value: f64 },
    #[error("life form '{name}': {problem}")]
    InvalidLifeForm { name: String, problem: String },
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario
            .validate()
            .with_context(|| format!("Invalid scenario {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ScenarioError::EmptyGrid {
                width: self.grid.width,
                height: self.grid.height,
            });
        }
        let rates = [
            ("terrain.erosion_rate", self.terrain.erosion_rate),
            ("climate.polar_luminosity", self.climate.polar_luminosity),
            ("climate.heat_inertia", self.climate.heat_inertia),
            ("climate.water_reflectivity", self.climate.water_reflectivity),
            ("climate.ice_reflectivity", self.climate.ice_reflectivity),
            ("climate.gas_loss_rate", self.climate.gas_loss_rate),
        ];
        for (field, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScenarioError::RateOutOfRange { field, value });
            }
        }
        let magnitudes = [
            ("terrain.max_altitude", self.terrain.max_altitude),
            ("terrain.sea_level", self.terrain.sea_level),
            (
                "climate.full_luminosity_heat",
                self.climate.full_luminosity_heat,
            ),
            ("climate.carbon_retention", self.climate.carbon_retention),
            ("climate.vapor_retention", self.climate.vapor_retention),
            (
                "climate.vapour_per_water_tile",
                self.climate.vapour_per_water_tile,
            ),
            ("volcanism.min_upthrust", self.volcanism.min_upthrust),
            (
                "volcanism.upthrust_variation",
                self.volcanism.upthrust_variation,
            ),
            (
                "volcanism.outgassing.carbon_dioxide",
                self.volcanism.outgassing.carbon_dioxide,
            ),
            (
                "volcanism.outgassing.nitrogen",
                self.volcanism.outgassing.nitrogen,
            ),
            (
                "volcanism.outgassing.methane",
                self.volcanism.outgassing.methane,
            ),
            ("atmosphere.nitrogen", self.atmosphere.nitrogen),
            ("atmosphere.oxygen", self.atmosphere.oxygen),
            ("atmosphere.carbon_dioxide", self.atmosphere.carbon_dioxide),
            ("atmosphere.methane", self.atmosphere.methane),
            ("atmosphere.water_vapour", self.atmosphere.water_vapour),
        ];
        for (field, value) in magnitudes {
            if value < 0.0 {
                return Err(ScenarioError::NegativeValue { field, value });
            }
        }
        for form in &self.life {
            form.validate()?;
        }
        Ok(())
    }

    pub fn build_world(&self) -> World {
        let params = WorldParams {
            max_altitude: self.terrain.max_altitude,
            sea_level: self.terrain.sea_level,
            erosion_rate: self.terrain.erosion_rate,
            full_luminosity_heat: self.climate.full_luminosity_heat,
            polar_luminosity: self.climate.polar_luminosity,
            freezing_point: self.climate.freezing_point,
            heat_inertia: self.climate.heat_inertia,
            water_reflectivity: self.climate.water_reflectivity,
            ice_reflectivity: self.climate.ice_reflectivity,
            gas_loss_rate: self.climate.gas_loss_rate,
            carbon_retention: self.climate.carbon_retention,
            vapor_retention: self.climate.vapor_retention,
            vapour_per_water_tile: self.climate.vapour_per_water_tile,
            eruptions_per_tick: self.volcanism.eruptions_per_tick,
            min_upthrust: self.volcanism.min_upthrust,
            upthrust_variation: self.volcanism.upthrust_variation,
            outgassing_carbon: self.volcanism.outgassing.carbon_dioxide,
            outgassing_nitrogen: self.volcanism.outgassing.nitrogen,
            outgassing_methane: self.volcanism.outgassing.methane,
        };
        let life: Vec<LifeForm> = self.life.iter().map(LifeFormConfig::to_form).collect();
        let grid = Grid::new(
            self.grid.width,
            self.grid.height,
            self.climate.polar_luminosity,
            life.len(),
        );
        let atmosphere = Atmosphere {
            nitrogen: self.atmosphere.nitrogen,
            oxygen: self.atmosphere.oxygen,
            carbon_dioxide: self.atmosphere.carbon_dioxide,
            methane: self.atmosphere.methane,
            water_vapour: self.atmosphere.water_vapour,
        };
        World::new(params, life, grid, atmosphere)
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.or(self.ticks).unwrap_or(2000)
    }
}
