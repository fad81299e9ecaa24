use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gas {
    Nitrogen,
    Oxygen,
    CarbonDioxide,
    Methane,
    WaterVapour,
}

impl Gas {
    pub const ALL: [Gas; 5] = [
        Gas::Nitrogen,
        Gas::Oxygen,
        Gas::CarbonDioxide,
        Gas::Methane,
        Gas::WaterVapour,
    ];
}

/// Global gas reservoir shared by every tile. Quantities never go negative.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    pub nitrogen: f64,
    pub oxygen: f64,
    pub carbon_dioxide: f64,
    pub methane: f64,
    pub water_vapour: f64,
}

impl Atmosphere {
    pub fn quantity(&self, gas: Gas) -> f64 {
        match gas {
            Gas::Nitrogen => self.nitrogen,
            Gas::Oxygen => self.oxygen,
            Gas::CarbonDioxide => self.carbon_dioxide,
            Gas::Methane => self.methane,
            Gas::WaterVapour => self.water_vapour,
        }
    }

    pub fn add(&mut self, gas: Gas, amount: f64) {
        let slot = self.slot_mut(gas);
        *slot += amount.max(0.0);
    }

    pub fn remove(&mut self, gas: Gas, amount: f64) {
        let slot = self.slot_mut(gas);
        *slot = (*slot - amount.max(0.0)).max(0.0);
    }

    pub fn set(&mut self, gas: Gas, amount: f64) {
        *self.slot_mut(gas) = amount.max(0.0);
    }

    pub fn total(&self) -> f64 {
        Gas::ALL.iter().map(|gas| self.quantity(*gas)).sum()
    }

    fn slot_mut(&mut self, gas: Gas) -> &mut f64 {
        match gas {
            Gas::Nitrogen => &mut self.nitrogen,
            Gas::Oxygen => &mut self.oxygen,
            Gas::CarbonDioxide => &mut self.carbon_dioxide,
            Gas::Methane => &mut self.methane,
            Gas::WaterVapour => &mut self.water_vapour,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileCover {
    NotComputed,
    Rock,
    Water,
    Ice,
}

impl TileCover {
    /// Derived cover: land above the sea level is rock, the rest is open
    /// water or ice depending on heat.
    pub fn classify(altitude: f64, heat: f64, sea_level: f64, freezing_point: f64) -> Self {
        if altitude >= sea_level {
            TileCover::Rock
        } else if heat > freezing_point {
            TileCover::Water
        } else {
            TileCover::Ice
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tile {
    pub altitude: f64,
    pub base_luminosity: f64,
    pub heat: f64,
    pub cover: TileCover,
    pub populations: Vec<f64>,
}

impl Tile {
    fn new(base_luminosity: f64, forms: usize) -> Self {
        Self {
            altitude: 0.0,
            base_luminosity,
            heat: 0.0,
            cover: TileCover::NotComputed,
            populations: vec![0.0; forms],
        }
    }

    pub fn total_biomass(&self) -> f64 {
        self.populations.iter().sum()
    }
}

/// Row-major tile field. The horizontal axis wraps, the vertical axis ends
/// at the poles.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    pub(crate) tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(width: usize, height: usize, polar_luminosity: f64, forms: usize) -> Self {
        assert!(width > 0 && height > 0, "grid needs at least one tile");
        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height {
            let luminosity = latitude_luminosity(y, height, polar_luminosity);
            for _ in 0..width {
                tiles.push(Tile::new(luminosity, forms));
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn tile(&self, x: usize, y: usize) -> &Tile {
        &self.tiles[self.index(x, y)]
    }

    pub fn tile_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        let index = self.index(x, y);
        &mut self.tiles[index]
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

fn latitude_luminosity(y: usize, height: usize, polar_luminosity: f64) -> f64 {
    if height <= 1 {
        return 1.0;
    }
    let equator = (height as f64 - 1.0) / 2.0;
    let off_equator = (y as f64 - equator).abs() / equator;
    1.0 - (1.0 - polar_luminosity) * off_equator
}

/// Ecological parameter record. All survival, growth and spread logic is
/// shared; what distinguishes one form from another lives here.
#[derive(Debug, Clone)]
pub struct LifeForm {
    pub name: String,
    pub habitat: TileCover,
    pub min_heat: Option<f64>,
    pub max_heat: f64,
    pub intake_gas: Gas,
    pub exhale_gas: Gas,
    pub min_intake_share: f64,
    pub reproduction_rate: f64,
    pub intake_per_unit: f64,
    pub exhale_per_unit: f64,
    pub capacity_per_energy: f64,
    pub spawn_heat_min: f64,
    pub spawn_probability: f64,
    pub diffusion_floor: f64,
}

impl LifeForm {
    /// Survival check: habitat cover, temperature band, and a strictly
    /// breathable share of the intake gas.
    pub fn habitable(&self, tile: &Tile, intake_share: f64) -> bool {
        tile.cover == self.habitat
            && tile.heat <= self.max_heat
            && self.min_heat.map_or(true, |floor| tile.heat >= floor)
            && intake_share > self.min_intake_share
    }
}

#[derive(Debug, Clone)]
pub struct WorldParams {
    pub max_altitude: f64,
    pub sea_level: f64,
    pub erosion_rate: f64,
    pub full_luminosity_heat: f64,
    pub polar_luminosity: f64,
    pub freezing_point: f64,
    pub heat_inertia: f64,
    pub water_reflectivity: f64,
    pub ice_reflectivity: f64,
    pub gas_loss_rate: f64,
    pub carbon_retention: f64,
    pub vapor_retention: f64,
    pub vapour_per_water_tile: f64,
    pub eruptions_per_tick: u32,
    pub min_upthrust: f64,
    pub upthrust_variation: f64,
    pub outgassing_carbon: f64,
    pub outgassing_nitrogen: f64,
    pub outgassing_methane: f64,
}

pub struct World {
    tick: u64,
    pub(crate) params: WorldParams,
    pub(crate) life: Vec<LifeForm>,
    pub(crate) grid: Grid,
    pub(crate) atmosphere: Atmosphere,
    pub(crate) heat_trapping: f64,
}

impl World {
    pub fn new(params: WorldParams, life: Vec<LifeForm>, grid: Grid, atmosphere: Atmosphere) -> Self {
        Self {
            tick: 0,
            params,
            life,
            grid,
            atmosphere,
            heat_trapping: 0.0,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn advance_time(&mut self) {
        self.tick += 1;
    }

    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    pub fn life_forms(&self) -> &[LifeForm] {
        &self.life
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn atmosphere(&self) -> &Atmosphere {
        &self.atmosphere
    }

    /// Greenhouse multiplier captured at the head of the current tick and
    /// shared by every tile.
    pub fn heat_trapping(&self) -> f64 {
        self.heat_trapping
    }

    pub fn tile(&self, x: usize, y: usize) -> &Tile {
        self.grid.tile(x, y)
    }

    pub fn tile_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        self.grid.tile_mut(x, y)
    }

    pub fn total_biomass(&self) -> f64 {
        self.grid.tiles.iter().map(Tile::total_biomass).sum()
    }

    /// Places population directly, bypassing abiogenesis. Subject to every
    /// tick rule from the next tick on.
    pub fn seed_population(&mut self, x: usize, y: usize, form: usize, amount: f64) {
        let tile = self.grid.tile_mut(x, y);
        tile.populations[form] = amount.max(0.0);
    }

    pub fn snapshot(&self, scenario: &str) -> WorldSnapshot {
        let area = self.grid.area() as f64;
        let mut heat_sum = 0.0;
        let mut rock_tiles = 0u64;
        let mut water_tiles = 0u64;
        let mut ice_tiles = 0u64;
        let mut species_totals = vec![0.0; self.life.len()];
        let mut tiles = Vec::with_capacity(self.grid.tiles.len());
        for tile in &self.grid.tiles {
            heat_sum += tile.heat;
            match tile.cover {
                TileCover::Rock => rock_tiles += 1,
                TileCover::Water => water_tiles += 1,
                TileCover::Ice => ice_tiles += 1,
                TileCover::NotComputed => {}
            }
            for (form, population) in tile.populations.iter().enumerate() {
                species_totals[form] += population;
            }
            tiles.push(TileSnapshot {
                altitude: tile.altitude,
                heat: tile.heat,
                cover: tile.cover,
                population: tile.total_biomass(),
            });
        }
        let species = self
            .life
            .iter()
            .zip(species_totals)
            .map(|(form, population)| SpeciesSnapshot {
                name: form.name.clone(),
                population,
            })
            .collect();
        WorldSnapshot {
            scenario: scenario.to_string(),
            tick: self.tick,
            width: self.grid.width,
            height: self.grid.height,
            atmosphere: self.atmosphere.clone(),
            mean_heat: heat_sum / area,
            rock_tiles,
            water_tiles,
            ice_tiles,
            total_biomass: self.total_biomass(),
            species,
            tiles,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub altitude: f64,
    pub heat: f64,
    pub cover: TileCover,
    pub population: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesSnapshot {
    pub name: String,
    pub population: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub scenario: String,
    pub tick: u64,
    pub width: usize,
    pub height: usize,
    pub atmosphere: Atmosphere,
    pub mean_heat: f64,
    pub rock_tiles: u64,
    pub water_tiles: u64,
    pub ice_tiles: u64,
    pub total_biomass: f64,
    pub species: Vec<SpeciesSnapshot>,
    pub tiles: Vec<TileSnapshot>,
}
