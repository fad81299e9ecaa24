use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::{Gas, TileCover, World},
};

pub struct SurfaceSystem;

impl SurfaceSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SurfaceSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for SurfaceSystem {
    fn name(&self) -> &str {
        "surface"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let trapping = world.heat_trapping;
        let width = world.grid.width();
        let height = world.grid.height();
        for y in 0..height {
            for x in 0..width {
                let tile = world.grid.tile_mut(x, y);

                tile.altitude = (tile.altitude * (1.0 - world.params.erosion_rate)).max(0.0);

                // Covers are last tick's classification; open water and ice
                // reflect part of the incoming energy.
                let reflectivity = match tile.cover {
                    TileCover::Water => world.params.water_reflectivity,
                    TileCover::Ice => world.params.ice_reflectivity,
                    TileCover::Rock | TileCover::NotComputed => 0.0,
                };
                let luminosity = tile.base_luminosity * (1.0 - reflectivity);
                let target = world.params.full_luminosity_heat * luminosity * (1.0 + trapping);
                tile.heat = target * (1.0 - world.params.heat_inertia)
                    + tile.heat * world.params.heat_inertia;

                if tile.cover == TileCover::Water {
                    world
                        .atmosphere
                        .add(Gas::WaterVapour, world.params.vapour_per_water_tile);
                }
            }
        }
        Ok(())
    }
}
