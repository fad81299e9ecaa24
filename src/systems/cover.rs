use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::{TileCover, World},
};

pub struct CoverSystem;

impl CoverSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoverSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for CoverSystem {
    fn name(&self) -> &str {
        "cover"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let sea_level = world.params.sea_level;
        let freezing_point = world.params.freezing_point;
        for tile in world.grid.tiles.iter_mut() {
            tile.cover = TileCover::classify(tile.altitude, tile.heat, sea_level, freezing_point);
        }
        Ok(())
    }
}
