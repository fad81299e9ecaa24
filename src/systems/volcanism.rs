use anyhow::Result;
use rand::Rng;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::{Gas, World},
};

const ERUPTION_HALF_WIDTH: f64 = 4.0;

pub struct VolcanismSystem;

impl VolcanismSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VolcanismSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for VolcanismSystem {
    fn name(&self) -> &str {
        "volcanism"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        for _ in 0..world.params.eruptions_per_tick {
            let center_x = rng.gen_range(0..world.grid.width());
            let center_y = rng.gen_range(0..world.grid.height());
            let upthrust = rng.gen_range(
                world.params.min_upthrust
                    ..=world.params.min_upthrust + world.params.upthrust_variation,
            );
            erupt(world, center_x, center_y, upthrust);
        }
        Ok(())
    }
}

/// Stamps a radially decaying upthrust onto the grid and vents gas into the
/// atmosphere. Offsets falling outside the grid are skipped; eruptions never
/// reach across the horizontal seam.
fn erupt(world: &mut World, center_x: usize, center_y: usize, upthrust: f64) {
    let width = world.grid.width() as isize;
    let height = world.grid.height() as isize;
    let reach = ERUPTION_HALF_WIDTH as isize;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let x = center_x as isize + dx;
            let y = center_y as isize + dy;
            if x < 0 || y < 0 || x >= width || y >= height {
                continue;
            }
            let distance = ((dx * dx + dy * dy) as f64).sqrt();
            let lift = upthrust * (ERUPTION_HALF_WIDTH - distance).max(0.0) / ERUPTION_HALF_WIDTH;
            let tile = world.grid.tile_mut(x as usize, y as usize);
            tile.altitude = (tile.altitude + lift).min(world.params.max_altitude);
        }
    }
    world
        .atmosphere
        .add(Gas::CarbonDioxide, upthrust * world.params.outgassing_carbon);
    world
        .atmosphere
        .add(Gas::Nitrogen, upthrust * world.params.outgassing_nitrogen);
    world
        .atmosphere
        .add(Gas::Methane, upthrust * world.params.outgassing_methane);
}
