use anyhow::Result;
use rand::Rng;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

pub struct BiosphereSystem;

impl BiosphereSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BiosphereSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for BiosphereSystem {
    fn name(&self) -> &str {
        "biosphere"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        if world.life.is_empty() {
            return Ok(());
        }
        let area = world.grid.area() as f64;
        let width = world.grid.width();
        let height = world.grid.height();
        for y in 0..height {
            for x in 0..width {
                for (form_index, form) in world.life.iter().enumerate() {
                    // Gas shares are read live; earlier tiles in the scan
                    // have already exchanged against the same pools.
                    let share = world.atmosphere.quantity(form.intake_gas) / area;
                    let tile = world.grid.tile_mut(x, y);

                    if !form.habitable(tile, share) {
                        tile.populations[form_index] = 0.0;
                    }

                    if tile.populations[form_index] == 0.0
                        && tile.cover == form.habitat
                        && tile.heat > form.spawn_heat_min
                        && tile.heat < form.max_heat
                        && form.spawn_probability > 0.0
                        && rng.gen_bool(form.spawn_probability)
                    {
                        tile.populations[form_index] = 1.0;
                    }

                    let population = tile.populations[form_index];
                    if population == 0.0 {
                        continue;
                    }

                    let rate = (share * form.reproduction_rate).min(form.reproduction_rate);
                    let capacity = tile.base_luminosity
                        * world.params.full_luminosity_heat
                        * form.capacity_per_energy;
                    let grown = (population + population * rate).min(capacity);
                    tile.populations[form_index] = grown;

                    world
                        .atmosphere
                        .remove(form.intake_gas, grown * form.intake_per_unit);
                    world
                        .atmosphere
                        .add(form.exhale_gas, grown * form.exhale_per_unit);
                }
            }
        }
        Ok(())
    }
}
