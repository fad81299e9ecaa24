use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::{Grid, LifeForm, World},
};

pub struct DiffusionSystem;

impl DiffusionSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DiffusionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for DiffusionSystem {
    fn name(&self) -> &str {
        "diffusion"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        diffuse_heat(&mut world.grid);
        let area = world.grid.area() as f64;
        for (form_index, form) in world.life.iter().enumerate() {
            let share = world.atmosphere.quantity(form.intake_gas) / area;
            diffuse_population(&mut world.grid, form, form_index, share);
        }
        Ok(())
    }
}

// Both passes scan in raster order and write averages back immediately, so a
// tile late in the scan reads neighbor values the scan already touched. The
// east neighbor wraps around the seam; the south neighbor stops at the pole.

fn diffuse_heat(grid: &mut Grid) {
    let width = grid.width();
    let height = grid.height();
    for y in 0..height {
        for x in 0..width {
            let east_x = (x + 1) % width;
            let heat = grid.tile(x, y).heat;
            let east_avg = 0.5 * (heat + grid.tile(east_x, y).heat);
            grid.tile_mut(east_x, y).heat = east_avg;
            if y + 1 < height {
                let south_avg = 0.5 * (heat + grid.tile(x, y + 1).heat);
                grid.tile_mut(x, y + 1).heat = south_avg;
                grid.tile_mut(x, y).heat = 0.5 * (east_avg + south_avg);
            } else {
                grid.tile_mut(x, y).heat = east_avg;
            }
        }
    }
}

/// Population spreads between habitable pairs only, and only once one side
/// holds more than the form's diffusion floor. Eligible pairs settle at
/// their average.
fn diffuse_population(grid: &mut Grid, form: &LifeForm, form_index: usize, share: f64) {
    let width = grid.width();
    let height = grid.height();
    for y in 0..height {
        for x in 0..width {
            let east = grid.index((x + 1) % width, y);
            let here = grid.index(x, y);
            exchange(grid, form, form_index, share, here, east);
            if y + 1 < height {
                let south = grid.index(x, y + 1);
                exchange(grid, form, form_index, share, here, south);
            }
        }
    }
}

fn exchange(grid: &mut Grid, form: &LifeForm, form_index: usize, share: f64, a: usize, b: usize) {
    let population_a = grid.tiles[a].populations[form_index];
    let population_b = grid.tiles[b].populations[form_index];
    if population_a <= form.diffusion_floor && population_b <= form.diffusion_floor {
        return;
    }
    if !form.habitable(&grid.tiles[a], share) || !form.habitable(&grid.tiles[b], share) {
        return;
    }
    let average = 0.5 * (population_a + population_b);
    grid.tiles[a].populations[form_index] = average;
    grid.tiles[b].populations[form_index] = average;
}
