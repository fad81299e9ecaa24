use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::{Gas, World},
};

const DECAYING_GASES: [Gas; 4] = [
    Gas::Nitrogen,
    Gas::Oxygen,
    Gas::CarbonDioxide,
    Gas::Methane,
];

pub struct AtmosphereSystem;

impl AtmosphereSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AtmosphereSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for AtmosphereSystem {
    fn name(&self) -> &str {
        "atmosphere"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let area = world.grid.area() as f64;

        // Greenhouse factor for this tick, captured before decay empties the
        // vapour pool. Every tile shares the same value.
        let carbon_share = world.atmosphere.quantity(Gas::CarbonDioxide) / area;
        let vapour_share = world.atmosphere.quantity(Gas::WaterVapour) / area;
        world.heat_trapping = carbon_share * world.params.carbon_retention
            + vapour_share * world.params.vapor_retention;

        for gas in DECAYING_GASES {
            let quantity = world.atmosphere.quantity(gas);
            world
                .atmosphere
                .remove(gas, quantity * world.params.gas_loss_rate);
        }

        // Vapour tracks the water tiles seen this tick, not an accumulation.
        // The surface pass refills it while it walks the grid.
        world.atmosphere.set(Gas::WaterVapour, 0.0);

        Ok(())
    }
}
