use tellus::{
    engine::{Engine, EngineBuilder, EngineSettings},
    scenario::Scenario,
    systems::{
        AtmosphereSystem, BiosphereSystem, CoverSystem, DiffusionSystem, SurfaceSystem,
        VolcanismSystem,
    },
};

/// Mild uniform ocean: every tile is habitable water from tick one on, so
/// population movement is the only thing under test.
fn shallow_sea() -> Scenario {
    let mut scenario = Scenario::default();
    scenario.name = "diffusion".into();
    scenario.grid.width = 8;
    scenario.grid.height = 4;
    scenario.climate.polar_luminosity = 1.0;
    scenario.climate.freezing_point = 15.0;
    scenario.climate.carbon_retention = 0.0;
    scenario.climate.vapor_retention = 0.0;
    scenario.climate.gas_loss_rate = 0.0;
    scenario.volcanism.eruptions_per_tick = 0;
    scenario.atmosphere.carbon_dioxide = 10_000.0;
    scenario.life[0].spawn_probability = 0.0;
    scenario
}

fn build_engine(scenario: &Scenario) -> Engine {
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
    };
    EngineBuilder::new(settings)
        .with_system(VolcanismSystem::new())
        .with_system(AtmosphereSystem::new())
        .with_system(SurfaceSystem::new())
        .with_system(BiosphereSystem::new())
        .with_system(DiffusionSystem::new())
        .with_system(CoverSystem::new())
        .build()
}

#[test]
fn population_spreads_and_is_conserved() {
    let scenario = shallow_sea();
    let mut world = scenario.build_world();
    let mut engine = build_engine(&scenario);

    engine.run(&mut world, 1).unwrap();
    world.seed_population(2, 1, 0, 100.0);
    engine.run(&mut world, 1).unwrap();

    // The colony grows to 105 before movement, and pair averaging only
    // redistributes, so the total survives the spread exactly.
    assert_eq!(world.total_biomass(), 105.0);

    assert!(world.tile(2, 0).populations[0] > 0.0, "spread north");
    assert!(world.tile(3, 1).populations[0] > 0.0, "spread east");
    assert!(world.tile(2, 2).populations[0] > 0.0, "spread south");

    let populated = world
        .grid()
        .tiles()
        .iter()
        .filter(|tile| tile.populations[0] > 0.0)
        .count();
    assert!(
        populated >= 5,
        "one crowded tile should leak into several neighbours, got {populated}"
    );
}

#[test]
fn the_seam_wraps_east_to_west() {
    let scenario = shallow_sea();
    let mut world = scenario.build_world();
    let mut engine = build_engine(&scenario);

    engine.run(&mut world, 1).unwrap();
    world.seed_population(7, 1, 0, 100.0);
    engine.run(&mut world, 1).unwrap();

    assert!(
        world.tile(0, 1).populations[0] > 0.0,
        "the eastmost column shares with column zero across the seam"
    );
    assert_eq!(world.total_biomass(), 105.0);
}

#[test]
fn the_poles_do_not_wrap() {
    let scenario = shallow_sea();
    let mut world = scenario.build_world();
    let mut engine = build_engine(&scenario);

    engine.run(&mut world, 1).unwrap();
    world.seed_population(2, 3, 0, 100.0);
    engine.run(&mut world, 1).unwrap();

    for x in 0..8 {
        assert_eq!(
            world.tile(x, 0).populations[0],
            0.0,
            "the bottom row has no neighbour across the pole"
        );
        assert_eq!(world.tile(x, 1).populations[0], 0.0);
    }
    assert!(
        world.tile(2, 2).populations[0] > 0.0,
        "the row above still receives its share through the regular pair"
    );
    assert_eq!(world.total_biomass(), 105.0);
}
