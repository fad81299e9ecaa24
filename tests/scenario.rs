use tellus::{
    scenario::{Scenario, ScenarioError, ScenarioLoader},
    world::{Gas, TileCover},
};

#[test]
fn committed_scenario_parses() {
    let loader = ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"));
    let scenario = loader
        .load("scenarios/blue_marble.yaml")
        .expect("scenario parses");
    assert_eq!(scenario.name, "blue_marble");
    assert_eq!(scenario.seed, 42);
    assert_eq!(scenario.ticks(None), 2000);
    assert_eq!(scenario.grid.width, 128);
    assert_eq!(scenario.grid.height, 64);
    assert_eq!(scenario.life.len(), 1);
    assert_eq!(scenario.life[0].name, "cyanophyte");

    let world = scenario.build_world();
    assert_eq!(world.grid().area(), 128 * 64);
    assert_eq!(world.params().sea_level, 1000.0);
    assert_eq!(world.params().outgassing_nitrogen, 4.0);
    assert_eq!(world.atmosphere().quantity(Gas::Nitrogen), 150_000.0);
    assert_eq!(world.atmosphere().quantity(Gas::Oxygen), 0.0);
}

#[test]
fn minimal_scenario_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bare.yaml"), "name: bare\n").unwrap();

    let scenario = ScenarioLoader::new(dir.path())
        .load("bare.yaml")
        .expect("a name is the only required field");

    assert_eq!(scenario.seed, 42);
    assert_eq!(scenario.ticks(None), 2000);
    assert_eq!(scenario.report_interval_ticks, 25);
    assert_eq!(scenario.grid.width, 128);
    assert_eq!(scenario.grid.height, 64);
    assert_eq!(scenario.terrain.erosion_rate, 0.002);
    assert_eq!(scenario.volcanism.eruptions_per_tick, 1);
    assert_eq!(scenario.life.len(), 1, "a default microbe is included");
    assert_eq!(scenario.life[0].name, "cyanophyte");
    assert_eq!(scenario.life[0].habitat, TileCover::Water);
    assert_eq!(scenario.life[0].min_heat, None);
}

#[test]
fn tick_override_wins() {
    let mut scenario = Scenario::default();
    assert_eq!(scenario.ticks(None), 2000);
    scenario.ticks = Some(100);
    assert_eq!(scenario.ticks(None), 100);
    assert_eq!(scenario.ticks(Some(7)), 7);
}

#[test]
fn empty_grid_is_rejected() {
    let mut scenario = Scenario::default();
    scenario.grid.width = 0;
    let err = scenario.validate().unwrap_err();
    assert!(matches!(err, ScenarioError::EmptyGrid { .. }), "got {err}");
}

#[test]
fn rates_must_stay_in_unit_range() {
    let mut scenario = Scenario::default();
    scenario.terrain.erosion_rate = 1.5;
    let err = scenario.validate().unwrap_err();
    assert!(
        matches!(err, ScenarioError::RateOutOfRange { .. }),
        "got {err}"
    );
}

#[test]
fn negative_magnitudes_are_rejected() {
    let mut scenario = Scenario::default();
    scenario.climate.carbon_retention = -0.1;
    let err = scenario.validate().unwrap_err();
    assert!(
        matches!(err, ScenarioError::NegativeValue { .. }),
        "got {err}"
    );
}

#[test]
fn life_forms_are_validated() {
    let mut scenario = Scenario::default();
    scenario.life[0].spawn_probability = 2.0;
    let err = scenario.validate().unwrap_err();
    assert!(
        matches!(err, ScenarioError::InvalidLifeForm { .. }),
        "got {err}"
    );

    let mut scenario = Scenario::default();
    scenario.life[0].habitat = TileCover::NotComputed;
    let err = scenario.validate().unwrap_err();
    assert!(err.to_string().contains("habitat"), "got {err}");
}

#[test]
fn lifeless_scenarios_are_allowed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("dead.yaml"), "name: dead\nlife: []\n").unwrap();

    let scenario = ScenarioLoader::new(dir.path())
        .load("dead.yaml")
        .expect("an empty life list just disables the biosphere");
    assert!(scenario.life.is_empty());

    let world = scenario.build_world();
    assert!(world.life_forms().is_empty());
}

#[test]
fn loader_reports_missing_and_invalid_files() {
    let dir = tempfile::tempdir().unwrap();
    let loader = ScenarioLoader::new(dir.path());

    let err = loader.load("absent.yaml").unwrap_err();
    assert!(
        format!("{err:#}").contains("Failed to read scenario file"),
        "got {err:#}"
    );

    std::fs::write(dir.path().join("broken.yaml"), "name: [unclosed\n").unwrap();
    let err = loader.load("broken.yaml").unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse"), "got {err:#}");

    std::fs::write(
        dir.path().join("zero.yaml"),
        "name: zero\ngrid:\n  width: 0\n",
    )
    .unwrap();
    let err = loader.load("zero.yaml").unwrap_err();
    assert!(
        format!("{err:#}").contains("Invalid scenario"),
        "got {err:#}"
    );
}
