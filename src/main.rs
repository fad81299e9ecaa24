use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;

use tellus::{
    engine::{EngineBuilder, EngineSettings},
    scenario::ScenarioLoader,
    systems::{
        AtmosphereSystem, BiosphereSystem, CoverSystem, DiffusionSystem, SurfaceSystem,
        VolcanismSystem,
    },
    web::{self, WebServerConfig},
    world::WorldSnapshot,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "TELLUS planetary climate and biosphere runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/blue_marble.yaml")]
    scenario: PathBuf,

    /// Override tick count (uses scenario default when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Override report interval in ticks (0 silences progress reports)
    #[arg(long)]
    report_interval: Option<u64>,

    /// Serve the live web view instead of running headless
    #[arg(long)]
    serve: bool,

    /// Host for the web view
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for the web view
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;
    let ticks = scenario.ticks(cli.ticks);

    if cli.serve {
        let config = WebServerConfig {
            scenario,
            ticks,
            host: cli.host,
            port: cli.port,
        };
        return tokio::runtime::Runtime::new()?.block_on(web::run(config));
    }

    let report_interval = cli
        .report_interval
        .unwrap_or(scenario.report_interval_ticks);
    let mut world = scenario.build_world();

    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
    };

    let mut engine = EngineBuilder::new(settings)
        .with_system(VolcanismSystem::new())
        .with_system(AtmosphereSystem::new())
        .with_system(SurfaceSystem::new())
        .with_system(BiosphereSystem::new())
        .with_system(DiffusionSystem::new())
        .with_system(CoverSystem::new())
        .build();

    println!(
        "{} Starting scenario '{}' ({} ticks, seed {})",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        scenario.name,
        ticks,
        scenario.seed
    );

    if report_interval == 0 {
        engine.run(&mut world, ticks)?;
    } else {
        let mut done = 0;
        while done < ticks {
            let chunk = report_interval.min(ticks - done);
            engine.run(&mut world, chunk)?;
            done += chunk;
            print_report(&world.snapshot(&scenario.name));
        }
    }

    let last = world.snapshot(&scenario.name);
    println!(
        "Scenario '{}' completed for {} ticks. Mean heat {:.1}, total biomass {:.1}.",
        scenario.name, ticks, last.mean_heat, last.total_biomass
    );
    Ok(())
}

fn print_report(snapshot: &WorldSnapshot) {
    println!(
        "[tick {:>5}] heat {:6.1} | rock {:>5} water {:>5} ice {:>5} | biomass {:12.1} | CO2 {:12.1} | O2 {:12.1}",
        snapshot.tick,
        snapshot.mean_heat,
        snapshot.rock_tiles,
        snapshot.water_tiles,
        snapshot.ice_tiles,
        snapshot.total_biomass,
        snapshot.atmosphere.carbon_dioxide,
        snapshot.atmosphere.oxygen,
    );
}
