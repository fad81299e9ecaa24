pub mod engine;
pub mod rng;
pub mod scenario;
pub mod systems;
pub mod web;
pub mod world;

pub use engine::{Engine, EngineBuilder, EngineSettings, System, SystemContext};
pub use scenario::{Scenario, ScenarioLoader};
pub use world::{World, WorldSnapshot};
