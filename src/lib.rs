pub mod catalog;
pub mod clock;
pub mod commands;
pub mod engine;
pub mod grid;
pub mod missions;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod systems;
pub mod tasks;
pub mod web;
pub mod world;

pub use scenario::{Scenario, ScenarioLoader};
pub use world::{World, WorldSnapshot};
