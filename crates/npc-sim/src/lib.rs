//! Headless villager simulation.
//!
//! A single villager grows hungry and tired over simulated days while one of the npc decision
//! engines keeps it fed and rested. The same villager content is written once per engine so
//! their behavior can be compared run for run.

pub mod brain;
pub mod config;
pub mod rng;
pub mod sim;
pub mod villager;

pub use brain::Brain;
pub use config::{Engine, SimConfig};
pub use sim::{Simulation, Summary};
pub use villager::{Tally, Villager};
