//! Goal-oriented action planning for npc agents.
//!
//! [`Planner`] runs a uniform-cost forward search from a [`WorldState`] snapshot to a state that
//! meets a [`Goal`], returning the cheapest [`Plan`] it finds. There is no heuristic and no state
//! deduplication: equal states reached by different action sequences are distinct search nodes.
//! [`GoapAgent`] owns actions and goals, replans when idle, and executes plans one action at a
//! time across ticks.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod agent;
pub mod goal;
pub mod planner;
pub mod world;

pub use action::{ActionDescriptor, GoapAction, Plannable};
pub use agent::GoapAgent;
pub use goal::Goal;
pub use planner::{ActionId, Plan, Planner, PlannerConfig};
pub use world::{Conditions, WorldState};
