//! State machines for npc agents.
//!
//! - [`HybridStateMachine`]: states carry a priority and a `can_enter` predicate. Every tick the
//!   machine moves to the highest priority state that can be entered, then updates it. States may
//!   own a behavior tree that their update ticks.
//! - [`StateMachine`]: no central arbitration. Each state's update decides where to go next,
//!   optionally overridden by a guard that runs ahead of it.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod explicit;
pub mod hybrid;

pub use error::FsmError;
pub use explicit::{Guard, State, StateKey, StateMachine};
pub use hybrid::{HybridState, HybridStateMachine, StateId, TreeState};
