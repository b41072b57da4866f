//! Umbrella crate that re-exports the `npc-*` building blocks.
//!
//! Every engine implements [`core::Policy`], so an agent can hold any of them as
//! `Box<dyn Policy<A>>` and tick it once per simulation step.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use npc_core as core;

#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub use npc_trace as trace;

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use npc_nav as nav;

#[cfg(feature = "bt")]
#[cfg_attr(docsrs, doc(cfg(feature = "bt")))]
pub use npc_bt as bt;

#[cfg(feature = "fsm")]
#[cfg_attr(docsrs, doc(cfg(feature = "fsm")))]
pub use npc_fsm as fsm;

#[cfg(feature = "goap")]
#[cfg_attr(docsrs, doc(cfg(feature = "goap")))]
pub use npc_goap as goap;

/// The types most agents need.
#[cfg(feature = "full")]
#[cfg_attr(docsrs, doc(cfg(feature = "full")))]
pub mod prelude {
    pub use npc_bt::{ActionNode, BehaviorTree, MoveToNode, Node, Status};
    pub use npc_core::{Policy, TickContext};
    pub use npc_fsm::{HybridState, HybridStateMachine, State, StateKey, StateMachine, TreeState};
    pub use npc_goap::{
        ActionDescriptor, GoapAction, GoapAgent, Goal, Plannable, Planner, WorldState,
    };
    pub use npc_nav::{NavAgent, PathStatus, StraightLineAgent, Vec2};
    pub use npc_trace::{TraceEvent, Tracer};
}
