//! Tick-driven behavior tree engine built on `npc-core`.
//!
//! Trees are described with [`Node`] builders and frozen into a [`BehaviorTree`] arena. The
//! node set is closed: two composites and three leaves.
//!
//! - [`Composite::Selector`] re-scans its children from the first on every tick. A higher
//!   priority child can take over from a lower priority `Running` branch on the very next tick.
//! - [`Composite::Sequence`] latches: a `Running` child is resumed next tick without re-ticking
//!   the children before it.
//! - [`ActionNode`] runs a timed effect, [`ConditionNode`] checks a predicate, [`MoveToNode`]
//!   drives a [`npc_nav::NavAgent`].
//!
//! A branch abandoned by a selector receives no cancellation callback. Leaves with latched,
//! half-finished work must tolerate being resumed later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod node;
pub mod status;
pub mod tree;

pub use error::BuildError;
pub use node::{ActionNode, Composite, ConditionNode, MoveToNode, NavAccess, Node, NodeKind};
pub use status::Status;
pub use tree::{BehaviorTree, NodeId, NodeRef};
