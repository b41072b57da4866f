//! Tick context and the policy seam shared by every npc decision engine.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod policy;
pub mod tick;

pub use policy::Policy;
pub use tick::TickContext;
