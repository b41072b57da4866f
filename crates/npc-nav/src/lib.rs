//! Movement capability consumed by the decision engines.
//!
//! The engines never plan paths themselves. They issue destinations through [`NavAgent`] and
//! poll its progress once per tick. [`StraightLineAgent`] is a minimal reference implementation
//! for headless simulation and tests.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod math;
pub mod straight;

pub use agent::{NavAgent, PathStatus};
pub use math::Vec2;
pub use straight::{Bounds, StraightLineAgent};
