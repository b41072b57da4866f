use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Validity of the path behind the current destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathStatus {
    /// The path reaches the destination.
    Complete,
    /// The path ends short of the destination.
    Partial,
    /// No path could be found.
    Invalid,
}

/// The movement capability an agent exposes to its decision engine.
///
/// Implementations own path computation and locomotion; callers only issue destinations and poll
/// progress once per tick.
pub trait NavAgent {
    /// Request movement towards `target`. Any previous destination is replaced.
    fn set_destination(&mut self, target: Vec2);

    /// `true` while the path for the last destination is still being computed.
    fn path_pending(&self) -> bool;

    fn path_status(&self) -> PathStatus;

    /// Distance left along the current path, `0.0` when there is none.
    fn remaining_distance(&self) -> f32;

    fn stopping_distance(&self) -> f32;

    fn set_stopping_distance(&mut self, distance: f32);

    /// Drop the current destination and path.
    fn reset_path(&mut self);

    fn has_path(&self) -> bool;
}
