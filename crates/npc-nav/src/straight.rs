use crate::{NavAgent, PathStatus, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned walkable area.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Reference mover that walks straight at its destination.
///
/// Path requests resolve on the next [`step`](Self::step), so `path_pending` is observable for
/// exactly one tick after `set_destination`. Destinations outside the optional bounds produce an
/// [`PathStatus::Invalid`] path and no movement.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StraightLineAgent {
    position: Vec2,
    speed: f32,
    stopping_distance: f32,
    destination: Option<Vec2>,
    pending: bool,
    status: PathStatus,
    stopped: bool,
    bounds: Option<Bounds>,
}

impl StraightLineAgent {
    pub fn new(position: Vec2, speed: f32) -> Self {
        Self {
            position,
            speed: speed.max(0.0),
            stopping_distance: 0.0,
            destination: None,
            pending: false,
            status: PathStatus::Complete,
            stopped: false,
            bounds: None,
        }
    }

    pub fn with_bounds(mut self, min: Vec2, max: Vec2) -> Self {
        self.bounds = Some(Bounds { min, max });
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn destination(&self) -> Option<Vec2> {
        self.destination
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Freeze locomotion without dropping the destination.
    pub fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
    }

    /// `true` once the agent rests within stopping distance of its destination.
    pub fn has_arrived(&self) -> bool {
        match self.destination {
            Some(dest) => {
                !self.pending && self.position.distance(dest) <= self.stopping_distance
            }
            None => false,
        }
    }

    /// Advance locomotion by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        let Some(dest) = self.destination else {
            return;
        };

        if self.pending {
            self.pending = false;
            self.status = match self.bounds {
                Some(bounds) if !bounds.contains(dest) => PathStatus::Invalid,
                _ => PathStatus::Complete,
            };
            return;
        }

        if self.stopped || self.status == PathStatus::Invalid {
            return;
        }

        let to_dest = dest - self.position;
        let dist = to_dest.length();
        if dist <= self.stopping_distance || dist <= f32::EPSILON {
            return;
        }

        let travel = self.speed * dt.max(0.0);
        if travel >= dist {
            self.position = dest;
        } else {
            self.position = self.position + to_dest * (travel / dist);
        }
    }
}

impl NavAgent for StraightLineAgent {
    fn set_destination(&mut self, target: Vec2) {
        self.destination = Some(target);
        self.pending = true;
        self.status = PathStatus::Complete;
    }

    fn path_pending(&self) -> bool {
        self.pending
    }

    fn path_status(&self) -> PathStatus {
        self.status
    }

    fn remaining_distance(&self) -> f32 {
        match self.destination {
            Some(dest) if !self.pending && self.status != PathStatus::Invalid => {
                self.position.distance(dest)
            }
            _ => 0.0,
        }
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }

    fn set_stopping_distance(&mut self, distance: f32) {
        self.stopping_distance = distance.max(0.0);
    }

    fn reset_path(&mut self) {
        self.destination = None;
        self.pending = false;
        self.status = PathStatus::Complete;
    }

    fn has_path(&self) -> bool {
        self.destination.is_some() && !self.pending && self.status != PathStatus::Invalid
    }
}
