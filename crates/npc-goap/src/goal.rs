use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Conditions, WorldState};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Goal {
    pub name: Cow<'static, str>,
    /// Thresholds a state must meet for the goal to be satisfied.
    #[cfg_attr(feature = "serde", serde(default))]
    pub desired: Conditions,
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
}

impl Goal {
    pub fn new(name: impl Into<Cow<'static, str>>, priority: i32) -> Self {
        Self {
            name: name.into(),
            desired: Conditions::new(),
            priority,
        }
    }

    pub fn desire(mut self, key: impl Into<Cow<'static, str>>, min: i32) -> Self {
        self.desired.insert(key.into(), min);
        self
    }

    pub fn is_satisfied(&self, state: &WorldState) -> bool {
        state.meets(&self.desired)
    }

    /// `true` while the goal is still outstanding in `state`, i.e. worth planning for.
    pub fn can_run(&self, state: &WorldState) -> bool {
        !self.is_satisfied(state)
    }
}
