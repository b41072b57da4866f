use std::borrow::Cow;

use npc_core::TickContext;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Conditions, WorldState};

/// What the planner knows about an action.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionDescriptor {
    pub name: Cow<'static, str>,
    pub cost: f32,
    /// Minimum values required before the action can run.
    #[cfg_attr(feature = "serde", serde(default))]
    pub preconditions: Conditions,
    /// Deltas added to the state when the action completes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Conditions,
}

impl ActionDescriptor {
    /// Negative or non-finite costs are clamped to `0.0`.
    pub fn new(name: impl Into<Cow<'static, str>>, cost: f32) -> Self {
        Self {
            name: name.into(),
            cost: if cost.is_finite() { cost.max(0.0) } else { 0.0 },
            preconditions: Conditions::new(),
            effects: Conditions::new(),
        }
    }

    pub fn precondition(mut self, key: impl Into<Cow<'static, str>>, min: i32) -> Self {
        self.preconditions.insert(key.into(), min);
        self
    }

    pub fn effect(mut self, key: impl Into<Cow<'static, str>>, delta: i32) -> Self {
        self.effects.insert(key.into(), delta);
        self
    }

    pub fn can_run(&self, state: &WorldState) -> bool {
        state.meets(&self.preconditions)
    }

    pub fn apply(&self, state: &WorldState) -> WorldState {
        state.applied(&self.effects)
    }
}

/// The planning view of an action.
pub trait Plannable {
    fn descriptor(&self) -> &ActionDescriptor;

    /// Defaults to the descriptor's preconditions.
    fn can_run(&self, state: &WorldState) -> bool {
        self.descriptor().can_run(state)
    }
}

impl Plannable for ActionDescriptor {
    fn descriptor(&self) -> &ActionDescriptor {
        self
    }
}

impl<T> Plannable for Box<T>
where
    T: Plannable + ?Sized,
{
    fn descriptor(&self) -> &ActionDescriptor {
        (**self).descriptor()
    }

    fn can_run(&self, state: &WorldState) -> bool {
        (**self).can_run(state)
    }
}

/// An action the agent can execute over several ticks.
///
/// `on_enter` runs once when the action is dequeued, `perform` every tick until it returns
/// `true`, then `on_exit` once.
pub trait GoapAction<A>: Plannable {
    fn name(&self) -> &str {
        &self.descriptor().name
    }

    fn on_enter(&mut self, _ctx: &TickContext, _agent: &mut A) {}

    fn perform(&mut self, ctx: &TickContext, agent: &mut A) -> bool;

    fn on_exit(&mut self, _ctx: &TickContext, _agent: &mut A) {}
}

/// A bare descriptor executes instantly.
impl<A> GoapAction<A> for ActionDescriptor {
    fn perform(&mut self, _ctx: &TickContext, _agent: &mut A) -> bool {
        true
    }
}
