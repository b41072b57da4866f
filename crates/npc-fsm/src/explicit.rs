use core::fmt;

use npc_core::{Policy, TickContext};
use npc_trace::{TraceEvent, Tracer};
use tracing::{debug, warn};

use crate::FsmError;

/// Name of a state in a [`StateMachine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(pub &'static str);

impl StateKey {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A state that decides its own successor.
pub trait State<A> {
    fn key(&self) -> StateKey;

    fn can_enter(&self, _agent: &A) -> bool {
        true
    }

    fn enter(&mut self, _ctx: &TickContext, _agent: &mut A) {}

    /// Returns `Some(key)` to request a transition, executed right after this call. Returning
    /// the state's own key re-enters it.
    fn update(&mut self, ctx: &TickContext, agent: &mut A) -> Option<StateKey>;

    fn exit(&mut self, _ctx: &TickContext, _agent: &mut A) {}
}

/// Runs before the state update every tick with the current key. A returned key forces a
/// transition.
pub type Guard<A> = Box<dyn FnMut(Option<StateKey>, &A) -> Option<StateKey>>;

/// State machine with transitions pushed by the states themselves.
pub struct StateMachine<A> {
    states: Vec<Box<dyn State<A>>>,
    current: Option<usize>,
    guard: Option<Guard<A>>,
    tracer: Tracer,
}

impl<A> Default for StateMachine<A> {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            current: None,
            guard: None,
            tracer: Tracer::default(),
        }
    }
}

impl<A> StateMachine<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S>(&mut self, state: S) -> Result<(), FsmError>
    where
        S: State<A> + 'static,
    {
        let key = state.key();
        if self.index_of(key).is_some() {
            return Err(FsmError::DuplicateState(key));
        }
        self.states.push(Box::new(state));
        Ok(())
    }

    pub fn set_guard<F>(&mut self, guard: F)
    where
        F: FnMut(Option<StateKey>, &A) -> Option<StateKey> + 'static,
    {
        self.guard = Some(Box::new(guard));
    }

    pub fn with_guard<F>(mut self, guard: F) -> Self
    where
        F: FnMut(Option<StateKey>, &A) -> Option<StateKey> + 'static,
    {
        self.set_guard(guard);
        self
    }

    /// Exits the current state (if any) and enters `key`, even if it is already current.
    pub fn change_state(
        &mut self,
        key: StateKey,
        ctx: &TickContext,
        agent: &mut A,
    ) -> Result<(), FsmError> {
        let next = self.index_of(key).ok_or(FsmError::UnknownState(key))?;

        if let Some(prev) = self.current {
            let prev_key = self.states[prev].key();
            self.states[prev].exit(ctx, agent);
            debug!(state = %prev_key, "exit");
            self.emit(ctx, "state.exit", prev_key);
        }

        self.current = Some(next);
        self.states[next].enter(ctx, agent);
        debug!(state = %key, "enter");
        self.emit(ctx, "state.enter", key);
        Ok(())
    }

    /// Runs the guard, then the current state's update, applying whichever transitions they
    /// request.
    pub fn tick(&mut self, ctx: &TickContext, agent: &mut A) -> Result<(), FsmError> {
        let current = self.current_key();
        let forced = self.guard.as_mut().and_then(|guard| guard(current, &*agent));
        if let Some(key) = forced {
            self.change_state(key, ctx, agent)?;
        }

        let Some(index) = self.current else {
            return Ok(());
        };
        if let Some(next) = self.states[index].update(ctx, agent) {
            self.change_state(next, ctx, agent)?;
        }
        Ok(())
    }

    pub fn current_key(&self) -> Option<StateKey> {
        self.current.map(|i| self.states[i].key())
    }

    pub fn current_name(&self) -> Option<&'static str> {
        self.current_key().map(StateKey::name)
    }

    pub fn contains(&self, key: StateKey) -> bool {
        self.index_of(key).is_some()
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = StateKey> + '_ {
        self.states.iter().map(|s| s.key())
    }

    /// Other states whose `can_enter` holds right now.
    pub fn possible_next_states<'a>(
        &'a self,
        agent: &'a A,
    ) -> impl Iterator<Item = StateKey> + 'a {
        self.states
            .iter()
            .enumerate()
            .filter(move |&(i, s)| Some(i) != self.current && s.can_enter(agent))
            .map(|(_, s)| s.key())
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    fn index_of(&self, key: StateKey) -> Option<usize> {
        self.states.iter().position(|s| s.key() == key)
    }

    fn emit(&mut self, ctx: &TickContext, tag: &'static str, key: StateKey) {
        if self.tracer.is_enabled() {
            self.tracer.emit(TraceEvent::new(ctx.tick, tag).with_subject(key.name()));
        }
    }
}

impl<A> fmt::Debug for StateMachine<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.keys().collect::<Vec<_>>())
            .field("current", &self.current_key())
            .field("guard", &self.guard.is_some())
            .finish()
    }
}

impl<A> Policy<A> for StateMachine<A>
where
    A: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: &mut A) {
        if let Err(err) = StateMachine::tick(self, ctx, agent) {
            warn!(%err, "state machine tick failed");
        }
    }
}
