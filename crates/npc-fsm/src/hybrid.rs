use core::cmp::Reverse;
use core::fmt;

use npc_bt::BehaviorTree;
use npc_core::{Policy, TickContext};
use npc_trace::{TraceEvent, Tracer};
use tracing::{debug, warn};

/// A state of a [`HybridStateMachine`].
///
/// Higher `priority` is more urgent. The machine never asks the current state whether it can
/// be entered, so a state nothing else can pre-empt is absorbing.
pub trait HybridState<A> {
    fn name(&self) -> &str;

    fn priority(&self) -> i32 {
        0
    }

    fn can_enter(&self, agent: &A) -> bool;

    fn enter(&mut self, _ctx: &TickContext, _agent: &mut A) {}

    /// Runs every tick while current. Ticks the owned behavior tree by default.
    fn update(&mut self, ctx: &TickContext, agent: &mut A) {
        if let Some(tree) = self.behavior_tree_mut() {
            tree.tick(ctx, agent);
        }
    }

    fn exit(&mut self, _ctx: &TickContext, _agent: &mut A) {}

    fn behavior_tree(&self) -> Option<&BehaviorTree<A>> {
        None
    }

    fn behavior_tree_mut(&mut self) -> Option<&mut BehaviorTree<A>> {
        None
    }
}

type EnterPredicate<A> = Box<dyn Fn(&A) -> bool>;
type Hook<A> = Box<dyn FnMut(&mut A)>;
type UpdateHook<A> = Box<dyn FnMut(&TickContext, &mut A)>;

/// A [`HybridState`] assembled from closures and an optional behavior tree.
pub struct TreeState<A> {
    name: String,
    priority: i32,
    can_enter: EnterPredicate<A>,
    on_enter: Option<Hook<A>>,
    on_update: Option<UpdateHook<A>>,
    on_exit: Option<Hook<A>>,
    tree: Option<BehaviorTree<A>>,
}

impl<A> TreeState<A> {
    pub fn new<F>(name: impl Into<String>, priority: i32, can_enter: F) -> Self
    where
        F: Fn(&A) -> bool + 'static,
    {
        Self {
            name: name.into(),
            priority,
            can_enter: Box::new(can_enter),
            on_enter: None,
            on_update: None,
            on_exit: None,
            tree: None,
        }
    }

    pub fn with_tree(mut self, tree: BehaviorTree<A>) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut A) + 'static,
    {
        self.on_enter = Some(Box::new(f));
        self
    }

    /// Runs every tick before the owned tree.
    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: FnMut(&TickContext, &mut A) + 'static,
    {
        self.on_update = Some(Box::new(f));
        self
    }

    pub fn on_exit<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut A) + 'static,
    {
        self.on_exit = Some(Box::new(f));
        self
    }
}

impl<A> HybridState<A> for TreeState<A> {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_enter(&self, agent: &A) -> bool {
        (self.can_enter)(agent)
    }

    fn enter(&mut self, _ctx: &TickContext, agent: &mut A) {
        if let Some(f) = self.on_enter.as_mut() {
            f(agent);
        }
    }

    fn update(&mut self, ctx: &TickContext, agent: &mut A) {
        if let Some(f) = self.on_update.as_mut() {
            f(ctx, agent);
        }
        if let Some(tree) = self.tree.as_mut() {
            tree.tick(ctx, agent);
        }
    }

    fn exit(&mut self, _ctx: &TickContext, agent: &mut A) {
        if let Some(f) = self.on_exit.as_mut() {
            f(agent);
        }
    }

    fn behavior_tree(&self) -> Option<&BehaviorTree<A>> {
        self.tree.as_ref()
    }

    fn behavior_tree_mut(&mut self) -> Option<&mut BehaviorTree<A>> {
        self.tree.as_mut()
    }
}

/// Handle returned by [`HybridStateMachine::register`]. Stable across re-sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(usize);

/// Priority-arbitrated state machine.
///
/// Each tick scans the registered states from highest to lowest priority, skipping the current
/// one, and transitions to the first whose `can_enter` holds. The current state (new or not) is
/// then updated.
pub struct HybridStateMachine<A> {
    states: Vec<Box<dyn HybridState<A>>>,
    order: Vec<StateId>,
    current: Option<StateId>,
    tracer: Tracer,
}

impl<A> Default for HybridStateMachine<A> {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            order: Vec::new(),
            current: None,
            tracer: Tracer::default(),
        }
    }
}

impl<A> HybridStateMachine<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a state and re-sorts by descending priority. States of equal priority keep
    /// registration order. A name that is already registered is ignored and its existing id is
    /// returned.
    pub fn register<S>(&mut self, state: S) -> StateId
    where
        S: HybridState<A> + 'static,
    {
        self.register_boxed(Box::new(state))
    }

    pub fn register_boxed(&mut self, state: Box<dyn HybridState<A>>) -> StateId {
        if let Some(existing) = self.find(state.name()) {
            warn!(state = state.name(), "state already registered; ignoring");
            return existing;
        }

        let id = StateId(self.states.len());
        self.states.push(state);
        self.order.push(id);
        self.order.sort_by_key(|id| Reverse(self.states[id.0].priority()));
        id
    }

    /// Transitions to `id` without consulting priorities or `can_enter`.
    ///
    /// Returns `false` if `id` is already current or unknown.
    pub fn change_state(&mut self, id: StateId, ctx: &TickContext, agent: &mut A) -> bool {
        if self.current == Some(id) || id.0 >= self.states.len() {
            return false;
        }
        self.transition(id, ctx, agent);
        true
    }

    /// Moves to the highest priority enterable state other than the current one.
    ///
    /// Returns the new current state if a transition happened.
    pub fn evaluate_transitions(&mut self, ctx: &TickContext, agent: &mut A) -> Option<StateId> {
        let current = self.current;
        let next = self
            .order
            .iter()
            .copied()
            .filter(|&id| Some(id) != current)
            .find(|&id| self.states[id.0].can_enter(agent))?;
        self.transition(next, ctx, agent);
        Some(next)
    }

    pub fn tick(&mut self, ctx: &TickContext, agent: &mut A) {
        self.evaluate_transitions(ctx, agent);
        if let Some(id) = self.current {
            self.states[id.0].update(ctx, agent);
        }
    }

    fn transition(&mut self, next: StateId, ctx: &TickContext, agent: &mut A) {
        if let Some(prev) = self.current {
            let state = &mut self.states[prev.0];
            state.exit(ctx, agent);
            debug!(state = state.name(), "exit");
            if self.tracer.is_enabled() {
                let event = TraceEvent::new(ctx.tick, "state.exit")
                    .with_subject(state.name().to_owned());
                self.tracer.emit(event);
            }
        }

        self.current = Some(next);
        let state = &mut self.states[next.0];
        state.enter(ctx, agent);
        debug!(state = state.name(), priority = state.priority(), "enter");
        if self.tracer.is_enabled() {
            let event =
                TraceEvent::new(ctx.tick, "state.enter").with_subject(state.name().to_owned());
            self.tracer.emit(event);
        }
    }

    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    pub fn current_state(&self) -> Option<&dyn HybridState<A>> {
        self.current.map(|id| self.states[id.0].as_ref())
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_state().map(|s| s.name())
    }

    pub fn current_tree(&self) -> Option<&BehaviorTree<A>> {
        self.current_state().and_then(|s| s.behavior_tree())
    }

    pub fn state(&self, id: StateId) -> Option<&dyn HybridState<A>> {
        self.states.get(id.0).map(|s| s.as_ref())
    }

    pub fn find(&self, name: &str) -> Option<StateId> {
        self.states.iter().position(|s| s.name() == name).map(StateId)
    }

    /// Registered states, highest priority first.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &dyn HybridState<A>)> + '_ {
        self.order
            .iter()
            .map(move |&id| (id, self.states[id.0].as_ref()))
    }

    /// States whose `can_enter` holds right now, highest priority first. Includes the current
    /// state.
    pub fn valid_states<'a>(&'a self, agent: &'a A) -> impl Iterator<Item = StateId> + 'a {
        self.order
            .iter()
            .copied()
            .filter(move |&id| self.states[id.0].can_enter(agent))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }
}

impl<A> fmt::Debug for HybridStateMachine<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.states().map(|(_, s)| s.name()).collect();
        f.debug_struct("HybridStateMachine")
            .field("states", &names)
            .field("current", &self.current_name())
            .finish()
    }
}

impl<A> Policy<A> for HybridStateMachine<A>
where
    A: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: &mut A) {
        HybridStateMachine::tick(self, ctx, agent);
    }
}
