use core::cmp::Reverse;
use core::fmt;
use std::collections::VecDeque;

use npc_core::{Policy, TickContext};
use npc_trace::{TraceEvent, Tracer};
use tracing::debug;

use crate::{ActionId, GoapAction, Goal, Planner, WorldState};

type StateFn<A> = Box<dyn Fn(&A) -> WorldState>;
type PriorityFn<A> = Box<dyn Fn(&Goal, &A) -> i32>;

/// Plans for its goals and executes the resulting action queue, one action at a time.
///
/// Planning happens only when no action is active and the queue is empty. Goals are tried by
/// descending priority, skipping those the current snapshot already satisfies; the first plan
/// found is adopted. With no plan the agent idles and retries next tick.
pub struct GoapAgent<A> {
    planner: Planner,
    actions: Vec<Box<dyn GoapAction<A>>>,
    goals: Vec<Goal>,
    state_fn: StateFn<A>,
    priority_fn: Option<PriorityFn<A>>,
    current_goal: Option<usize>,
    current_action: Option<ActionId>,
    queue: VecDeque<ActionId>,
    tracer: Tracer,
}

impl<A> GoapAgent<A> {
    /// `state_fn` builds the planning snapshot from the agent, once per planning attempt.
    pub fn new<F>(state_fn: F) -> Self
    where
        F: Fn(&A) -> WorldState + 'static,
    {
        Self {
            planner: Planner::default(),
            actions: Vec::new(),
            goals: Vec::new(),
            state_fn: Box::new(state_fn),
            priority_fn: None,
            current_goal: None,
            current_action: None,
            queue: VecDeque::new(),
            tracer: Tracer::default(),
        }
    }

    pub fn with_planner(mut self, planner: Planner) -> Self {
        self.planner = planner;
        self
    }

    /// Recompute goal priorities from the agent at every planning attempt instead of using
    /// [`Goal::priority`].
    pub fn with_priority_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Goal, &A) -> i32 + 'static,
    {
        self.priority_fn = Some(Box::new(f));
        self
    }

    pub fn with_action<T>(mut self, action: T) -> Self
    where
        T: GoapAction<A> + 'static,
    {
        self.add_action(action);
        self
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.add_goal(goal);
        self
    }

    pub fn add_action<T>(&mut self, action: T) -> ActionId
    where
        T: GoapAction<A> + 'static,
    {
        self.actions.push(Box::new(action));
        ActionId(self.actions.len() - 1)
    }

    pub fn add_goal(&mut self, goal: Goal) {
        self.goals.push(goal);
    }

    pub fn actions(&self) -> &[Box<dyn GoapAction<A>>] {
        &self.actions
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn tick(&mut self, ctx: &TickContext, agent: &mut A) {
        if self.current_action.is_none() && self.queue.is_empty() {
            self.replan(ctx, agent);
        }

        if self.current_action.is_none() {
            if let Some(id) = self.queue.pop_front() {
                self.current_action = Some(id);
                let action = &mut self.actions[id.0];
                action.on_enter(ctx, agent);
                debug!(action = action.name(), "action entered");
                self.emit(ctx, "action.enter", id);
            }
        }

        if let Some(id) = self.current_action {
            if self.actions[id.0].perform(ctx, agent) {
                self.finish_action(id, ctx, agent);
            }
        }
    }

    /// Tries every outstanding goal, most urgent first, and adopts the first plan found.
    ///
    /// Returns `true` if a plan was adopted. Does nothing while an action is active.
    pub fn replan(&mut self, ctx: &TickContext, agent: &mut A) -> bool {
        if self.current_action.is_some() {
            return false;
        }

        let world = (self.state_fn)(&*agent);
        let mut order: Vec<(usize, i32)> = self
            .goals
            .iter()
            .enumerate()
            .map(|(i, goal)| {
                let priority = match &self.priority_fn {
                    Some(f) => f(goal, &*agent),
                    None => goal.priority,
                };
                (i, priority)
            })
            .collect();
        order.sort_by_key(|&(_, priority)| Reverse(priority));

        for (index, priority) in order {
            let goal = &self.goals[index];
            if !goal.can_run(&world) {
                continue;
            }
            let Some(plan) = self.planner.plan(&world, &self.actions, goal) else {
                continue;
            };

            debug!(
                goal = %goal.name,
                priority,
                steps = plan.len(),
                cost = plan.cost,
                "plan adopted"
            );
            if self.tracer.is_enabled() {
                let event =
                    TraceEvent::new(ctx.tick, "plan.adopted").with_subject(goal.name.clone());
                self.tracer.emit(event);
            }
            self.current_goal = Some(index);
            self.queue = plan.steps;
            return true;
        }

        self.current_goal = None;
        debug!(goals = self.goals.len(), "no plan for any goal");
        if self.tracer.is_enabled() {
            self.tracer.emit(TraceEvent::new(ctx.tick, "plan.none"));
        }
        false
    }

    /// Drops the queued plan. An active action gets its `on_exit` call.
    pub fn abort_plan(&mut self, ctx: &TickContext, agent: &mut A) {
        if let Some(id) = self.current_action {
            self.finish_action(id, ctx, agent);
        }
        self.queue.clear();
        if let Some(index) = self.current_goal.take() {
            debug!(goal = %self.goals[index].name, "plan aborted");
            if self.tracer.is_enabled() {
                let event = TraceEvent::new(ctx.tick, "plan.aborted")
                    .with_subject(self.goals[index].name.clone());
                self.tracer.emit(event);
            }
        }
    }

    /// `true` when there is no active action and nothing queued.
    pub fn is_idle(&self) -> bool {
        self.current_action.is_none() && self.queue.is_empty()
    }

    pub fn current_goal(&self) -> Option<&Goal> {
        self.current_goal.map(|i| &self.goals[i])
    }

    pub fn current_goal_name(&self) -> Option<&str> {
        self.current_goal().map(|g| g.name.as_ref())
    }

    pub fn current_action(&self) -> Option<ActionId> {
        self.current_action
    }

    pub fn current_action_name(&self) -> Option<&str> {
        self.current_action.map(|id| self.actions[id.0].name())
    }

    pub fn pending_actions(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.queue.iter().copied()
    }

    pub fn pending_action_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.queue.iter().map(|id| self.actions[id.0].name())
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    fn finish_action(&mut self, id: ActionId, ctx: &TickContext, agent: &mut A) {
        let action = &mut self.actions[id.0];
        action.on_exit(ctx, agent);
        debug!(action = action.name(), "action exited");
        self.current_action = None;
        self.emit(ctx, "action.exit", id);
    }

    fn emit(&mut self, ctx: &TickContext, tag: &'static str, id: ActionId) {
        if self.tracer.is_enabled() {
            let name = self.actions[id.0].name().to_owned();
            self.tracer.emit(TraceEvent::new(ctx.tick, tag).with_subject(name));
        }
    }
}

impl<A> fmt::Debug for GoapAgent<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoapAgent")
            .field("goal", &self.current_goal_name())
            .field("action", &self.current_action_name())
            .field("pending", &self.queue.len())
            .finish_non_exhaustive()
    }
}

impl<A> Policy<A> for GoapAgent<A>
where
    A: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: &mut A) {
        GoapAgent::tick(self, ctx, agent);
    }
}
