use core::fmt;

use npc_core::TickContext;
use npc_nav::{NavAgent, PathStatus, Vec2};
use tracing::debug;

use crate::Status;

/// Accessor handing a leaf the agent's movement capability for the duration of one tick.
pub type NavAccess<A> = fn(&mut A) -> Option<&mut dyn NavAgent>;

type Effect<A> = Box<dyn FnMut(&mut A)>;
type Predicate<A> = Box<dyn Fn(&A) -> bool>;
type TargetFn<A> = Box<dyn Fn(&A) -> Option<Vec2>>;

/// Tree description consumed by [`BehaviorTree::new`](crate::BehaviorTree::new).
///
/// Only the composite variants carry children, so a leaf with children cannot be expressed.
pub enum Node<A> {
    Selector {
        name: String,
        children: Vec<Node<A>>,
    },
    Sequence {
        name: String,
        children: Vec<Node<A>>,
    },
    Action {
        name: String,
        action: ActionNode<A>,
    },
    Condition {
        name: String,
        condition: ConditionNode<A>,
    },
    MoveTo {
        name: String,
        move_to: MoveToNode<A>,
    },
}

impl<A> Node<A> {
    pub fn selector(name: impl Into<String>, children: Vec<Node<A>>) -> Self {
        Node::Selector {
            name: name.into(),
            children,
        }
    }

    pub fn sequence(name: impl Into<String>, children: Vec<Node<A>>) -> Self {
        Node::Sequence {
            name: name.into(),
            children,
        }
    }

    pub fn action(name: impl Into<String>, action: ActionNode<A>) -> Self {
        Node::Action {
            name: name.into(),
            action,
        }
    }

    pub fn condition<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&A) -> bool + 'static,
    {
        Node::Condition {
            name: name.into(),
            condition: ConditionNode::new(predicate),
        }
    }

    pub fn move_to(name: impl Into<String>, move_to: MoveToNode<A>) -> Self {
        Node::MoveTo {
            name: name.into(),
            move_to,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Selector { name, .. }
            | Node::Sequence { name, .. }
            | Node::Action { name, .. }
            | Node::Condition { name, .. }
            | Node::MoveTo { name, .. } => name,
        }
    }
}

/// Per-node behavior stored in the tree arena.
pub enum NodeKind<A> {
    Composite(Composite),
    Action(ActionNode<A>),
    Condition(ConditionNode<A>),
    MoveTo(MoveToNode<A>),
}

impl<A> NodeKind<A> {
    pub fn is_leaf(&self) -> bool {
        !matches!(self, NodeKind::Composite(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Composite(Composite::Selector { .. }) => "selector",
            NodeKind::Composite(Composite::Sequence { .. }) => "sequence",
            NodeKind::Action(_) => "action",
            NodeKind::Condition(_) => "condition",
            NodeKind::MoveTo(_) => "move_to",
        }
    }
}

impl<A> fmt::Debug for NodeKind<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Composite(c) => f.debug_tuple("Composite").field(c).finish(),
            NodeKind::Action(a) => f.debug_tuple("Action").field(a).finish(),
            NodeKind::Condition(_) => f.write_str("Condition"),
            NodeKind::MoveTo(m) => f.debug_tuple("MoveTo").field(m).finish(),
        }
    }
}

/// Composite bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// `last_index` is the child that ended the most recent scan. It is never used to resume.
    Selector { last_index: Option<usize> },
    /// `cursor` is the child the next tick starts from.
    Sequence { cursor: usize },
}

/// Timed leaf: `on_start` on the first tick of a run, `on_complete` once the timer drains.
pub struct ActionNode<A> {
    duration: f32,
    remaining: f32,
    started: bool,
    on_start: Option<Effect<A>>,
    on_complete: Option<Effect<A>>,
}

impl<A> ActionNode<A> {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: 0.0,
            started: false,
            on_start: None,
            on_complete: None,
        }
    }

    pub fn on_start<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut A) + 'static,
    {
        self.on_start = Some(Box::new(f));
        self
    }

    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut A) + 'static,
    {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub(crate) fn tick(&mut self, name: &str, ctx: &TickContext, agent: &mut A) -> Status {
        if !self.started {
            self.started = true;
            self.remaining = self.duration;
            debug!(node = name, duration = self.duration, "action started");
            if let Some(f) = self.on_start.as_mut() {
                f(agent);
            }
        }

        self.remaining -= ctx.dt();
        if self.remaining > 0.0 {
            return Status::Running;
        }

        if let Some(f) = self.on_complete.as_mut() {
            f(agent);
        }
        self.started = false;
        debug!(node = name, "action completed");
        Status::Success
    }

    pub(crate) fn reset(&mut self) {
        self.started = false;
        self.remaining = 0.0;
    }
}

impl<A> fmt::Debug for ActionNode<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionNode")
            .field("duration", &self.duration)
            .field("remaining", &self.remaining)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

pub struct ConditionNode<A> {
    predicate: Predicate<A>,
}

impl<A> ConditionNode<A> {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&A) -> bool + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }

    pub(crate) fn evaluate(&self, agent: &A) -> Status {
        if (self.predicate)(agent) {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

/// Drives the agent's [`NavAgent`] towards a target and succeeds on arrival.
pub struct MoveToNode<A> {
    nav: NavAccess<A>,
    target: TargetFn<A>,
    stopping_distance: f32,
    started: bool,
}

impl<A> MoveToNode<A> {
    pub const DEFAULT_STOPPING_DISTANCE: f32 = 0.5;

    pub fn new<T>(nav: NavAccess<A>, target: T) -> Self
    where
        T: Fn(&A) -> Option<Vec2> + 'static,
    {
        Self {
            nav,
            target: Box::new(target),
            stopping_distance: Self::DEFAULT_STOPPING_DISTANCE,
            started: false,
        }
    }

    pub fn stopping_distance(mut self, distance: f32) -> Self {
        self.stopping_distance = distance.max(0.0);
        self
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub(crate) fn tick(&mut self, name: &str, agent: &mut A) -> Status {
        let Some(target) = (self.target)(&*agent) else {
            return Status::Failure;
        };
        let Some(nav) = (self.nav)(agent) else {
            return Status::Failure;
        };

        if !self.started {
            nav.set_stopping_distance(self.stopping_distance);
            nav.set_destination(target);
            self.started = true;
            debug!(node = name, x = target.x, y = target.y, "move issued");
        }

        if nav.path_pending() {
            return Status::Running;
        }

        if nav.path_status() == PathStatus::Invalid {
            self.started = false;
            nav.reset_path();
            debug!(node = name, "path invalid");
            return Status::Failure;
        }

        if nav.remaining_distance() <= nav.stopping_distance() {
            self.started = false;
            nav.reset_path();
            debug!(node = name, "arrived");
            return Status::Success;
        }

        Status::Running
    }

    pub(crate) fn reset(&mut self) {
        self.started = false;
    }
}

impl<A> fmt::Debug for MoveToNode<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveToNode")
            .field("stopping_distance", &self.stopping_distance)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}
