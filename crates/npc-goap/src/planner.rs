use core::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{Goal, Plannable, WorldState};

/// Index into the action slice a plan was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub usize);

/// Ordered actions that take the start state to one meeting the goal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    pub steps: VecDeque<ActionId>,
    pub cost: f32,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names resolved against the slice the plan was computed from.
    pub fn names<'a, T>(&'a self, actions: &'a [T]) -> impl Iterator<Item = &'a str> + 'a
    where
        T: Plannable,
    {
        self.steps
            .iter()
            .filter_map(move |id| actions.get(id.0))
            .map(|a| a.descriptor().name.as_ref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Search nodes popped before giving up. `None` searches until the frontier is empty, which
    /// never happens if some action is always applicable.
    pub max_expansions: Option<usize>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_expansions: Some(4096),
        }
    }
}

/// Uniform-cost forward search.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

struct SearchNode {
    parent: Option<usize>,
    action: Option<ActionId>,
    state: WorldState,
    cost: f32,
}

#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    cost: f32,
    seq: u64,
    node: usize,
}

impl OpenEntry {
    fn cmp_key(&self, other: &Self) -> Ordering {
        self.cost.total_cmp(&other.cost).then(self.seq.cmp(&other.seq))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_key(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.cmp_key(self)
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> PlannerConfig {
        self.config
    }

    /// Cheapest action sequence from `start` to a state meeting `goal`, or `None` if the
    /// frontier empties (or the expansion budget runs out) first.
    ///
    /// Nodes are expanded in order of cumulative cost; equal costs go first-in first-out. A
    /// `start` that already meets the goal yields an empty plan.
    pub fn plan<T>(&self, start: &WorldState, actions: &[T], goal: &Goal) -> Option<Plan>
    where
        T: Plannable,
    {
        let mut nodes = vec![SearchNode {
            parent: None,
            action: None,
            state: start.clone(),
            cost: 0.0,
        }];
        let mut open = BinaryHeap::new();
        let mut seq: u64 = 0;
        open.push(OpenEntry {
            cost: 0.0,
            seq,
            node: 0,
        });

        let mut expansions: usize = 0;

        while let Some(entry) = open.pop() {
            if goal.is_satisfied(&nodes[entry.node].state) {
                let plan = build_plan(&nodes, entry.node);
                trace!(
                    goal = %goal.name,
                    steps = plan.len(),
                    cost = plan.cost,
                    expansions,
                    "plan found"
                );
                return Some(plan);
            }

            if let Some(max) = self.config.max_expansions {
                if expansions >= max {
                    debug!(goal = %goal.name, expansions, "expansion budget exhausted");
                    return None;
                }
            }
            expansions += 1;

            for (index, action) in actions.iter().enumerate() {
                let current = &nodes[entry.node];
                if !action.can_run(&current.state) {
                    continue;
                }
                let descriptor = action.descriptor();
                let child = SearchNode {
                    parent: Some(entry.node),
                    action: Some(ActionId(index)),
                    state: descriptor.apply(&current.state),
                    cost: current.cost + descriptor.cost,
                };

                seq += 1;
                open.push(OpenEntry {
                    cost: child.cost,
                    seq,
                    node: nodes.len(),
                });
                nodes.push(child);
            }
        }

        trace!(goal = %goal.name, expansions, "frontier exhausted");
        None
    }
}

fn build_plan(nodes: &[SearchNode], mut index: usize) -> Plan {
    let cost = nodes[index].cost;
    let mut steps = VecDeque::new();
    while let Some(action) = nodes[index].action {
        steps.push_front(action);
        match nodes[index].parent {
            Some(parent) => index = parent,
            None => break,
        }
    }
    Plan { steps, cost }
}
