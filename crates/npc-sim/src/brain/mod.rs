//! One villager brain per decision engine, behind a single dispatching type.

pub mod fsm;
pub mod goap;
pub mod hybrid;
pub mod tree;

use anyhow::Context;
use npc_bt::BehaviorTree;
use npc_core::{Policy, TickContext};
use npc_fsm::{HybridStateMachine, StateMachine};
use npc_trace::Tracer;

use crate::config::Engine;
use crate::villager::Villager;

pub use goap::GoapBrain;

pub enum Brain {
    Tree {
        tree: BehaviorTree<Villager>,
        tracer: Tracer,
    },
    Hybrid(HybridStateMachine<Villager>),
    Fsm(StateMachine<Villager>),
    Goap(GoapBrain),
}

impl Brain {
    /// Assembles the villager content for `engine`. Durations scale with `day_length` seconds.
    pub fn build(engine: Engine, day_length: f32) -> anyhow::Result<Self> {
        let brain = match engine {
            Engine::Bt => Brain::Tree {
                tree: tree::survival_tree(day_length).context("building survival tree")?,
                tracer: Tracer::default(),
            },
            Engine::Hybrid => {
                Brain::Hybrid(hybrid::build(day_length).context("building hybrid machine")?)
            }
            Engine::Fsm => Brain::Fsm(fsm::build().context("building state machine")?),
            Engine::Goap => Brain::Goap(GoapBrain::new()),
        };
        Ok(brain)
    }

    pub fn engine(&self) -> Engine {
        match self {
            Brain::Tree { .. } => Engine::Bt,
            Brain::Hybrid(_) => Engine::Hybrid,
            Brain::Fsm(_) => Engine::Fsm,
            Brain::Goap(_) => Engine::Goap,
        }
    }

    /// Puts the machines in their starting state. Trees and planners need no warm-up.
    pub fn start(&mut self, ctx: &TickContext, villager: &mut Villager) -> anyhow::Result<()> {
        match self {
            Brain::Hybrid(machine) => {
                let alive = machine
                    .find(hybrid::ALIVE)
                    .context("hybrid machine has no Alive state")?;
                machine.change_state(alive, ctx, villager);
            }
            Brain::Fsm(machine) => machine.change_state(fsm::IDLE, ctx, villager)?,
            Brain::Tree { .. } | Brain::Goap(_) => {}
        }
        Ok(())
    }

    /// The engine's trace switchboard. Trees have no events of their own; theirs stays silent.
    pub fn tracer_mut(&mut self) -> &mut Tracer {
        match self {
            Brain::Tree { tracer, .. } => tracer,
            Brain::Hybrid(machine) => machine.tracer_mut(),
            Brain::Fsm(machine) => machine.tracer_mut(),
            Brain::Goap(brain) => brain.agent_mut().tracer_mut(),
        }
    }

    /// Short human-readable summary of what the brain is doing.
    pub fn describe(&self) -> String {
        match self {
            Brain::Tree { tree, .. } => format!("tree {}", tree.last_status()),
            Brain::Hybrid(machine) => {
                format!("state {}", machine.current_name().unwrap_or("none"))
            }
            Brain::Fsm(machine) => format!("state {}", machine.current_name().unwrap_or("none")),
            Brain::Goap(brain) => {
                let agent = brain.agent();
                match (agent.current_goal_name(), agent.current_action_name()) {
                    (Some(goal), Some(action)) => format!("goal {goal}, action {action}"),
                    (Some(goal), None) => format!("goal {goal}"),
                    _ => "idle".to_owned(),
                }
            }
        }
    }

    /// Indented tree outline, for engines that run a behavior tree.
    pub fn outline(&self) -> Option<String> {
        match self {
            Brain::Tree { tree, .. } => Some(tree.to_string()),
            Brain::Hybrid(machine) => machine.current_tree().map(ToString::to_string),
            Brain::Fsm(_) | Brain::Goap(_) => None,
        }
    }
}

impl Policy<Villager> for Brain {
    fn tick(&mut self, ctx: &TickContext, agent: &mut Villager) {
        match self {
            Brain::Tree { tree, .. } => {
                tree.tick(ctx, agent);
            }
            Brain::Hybrid(machine) => machine.tick(ctx, agent),
            Brain::Fsm(machine) => Policy::tick(machine, ctx, agent),
            Brain::Goap(brain) => brain.tick(ctx, agent),
        }
    }
}
