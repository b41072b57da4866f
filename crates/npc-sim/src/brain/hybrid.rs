//! Priority hybrid machine: Dead and PassedOut pre-empt the tree-driven Alive state.

use npc_core::TickContext;
use npc_fsm::{HybridState, HybridStateMachine, TreeState};
use npc_nav::NavAgent;

use super::tree::alive_tree;
use crate::villager::{Villager, MAX_STAT};

pub const DEAD: &str = "Dead";
pub const PASSED_OUT: &str = "PassedOut";
pub const ALIVE: &str = "Alive";

/// Collapsed from exhaustion. Recovers after a fixed share of the day.
#[derive(Debug)]
pub struct PassedOut {
    duration: f32,
    recovery: f32,
}

impl PassedOut {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            recovery: 0.0,
        }
    }
}

impl HybridState<Villager> for PassedOut {
    fn name(&self) -> &str {
        PASSED_OUT
    }

    fn priority(&self) -> i32 {
        50
    }

    fn can_enter(&self, v: &Villager) -> bool {
        v.fatigue >= MAX_STAT && v.is_alive()
    }

    fn enter(&mut self, _ctx: &TickContext, v: &mut Villager) {
        self.recovery = self.duration;
        v.sleeping = true;
        v.eating = false;
        v.tally.pass_outs += 1;
        v.halt();
    }

    fn update(&mut self, ctx: &TickContext, v: &mut Villager) {
        if self.recovery <= 0.0 {
            return;
        }
        self.recovery -= ctx.dt();
        if self.recovery <= 0.0 {
            v.add_fatigue(-100.0);
        }
    }

    fn exit(&mut self, _ctx: &TickContext, v: &mut Villager) {
        v.sleeping = false;
        v.mover.set_stopped(false);
    }
}

pub fn build(day: f32) -> anyhow::Result<HybridStateMachine<Villager>> {
    let mut machine = HybridStateMachine::new();

    machine.register(
        TreeState::new(DEAD, 100, |v: &Villager| !v.is_alive()).on_enter(|v: &mut Villager| {
            v.dead = true;
            v.eating = false;
            v.sleeping = false;
            v.halt();
        }),
    );
    machine.register(PassedOut::new(day * 0.5));
    machine.register(
        TreeState::new(ALIVE, 0, |v: &Villager| v.is_alive() && v.fatigue < MAX_STAT)
            .with_tree(alive_tree(day)?)
            .on_enter(|v: &mut Villager| v.mover.set_stopped(false))
            .on_exit(|v: &mut Villager| {
                v.eating = false;
                v.sleeping = false;
                v.mover.reset_path();
            }),
    );

    Ok(machine)
}
