//! Explicit machine: every state picks its own successor, a guard forces death and collapse.

use npc_core::TickContext;
use npc_fsm::{State, StateKey, StateMachine};
use npc_nav::{NavAgent, PathStatus, Vec2};

use crate::villager::{Villager, ARRIVAL_RADIUS, MAX_STAT};

pub const IDLE: StateKey = StateKey::new("Idle");
pub const EAT: StateKey = StateKey::new("Eat");
pub const GATHER: StateKey = StateKey::new("Gather");
pub const SLEEP: StateKey = StateKey::new("Sleep");
pub const PASSED_OUT: StateKey = StateKey::new("PassedOut");
pub const DEAD: StateKey = StateKey::new("Dead");

fn head_to(v: &mut Villager, place: Vec2) {
    v.mover.set_stopped(false);
    v.mover.set_stopping_distance(ARRIVAL_RADIUS);
    v.mover.set_destination(place);
}

fn arrived(v: &Villager) -> bool {
    let mover = &v.mover;
    !mover.path_pending()
        && (mover.path_status() == PathStatus::Invalid
            || mover.remaining_distance() <= mover.stopping_distance())
}

#[derive(Debug, Default)]
pub struct Idle;

impl State<Villager> for Idle {
    fn key(&self) -> StateKey {
        IDLE
    }

    fn update(&mut self, _ctx: &TickContext, v: &mut Villager) -> Option<StateKey> {
        if v.hunger >= 40.0 && v.food > 0 {
            Some(EAT)
        } else if v.food <= 0 {
            Some(GATHER)
        } else if v.fatigue >= 70.0 {
            Some(SLEEP)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct Eat {
    timer: f32,
}

impl State<Villager> for Eat {
    fn key(&self) -> StateKey {
        EAT
    }

    fn can_enter(&self, v: &Villager) -> bool {
        v.food > 0
    }

    fn enter(&mut self, _ctx: &TickContext, v: &mut Villager) {
        self.timer = v.days(0.05);
        v.eating = true;
    }

    fn update(&mut self, ctx: &TickContext, v: &mut Villager) -> Option<StateKey> {
        self.timer -= ctx.dt();
        if self.timer > 0.0 {
            return None;
        }
        let eaten = v.rng.range_i32(30, 41) as f32;
        v.add_food(-1);
        v.add_hunger(-eaten);
        v.tally.meals += 1;
        Some(IDLE)
    }

    fn exit(&mut self, _ctx: &TickContext, v: &mut Villager) {
        v.eating = false;
    }
}

#[derive(Debug, Default)]
pub struct Gather {
    timer: f32,
    reached: bool,
}

impl State<Villager> for Gather {
    fn key(&self) -> StateKey {
        GATHER
    }

    fn enter(&mut self, _ctx: &TickContext, v: &mut Villager) {
        let fraction = v.rng.range_f32(0.15, 0.26);
        self.timer = v.days(fraction);
        self.reached = false;
        let bush = v.bush;
        head_to(v, bush);
    }

    fn update(&mut self, ctx: &TickContext, v: &mut Villager) -> Option<StateKey> {
        if !self.reached {
            self.reached = arrived(v);
            return None;
        }
        self.timer -= ctx.dt();
        if self.timer > 0.0 {
            return None;
        }
        let picked = v.rng.range_i32(1, 4);
        v.add_food(picked);
        v.tally.gathers += 1;
        Some(IDLE)
    }

    fn exit(&mut self, _ctx: &TickContext, v: &mut Villager) {
        v.mover.reset_path();
    }
}

#[derive(Debug, Default)]
pub struct Sleep {
    timer: f32,
    reached: bool,
}

impl State<Villager> for Sleep {
    fn key(&self) -> StateKey {
        SLEEP
    }

    fn enter(&mut self, _ctx: &TickContext, v: &mut Villager) {
        self.timer = v.days(0.4);
        self.reached = false;
        let bed = v.bed;
        head_to(v, bed);
    }

    fn update(&mut self, ctx: &TickContext, v: &mut Villager) -> Option<StateKey> {
        if !self.reached {
            self.reached = arrived(v);
            v.sleeping = self.reached;
            return None;
        }
        self.timer -= ctx.dt();
        if self.timer > 0.0 {
            return None;
        }
        let rested = v.rng.range_i32(80, 101) as f32;
        v.add_fatigue(-rested);
        v.tally.sleeps += 1;
        Some(IDLE)
    }

    fn exit(&mut self, _ctx: &TickContext, v: &mut Villager) {
        v.sleeping = false;
        v.mover.reset_path();
    }
}

#[derive(Debug, Default)]
pub struct PassedOut {
    timer: f32,
}

impl State<Villager> for PassedOut {
    fn key(&self) -> StateKey {
        PASSED_OUT
    }

    fn enter(&mut self, _ctx: &TickContext, v: &mut Villager) {
        self.timer = v.days(1.0);
        v.sleeping = true;
        v.eating = false;
        v.tally.pass_outs += 1;
        v.halt();
    }

    fn update(&mut self, ctx: &TickContext, v: &mut Villager) -> Option<StateKey> {
        self.timer -= ctx.dt();
        if self.timer > 0.0 {
            return None;
        }
        v.add_fatigue(-100.0);
        Some(IDLE)
    }

    fn exit(&mut self, _ctx: &TickContext, v: &mut Villager) {
        v.sleeping = false;
        v.mover.set_stopped(false);
    }
}

#[derive(Debug, Default)]
pub struct Dead;

impl State<Villager> for Dead {
    fn key(&self) -> StateKey {
        DEAD
    }

    fn can_enter(&self, v: &Villager) -> bool {
        !v.is_alive()
    }

    fn enter(&mut self, _ctx: &TickContext, v: &mut Villager) {
        v.dead = true;
        v.eating = false;
        v.sleeping = false;
        v.halt();
    }

    fn update(&mut self, _ctx: &TickContext, _v: &mut Villager) -> Option<StateKey> {
        None
    }
}

/// Death wins over everything and is final; collapse interrupts any other state once.
fn guard(current: Option<StateKey>, v: &Villager) -> Option<StateKey> {
    if current == Some(DEAD) {
        return None;
    }
    if !v.is_alive() {
        return Some(DEAD);
    }
    if v.fatigue >= MAX_STAT && current != Some(PASSED_OUT) {
        return Some(PASSED_OUT);
    }
    None
}

pub fn build() -> anyhow::Result<StateMachine<Villager>> {
    let mut machine = StateMachine::new().with_guard(guard);
    machine.register(Idle)?;
    machine.register(Eat::default())?;
    machine.register(Gather::default())?;
    machine.register(Sleep::default())?;
    machine.register(PassedOut::default())?;
    machine.register(Dead)?;
    Ok(machine)
}
