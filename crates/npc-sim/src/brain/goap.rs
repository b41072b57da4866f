//! Planning villager: walk, gather, eat and sleep actions toward three competing goals.

use npc_core::{Policy, TickContext};
use npc_goap::{ActionDescriptor, GoapAction, GoapAgent, Goal, Plannable};
use npc_nav::{NavAgent, PathStatus, Vec2};

use crate::villager::{Villager, ARRIVAL_RADIUS};

pub struct Walk {
    descriptor: ActionDescriptor,
    target: fn(&Villager) -> Vec2,
}

impl Walk {
    pub fn to_bush() -> Self {
        Self {
            descriptor: ActionDescriptor::new("MoveToBush", 1.0)
                .precondition("Alive", 1)
                .effect("AtBush", 1),
            target: |v| v.bush,
        }
    }

    pub fn to_bed() -> Self {
        Self {
            descriptor: ActionDescriptor::new("MoveToBed", 1.0)
                .precondition("Alive", 1)
                .effect("AtBed", 1),
            target: |v| v.bed,
        }
    }
}

impl Plannable for Walk {
    fn descriptor(&self) -> &ActionDescriptor {
        &self.descriptor
    }
}

impl GoapAction<Villager> for Walk {
    fn on_enter(&mut self, _ctx: &TickContext, v: &mut Villager) {
        let target = (self.target)(v);
        v.mover.set_stopped(false);
        v.mover.set_stopping_distance(ARRIVAL_RADIUS);
        v.mover.set_destination(target);
    }

    fn perform(&mut self, _ctx: &TickContext, v: &mut Villager) -> bool {
        let mover = &v.mover;
        if mover.path_pending() {
            return false;
        }
        mover.path_status() == PathStatus::Invalid
            || mover.remaining_distance() <= mover.stopping_distance()
    }

    fn on_exit(&mut self, _ctx: &TickContext, v: &mut Villager) {
        v.mover.reset_path();
    }
}

pub struct Eat {
    descriptor: ActionDescriptor,
    elapsed: f32,
}

impl Eat {
    pub fn new() -> Self {
        Self {
            descriptor: ActionDescriptor::new("Eat", 1.0)
                .precondition("HasFood", 1)
                .precondition("Alive", 1)
                .effect("NotHungry", 1)
                .effect("HasFood", -1),
            elapsed: 0.0,
        }
    }
}

impl Default for Eat {
    fn default() -> Self {
        Self::new()
    }
}

impl Plannable for Eat {
    fn descriptor(&self) -> &ActionDescriptor {
        &self.descriptor
    }
}

impl GoapAction<Villager> for Eat {
    fn on_enter(&mut self, _ctx: &TickContext, v: &mut Villager) {
        self.elapsed = 0.0;
        v.eating = true;
    }

    fn perform(&mut self, ctx: &TickContext, v: &mut Villager) -> bool {
        self.elapsed += ctx.dt();
        if self.elapsed < v.days(0.05) {
            return false;
        }
        v.add_food(-1);
        v.add_hunger(-40.0);
        v.tally.meals += 1;
        true
    }

    fn on_exit(&mut self, _ctx: &TickContext, v: &mut Villager) {
        v.eating = false;
    }
}

pub struct Gather {
    descriptor: ActionDescriptor,
    elapsed: f32,
}

impl Gather {
    pub fn new() -> Self {
        Self {
            descriptor: ActionDescriptor::new("Gather", 2.0)
                .precondition("AtBush", 1)
                .precondition("Alive", 1)
                .effect("HasFood", 1),
            elapsed: 0.0,
        }
    }
}

impl Default for Gather {
    fn default() -> Self {
        Self::new()
    }
}

impl Plannable for Gather {
    fn descriptor(&self) -> &ActionDescriptor {
        &self.descriptor
    }
}

impl GoapAction<Villager> for Gather {
    fn on_enter(&mut self, _ctx: &TickContext, _v: &mut Villager) {
        self.elapsed = 0.0;
    }

    /// Gathering is work: hunger and fatigue each rise by 20 spread over the duration.
    fn perform(&mut self, ctx: &TickContext, v: &mut Villager) -> bool {
        let duration = v.days(1.0 / 8.0);
        let dt = ctx.dt();
        self.elapsed += dt;
        v.add_fatigue(20.0 * dt / duration);
        v.add_hunger(20.0 * dt / duration);
        if self.elapsed < duration {
            return false;
        }
        v.add_food(2);
        v.tally.gathers += 1;
        true
    }
}

pub struct Sleep {
    descriptor: ActionDescriptor,
    elapsed: f32,
}

impl Sleep {
    pub fn new() -> Self {
        Self {
            descriptor: ActionDescriptor::new("Sleep", 1.5)
                .precondition("AtBed", 1)
                .precondition("Alive", 1)
                .effect("NotTired", 1),
            elapsed: 0.0,
        }
    }
}

impl Default for Sleep {
    fn default() -> Self {
        Self::new()
    }
}

impl Plannable for Sleep {
    fn descriptor(&self) -> &ActionDescriptor {
        &self.descriptor
    }
}

impl GoapAction<Villager> for Sleep {
    fn on_enter(&mut self, _ctx: &TickContext, v: &mut Villager) {
        self.elapsed = 0.0;
        v.sleeping = true;
    }

    fn perform(&mut self, ctx: &TickContext, v: &mut Villager) -> bool {
        self.elapsed += ctx.dt();
        if self.elapsed < v.days(0.25) {
            return false;
        }
        v.add_fatigue(-80.0);
        v.tally.sleeps += 1;
        true
    }

    fn on_exit(&mut self, _ctx: &TickContext, v: &mut Villager) {
        v.sleeping = false;
    }
}

fn goal_priority(goal: &Goal, v: &Villager) -> i32 {
    match goal.name.as_ref() {
        "Eat" => 1 + v.hunger as i32,
        "Sleep" => 1 + v.fatigue as i32,
        "Gather" => v.hunger as i32 - v.food * 10,
        _ => goal.priority,
    }
}

/// Goal-driven villager that stops planning for good once dead.
pub struct GoapBrain {
    agent: GoapAgent<Villager>,
}

impl GoapBrain {
    pub fn new() -> Self {
        let agent = GoapAgent::new(Villager::world_state)
            .with_priority_fn(goal_priority)
            .with_action(Walk::to_bush())
            .with_action(Walk::to_bed())
            .with_action(Eat::new())
            .with_action(Gather::new())
            .with_action(Sleep::new())
            .with_goal(Goal::new("Eat", 0).desire("Alive", 1).desire("NotHungry", 1))
            .with_goal(Goal::new("Sleep", 0).desire("Alive", 1).desire("NotTired", 1))
            .with_goal(Goal::new("Gather", 0).desire("Alive", 1).desire("HasFood", 2));
        Self { agent }
    }

    pub fn agent(&self) -> &GoapAgent<Villager> {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut GoapAgent<Villager> {
        &mut self.agent
    }

    pub fn tick(&mut self, ctx: &TickContext, v: &mut Villager) {
        if v.dead {
            return;
        }
        if !v.is_alive() {
            self.agent.abort_plan(ctx, v);
            v.dead = true;
            v.eating = false;
            v.sleeping = false;
            v.halt();
            return;
        }
        self.agent.tick(ctx, v);
    }
}

impl Default for GoapBrain {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy<Villager> for GoapBrain {
    fn tick(&mut self, ctx: &TickContext, agent: &mut Villager) {
        GoapBrain::tick(self, ctx, agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    #[test]
    fn empty_pantry_plans_a_trip_to_the_bush() {
        let mut brain = GoapBrain::new();
        let mut v = Villager::from_config(&SimConfig::default());
        v.food = 0;
        v.hunger = 90.0;

        brain.tick(&TickContext::new(0, 0.1), &mut v);
        assert_eq!(brain.agent().current_goal_name(), Some("Eat"));
        assert_eq!(brain.agent().current_action_name(), Some("MoveToBush"));
        let rest: Vec<_> = brain.agent().pending_action_names().collect();
        assert_eq!(rest, vec!["Gather", "Eat"]);
    }

    #[test]
    fn death_aborts_the_plan_once() {
        let mut brain = GoapBrain::new();
        let mut v = Villager::from_config(&SimConfig::default());
        v.hunger = 90.0;
        let mut ctx = TickContext::new(0, 0.1);
        brain.tick(&ctx, &mut v);
        assert!(!brain.agent().is_idle());

        brain.agent_mut().tracer_mut().enable_log();
        v.health = 0.0;
        for _ in 0..3 {
            ctx = ctx.next();
            brain.tick(&ctx, &mut v);
        }
        assert!(v.dead);
        assert!(brain.agent().is_idle());
        let aborted = brain
            .agent()
            .tracer()
            .log()
            .map_or(0, |log| log.tags().filter(|t| *t == "plan.aborted").count());
        assert_eq!(aborted, 1);
    }

    #[test]
    fn default_actions_match_their_constructors() {
        assert_eq!(Eat::default().descriptor(), Eat::new().descriptor());
        assert_eq!(Gather::default().descriptor().cost, 2.0);
        assert_eq!(Sleep::default().descriptor().name, "Sleep");
    }
}
