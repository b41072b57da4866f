//! The simulated villager: needs, flags, location and movement.

use npc_goap::WorldState;
use npc_nav::{NavAgent, StraightLineAgent, Vec2};
use serde::Serialize;

use crate::config::{NeedsConfig, SimConfig};
use crate::rng::SplitMix64;

pub const MAX_STAT: f32 = 100.0;
pub const MAX_FOOD: i32 = 100;

/// Distance at which the villager counts as standing at the bed or the bush.
pub const ARRIVAL_RADIUS: f32 = 0.5;

/// Lifetime counters reported in the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub meals: u32,
    pub gathers: u32,
    pub sleeps: u32,
    pub pass_outs: u32,
}

#[derive(Debug)]
pub struct Villager {
    pub health: f32,
    pub hunger: f32,
    pub fatigue: f32,
    pub food: i32,

    pub eating: bool,
    pub sleeping: bool,
    pub dead: bool,

    pub mover: StraightLineAgent,
    pub bed: Vec2,
    pub bush: Vec2,

    pub rng: SplitMix64,
    pub day_length: f32,
    pub needs: NeedsConfig,
    pub tally: Tally,
}

impl Villager {
    pub fn from_config(config: &SimConfig) -> Self {
        let v = &config.villager;
        Self {
            health: v.health.clamp(0.0, MAX_STAT),
            hunger: v.hunger.clamp(0.0, MAX_STAT),
            fatigue: v.fatigue.clamp(0.0, MAX_STAT),
            food: v.food.clamp(0, MAX_FOOD),
            eating: false,
            sleeping: false,
            dead: false,
            mover: StraightLineAgent::new(v.position, v.speed),
            bed: v.bed,
            bush: v.bush,
            rng: SplitMix64::new(config.seed),
            day_length: config.day_length,
            needs: config.needs.clone(),
            tally: Tally::default(),
        }
    }

    /// Seconds in `fraction` of a day.
    pub fn days(&self, fraction: f32) -> f32 {
        self.day_length * fraction
    }

    pub fn add_health(&mut self, delta: f32) {
        self.health = (self.health + delta).clamp(0.0, MAX_STAT);
    }

    pub fn add_hunger(&mut self, delta: f32) {
        self.hunger = (self.hunger + delta).clamp(0.0, MAX_STAT);
    }

    pub fn add_fatigue(&mut self, delta: f32) {
        self.fatigue = (self.fatigue + delta).clamp(0.0, MAX_STAT);
    }

    pub fn add_food(&mut self, delta: i32) {
        self.food = (self.food + delta).clamp(0, MAX_FOOD);
    }

    /// Needs grow with time: hunger unless eating, fatigue unless sleeping, and health drains
    /// while starving. Nothing changes once dead.
    pub fn decay(&mut self, dt: f32) {
        if self.dead {
            return;
        }
        let day_fraction = dt / self.day_length;
        if !self.eating {
            self.add_hunger(self.needs.hunger_per_day * day_fraction);
        }
        if !self.sleeping {
            self.add_fatigue(self.needs.fatigue_per_day * day_fraction);
        }
        if self.hunger >= MAX_STAT {
            self.add_health(-self.needs.starvation_per_day * day_fraction);
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn at(&self, place: Vec2) -> bool {
        self.mover.position().distance(place) <= ARRIVAL_RADIUS + f32::EPSILON
    }

    /// Stop moving and drop the current destination.
    pub fn halt(&mut self) {
        self.mover.reset_path();
        self.mover.set_stopped(true);
    }

    /// Planning snapshot.
    pub fn world_state(&self) -> WorldState {
        WorldState::new()
            .with("Alive", i32::from(self.is_alive()))
            .with("NotHungry", i32::from(self.hunger <= 40.0))
            .with("NotTired", i32::from(self.fatigue <= 70.0))
            .with("HasFood", self.food)
            .with("AtBed", i32::from(self.at(self.bed)))
            .with("AtBush", i32::from(self.at(self.bush)))
    }
}

/// Movement accessor for behavior tree leaves.
pub fn nav(v: &mut Villager) -> Option<&mut dyn NavAgent> {
    Some(&mut v.mover as &mut dyn NavAgent)
}
