//! The fixed-step loop: needs decay, the mover steps, then the brain decides.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use npc_core::{Policy, TickContext};
use npc_trace::{TraceEvent, TraceLog, TraceSink, Tracer};
use serde::Serialize;
use tracing::{debug, info};

use crate::brain::Brain;
use crate::config::SimConfig;
use crate::villager::{Tally, Villager};

/// Trace log shared between the simulation and the brain's tracer.
#[derive(Debug, Clone, Default)]
struct SharedLog(Rc<RefCell<TraceLog>>);

impl TraceSink for SharedLog {
    fn emit(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}

pub struct Simulation {
    config: SimConfig,
    villager: Villager,
    brain: Brain,
    ctx: TickContext,
    tracer: Tracer,
    log: Option<SharedLog>,
    started: bool,
    died_at: Option<u64>,
}

impl Simulation {
    pub fn new(config: SimConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let villager = Villager::from_config(&config);
        let brain = Brain::build(config.engine, config.day_length)?;
        let ctx = TickContext::new(0, config.dt);
        Ok(Self {
            config,
            villager,
            brain,
            ctx,
            tracer: Tracer::default(),
            log: None,
            started: false,
            died_at: None,
        })
    }

    /// Collect engine and simulation events into one log, readable via [`Simulation::trace`].
    pub fn enable_trace(&mut self) {
        let log = SharedLog::default();
        self.tracer.set_sink(Box::new(log.clone()));
        self.brain.tracer_mut().set_sink(Box::new(log.clone()));
        self.log = Some(log);
    }

    pub fn villager(&self) -> &Villager {
        &self.villager
    }

    pub fn villager_mut(&mut self) -> &mut Villager {
        &mut self.villager
    }

    pub fn brain(&self) -> &Brain {
        &self.brain
    }

    pub fn tick(&self) -> u64 {
        self.ctx.tick
    }

    /// Advance one step. The brain is started on the first call.
    pub fn step(&mut self) -> anyhow::Result<()> {
        if !self.started {
            self.started = true;
            self.emit("sim.start", self.config.engine.as_str());
            self.brain.start(&self.ctx, &mut self.villager)?;
        }

        let dt = self.ctx.dt();
        self.villager.decay(dt);
        self.villager.mover.step(dt);
        self.brain.tick(&self.ctx, &mut self.villager);

        if self.died_at.is_none() && !self.villager.is_alive() {
            self.died_at = Some(self.ctx.tick);
            info!(tick = self.ctx.tick, "villager died");
            self.emit("villager.died", "");
        }

        self.ctx = self.ctx.next();
        Ok(())
    }

    /// Run the configured number of steps and summarize.
    pub fn run(&mut self) -> anyhow::Result<Summary> {
        info!(
            engine = self.config.engine.as_str(),
            ticks = self.config.ticks,
            dt = self.config.dt,
            "simulation started"
        );
        for _ in 0..self.config.ticks {
            self.step()?;
            if self.ctx.tick % 600 == 0 {
                debug!(
                    tick = self.ctx.tick,
                    health = self.villager.health,
                    hunger = self.villager.hunger,
                    fatigue = self.villager.fatigue,
                    food = self.villager.food,
                    brain = %self.brain.describe(),
                    "progress"
                );
            }
        }
        self.emit("sim.end", "");
        let summary = self.summary();
        info!(alive = summary.alive, days = summary.days, "simulation finished");
        Ok(summary)
    }

    pub fn summary(&self) -> Summary {
        let seconds = self.ctx.tick as f32 * self.ctx.dt();
        let v = &self.villager;
        Summary {
            engine: self.config.engine.as_str(),
            ticks: self.ctx.tick,
            days: seconds / self.config.day_length,
            alive: v.is_alive(),
            died_at: self.died_at,
            health: v.health,
            hunger: v.hunger,
            fatigue: v.fatigue,
            food: v.food,
            tally: v.tally,
            brain: self.brain.describe(),
        }
    }

    /// Events collected so far; empty unless tracing was enabled.
    pub fn trace(&self) -> Vec<TraceEvent> {
        self.log
            .as_ref()
            .map(|log| log.0.borrow().events.clone())
            .unwrap_or_default()
    }

    fn emit(&mut self, tag: &'static str, subject: &'static str) {
        if self.tracer.is_enabled() {
            self.tracer
                .emit(TraceEvent::new(self.ctx.tick, tag).with_subject(subject));
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub engine: &'static str,
    pub ticks: u64,
    pub days: f32,
    pub alive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub died_at: Option<u64>,
    pub health: f32,
    pub hunger: f32,
    pub fatigue: f32,
    pub food: i32,
    pub tally: Tally,
    pub brain: String,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "engine {} ran {} ticks ({:.2} days)",
            self.engine, self.ticks, self.days
        )?;
        match self.died_at {
            Some(tick) => writeln!(f, "villager died at tick {tick}")?,
            None => writeln!(f, "villager alive")?,
        }
        writeln!(
            f,
            "health {:.1} hunger {:.1} fatigue {:.1} food {}",
            self.health, self.hunger, self.fatigue, self.food
        )?;
        writeln!(
            f,
            "meals {} gathers {} sleeps {} pass-outs {}",
            self.tally.meals, self.tally.gathers, self.tally.sleeps, self.tally.pass_outs
        )?;
        write!(f, "brain: {}", self.brain)
    }
}
