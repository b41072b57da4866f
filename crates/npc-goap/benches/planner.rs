use criterion::{black_box, criterion_group, criterion_main, Criterion};
use npc_goap::{ActionDescriptor, Goal, Planner, WorldState};

/// A chain of `depth` actions, each unlocking the next, plus a few distractors.
fn chain(depth: usize) -> (Vec<ActionDescriptor>, Goal) {
    let mut actions = Vec::with_capacity(depth + 3);
    for i in 0..depth {
        let mut action = ActionDescriptor::new(format!("step{i}"), 1.0).effect(format!("s{i}"), 1);
        if i > 0 {
            action = action.precondition(format!("s{}", i - 1), 1);
        }
        actions.push(action);
    }
    for i in 0..3 {
        actions.push(
            ActionDescriptor::new(format!("detour{i}"), 5.0)
                .precondition("never", 1)
                .effect("never", 1),
        );
    }
    let goal = Goal::new("end", 0).desire(format!("s{}", depth - 1), 1);
    (actions, goal)
}

fn villager() -> (Vec<ActionDescriptor>, Goal, WorldState) {
    let actions = vec![
        ActionDescriptor::new("MoveToBush", 1.0).effect("AtBush", 1),
        ActionDescriptor::new("MoveToBed", 1.0).effect("AtBed", 1),
        ActionDescriptor::new("Gather", 2.0)
            .precondition("AtBush", 1)
            .effect("HasFood", 1),
        ActionDescriptor::new("Eat", 1.0)
            .precondition("HasFood", 1)
            .effect("HasFood", -1)
            .effect("NotHungry", 1),
        ActionDescriptor::new("Sleep", 1.5)
            .precondition("AtBed", 1)
            .effect("NotTired", 1),
    ];
    let goal = Goal::new("Eat", 0).desire("Alive", 1).desire("NotHungry", 1);
    let start = WorldState::new().with("Alive", 1);
    (actions, goal, start)
}

fn bench_goap_planner(c: &mut Criterion) {
    let planner = Planner::new();

    let (actions, goal) = chain(4);
    let start = WorldState::new();
    c.bench_function("npc-goap/planner.plan(chain=4)", |b| {
        b.iter(|| {
            let plan = planner.plan(&start, &actions, &goal).expect("plan");
            black_box(plan.len());
        })
    });

    let (actions, goal, start) = villager();
    c.bench_function("npc-goap/planner.plan(villager_eat)", |b| {
        b.iter(|| {
            let plan = planner.plan(&start, &actions, &goal).expect("plan");
            black_box(plan.len());
        })
    });
}

criterion_group!(benches, bench_goap_planner);
criterion_main!(benches);
