use npc_bt::{ActionNode, BehaviorTree, Node};
use npc_core::TickContext;
use npc_fsm::{HybridState, HybridStateMachine, TreeState};

#[derive(Default)]
struct Npc {
    health: i32,
    fatigue: i32,
    log: Vec<String>,
    tree_ticks: u32,
}

fn logging(name: &'static str, priority: i32, can_enter: fn(&Npc) -> bool) -> TreeState<Npc> {
    TreeState::new(name, priority, can_enter)
        .on_enter(move |n: &mut Npc| n.log.push(format!("enter {name}")))
        .on_update(move |_: &TickContext, n: &mut Npc| n.log.push(format!("update {name}")))
        .on_exit(move |n: &mut Npc| n.log.push(format!("exit {name}")))
}

fn villager() -> HybridStateMachine<Npc> {
    let mut machine = HybridStateMachine::new();
    // Registered out of priority order on purpose.
    machine.register(logging("Alive", 0, |n| n.health > 0 && n.fatigue < 100));
    machine.register(logging("Dead", 100, |n| n.health <= 0));
    machine.register(logging("PassedOut", 50, |n| n.fatigue >= 100 && n.health > 0));
    machine
}

fn ctx() -> TickContext {
    TickContext::new(0, 0.1)
}

#[test]
fn states_are_ordered_by_descending_priority() {
    let machine = villager();
    let names: Vec<&str> = machine.states().map(|(_, s)| s.name()).collect();
    assert_eq!(names, ["Dead", "PassedOut", "Alive"]);
}

#[test]
fn highest_priority_enterable_state_wins() {
    let mut machine = HybridStateMachine::new();
    machine.register(logging("Routine", 0, |_| true));
    machine.register(logging("Exhausted", 50, |n| n.fatigue >= 100));
    machine.register(logging("Dead", 100, |n| n.health <= 0));
    let mut npc = Npc {
        health: 10,
        ..Npc::default()
    };

    machine.tick(&ctx(), &mut npc);
    assert_eq!(machine.current_name(), Some("Routine"));

    // Both the 50 and the 100 priority states can be entered.
    npc.health = 0;
    npc.fatigue = 120;
    npc.log.clear();
    machine.tick(&ctx(), &mut npc);
    assert_eq!(machine.current_name(), Some("Dead"));
    assert_eq!(npc.log, ["exit Routine", "enter Dead", "update Dead"]);
}

#[test]
fn transition_preempts_outgoing_update() {
    let mut machine = villager();
    let mut npc = Npc {
        health: 10,
        ..Npc::default()
    };

    machine.tick(&ctx(), &mut npc);
    assert_eq!(machine.current_name(), Some("Alive"));
    assert_eq!(npc.log, ["enter Alive", "update Alive"]);

    npc.log.clear();
    machine.tick(&ctx(), &mut npc);
    assert_eq!(npc.log, ["update Alive"]);

    npc.fatigue = 100;
    npc.log.clear();
    machine.tick(&ctx(), &mut npc);
    assert_eq!(npc.log, ["exit Alive", "enter PassedOut", "update PassedOut"]);
}

#[test]
fn absorbing_state_is_never_left() {
    let mut machine = HybridStateMachine::new();
    machine.register(logging("Dead", 100, |n| n.health <= 0));
    machine.register(logging("Alive", 0, |n| n.health > 0));
    let mut npc = Npc::default();

    machine.tick(&ctx(), &mut npc);
    assert_eq!(machine.current_name(), Some("Dead"));

    // Dead is skipped as current and Alive cannot be entered while health stays at 0.
    for _ in 0..5 {
        machine.tick(&ctx(), &mut npc);
    }
    assert_eq!(machine.current_name(), Some("Dead"));
    assert_eq!(npc.log.iter().filter(|l| l.starts_with("enter")).count(), 1);
}

#[test]
fn duplicate_name_registration_is_ignored() {
    let mut machine = villager();
    let first = machine.find("Alive").unwrap();
    let again = machine.register(logging("Alive", 75, |_| true));
    assert_eq!(first, again);
    assert_eq!(machine.len(), 3);
    assert_eq!(machine.state(first).unwrap().priority(), 0);
}

#[test]
fn change_state_to_current_is_noop() {
    let mut machine = villager();
    let mut npc = Npc {
        health: 5,
        ..Npc::default()
    };
    let alive = machine.find("Alive").unwrap();

    assert!(machine.change_state(alive, &ctx(), &mut npc));
    assert!(!machine.change_state(alive, &ctx(), &mut npc));
    assert_eq!(npc.log, ["enter Alive"]);
}

#[test]
fn valid_states_lists_enterable_states_in_priority_order() {
    let machine = villager();
    let npc = Npc {
        health: 3,
        fatigue: 100,
        ..Npc::default()
    };
    let names: Vec<&str> = machine
        .valid_states(&npc)
        .filter_map(|id| machine.state(id).map(|s| s.name()))
        .collect();
    assert_eq!(names, ["PassedOut"]);
}

#[test]
fn owned_tree_is_ticked_by_update() {
    let tree = BehaviorTree::new(Node::action(
        "work",
        ActionNode::new(1.0).on_start(|n: &mut Npc| n.tree_ticks += 1),
    ))
    .unwrap();

    let mut machine = HybridStateMachine::new();
    machine.register(TreeState::new("Alive", 0, |_: &Npc| true).with_tree(tree));
    let mut npc = Npc::default();

    machine.tick(&TickContext::new(0, 0.5), &mut npc);
    machine.tick(&TickContext::new(1, 0.5), &mut npc);
    machine.tick(&TickContext::new(2, 0.5), &mut npc);

    assert_eq!(npc.tree_ticks, 2);
    assert!(machine.current_tree().is_some());
}

#[test]
fn transitions_are_traced() {
    let mut machine = villager();
    machine.tracer_mut().enable_log();
    let mut npc = Npc {
        health: 1,
        ..Npc::default()
    };

    machine.tick(&ctx(), &mut npc);
    npc.health = 0;
    machine.tick(&ctx(), &mut npc);

    let log = machine.tracer().log().unwrap();
    let tags: Vec<&str> = log.tags().collect();
    assert_eq!(tags, ["state.enter", "state.exit", "state.enter"]);
    assert_eq!(log.events[2].subject, "Dead");
}
