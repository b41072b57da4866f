use npc_bt::{ActionNode, BehaviorTree, Node, NodeKind, Status};
use npc_core::TickContext;

#[derive(Default)]
struct Counters {
    started: u32,
    completed: u32,
}

fn timed(duration: f32) -> BehaviorTree<Counters> {
    let action = ActionNode::new(duration)
        .on_start(|c: &mut Counters| c.started += 1)
        .on_complete(|c: &mut Counters| c.completed += 1);
    BehaviorTree::new(Node::action("work", action)).unwrap()
}

fn remaining(tree: &BehaviorTree<Counters>) -> Option<f32> {
    match tree.node(tree.root())?.kind {
        NodeKind::Action(action) => Some(action.remaining()),
        _ => None,
    }
}

#[test]
fn completes_when_timer_drains() {
    let mut tree = timed(2.0);
    let mut counters = Counters::default();
    let mut ctx = TickContext::new(0, 1.0);

    assert_eq!(tree.tick(&ctx, &mut counters), Status::Running);
    assert_eq!(counters.started, 1);
    assert_eq!(counters.completed, 0);
    assert_eq!(remaining(&tree), Some(1.0));

    ctx = ctx.next();
    assert_eq!(tree.tick(&ctx, &mut counters), Status::Success);
    assert_eq!(counters.started, 1);
    assert_eq!(counters.completed, 1);
}

#[test]
fn zero_duration_completes_on_first_tick() {
    let mut tree = timed(0.0);
    let mut counters = Counters::default();

    assert_eq!(
        tree.tick(&TickContext::new(0, 0.1), &mut counters),
        Status::Success
    );
    assert_eq!(counters.started, 1);
    assert_eq!(counters.completed, 1);
}

#[test]
fn runs_again_after_completion() {
    let mut tree = timed(1.0);
    let mut counters = Counters::default();
    let mut ctx = TickContext::new(0, 1.0);

    for _ in 0..3 {
        assert_eq!(tree.tick(&ctx, &mut counters), Status::Success);
        ctx = ctx.next();
    }
    assert_eq!(counters.started, 3);
    assert_eq!(counters.completed, 3);
}

#[test]
fn negative_time_step_does_not_advance_timer() {
    let mut tree = timed(1.0);
    let mut counters = Counters::default();

    assert_eq!(
        tree.tick(&TickContext::new(0, -5.0), &mut counters),
        Status::Running
    );
    assert_eq!(
        tree.tick(&TickContext::new(1, 1.0), &mut counters),
        Status::Success
    );
}

#[test]
fn reset_clears_started_latch() {
    let mut tree = timed(3.0);
    let mut counters = Counters::default();

    tree.tick(&TickContext::new(0, 1.0), &mut counters);
    tree.reset();
    assert_eq!(tree.last_status(), Status::Inactive);

    tree.tick(&TickContext::new(1, 1.0), &mut counters);
    assert_eq!(counters.started, 2);
    assert_eq!(counters.completed, 0);
}
