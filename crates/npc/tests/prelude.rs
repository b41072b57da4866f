#![cfg(feature = "full")]

use npc::prelude::*;

struct Npc {
    ticks: u32,
}

#[test]
fn engines_share_the_policy_seam() {
    let tree = BehaviorTree::new(Node::action(
        "count",
        ActionNode::new(0.0).on_complete(|n: &mut Npc| n.ticks += 1),
    ))
    .unwrap();

    let mut machine = HybridStateMachine::new();
    machine.register(TreeState::new("Alive", 0, |_: &Npc| true).with_tree(
        BehaviorTree::new(Node::action(
            "count",
            ActionNode::new(0.0).on_complete(|n: &mut Npc| n.ticks += 1),
        ))
        .unwrap(),
    ));

    let goap = GoapAgent::new(|_: &Npc| WorldState::new());

    let mut policies: Vec<Box<dyn Policy<Npc>>> =
        vec![Box::new(tree), Box::new(machine), Box::new(goap)];
    let mut npc = Npc { ticks: 0 };
    let mut ctx = TickContext::new(0, 0.1);
    for _ in 0..3 {
        for policy in &mut policies {
            policy.tick(&ctx, &mut npc);
        }
        ctx = ctx.next();
    }
    assert_eq!(npc.ticks, 6);
}
