//! Behavior trees for the villager.

use npc_bt::{ActionNode, BehaviorTree, BuildError, MoveToNode, Node};
use npc_nav::NavAgent;

use crate::villager::{nav, Villager, ARRIVAL_RADIUS, MAX_STAT};

fn walk_to_bed(name: &str) -> Node<Villager> {
    Node::move_to(
        name,
        MoveToNode::new(nav, |v: &Villager| Some(v.bed)).stopping_distance(ARRIVAL_RADIUS),
    )
}

fn walk_to_bush(name: &str) -> Node<Villager> {
    Node::move_to(
        name,
        MoveToNode::new(nav, |v: &Villager| Some(v.bush)).stopping_distance(ARRIVAL_RADIUS),
    )
}

/// Standalone survival tree: death, collapse, eating, sleeping and gathering, most urgent first.
pub fn survival_tree(day: f32) -> Result<BehaviorTree<Villager>, BuildError> {
    let root = Node::selector(
        "Survival",
        vec![
            Node::sequence(
                "Dead",
                vec![
                    Node::condition("No health?", |v: &Villager| v.health <= 0.0),
                    Node::action(
                        "Die",
                        ActionNode::new(0.0).on_start(|v: &mut Villager| {
                            v.dead = true;
                            v.eating = false;
                            v.sleeping = false;
                            v.halt();
                        }),
                    ),
                ],
            ),
            Node::sequence(
                "Passed out",
                vec![
                    Node::condition("Exhausted?", |v: &Villager| v.fatigue >= MAX_STAT),
                    Node::action(
                        "Collapse",
                        ActionNode::new(day * 0.5)
                            .on_start(|v: &mut Villager| {
                                v.sleeping = true;
                                v.eating = false;
                                v.tally.pass_outs += 1;
                                v.mover.reset_path();
                            })
                            .on_complete(|v: &mut Villager| {
                                v.add_fatigue(-100.0);
                                v.sleeping = false;
                            }),
                    ),
                ],
            ),
            Node::sequence(
                "Eat",
                vec![
                    Node::condition("Hungry with food?", |v: &Villager| {
                        !v.sleeping && v.hunger >= 60.0 && v.food > 0
                    }),
                    Node::action(
                        "Consume food",
                        ActionNode::new(day * 0.05)
                            .on_start(|v: &mut Villager| v.eating = true)
                            .on_complete(|v: &mut Villager| {
                                v.add_hunger(-40.0);
                                v.add_food(-1);
                                v.eating = false;
                                v.tally.meals += 1;
                            }),
                    ),
                ],
            ),
            Node::sequence(
                "Sleep",
                vec![
                    Node::condition("Tired?", |v: &Villager| {
                        v.fatigue >= 70.0 && v.fatigue <= MAX_STAT
                    }),
                    walk_to_bed("Walk to bed"),
                    Node::action(
                        "Sleep a quarter day",
                        ActionNode::new(day * 0.25)
                            .on_start(|v: &mut Villager| v.sleeping = true)
                            .on_complete(|v: &mut Villager| {
                                v.add_fatigue(-80.0);
                                v.sleeping = false;
                                v.tally.sleeps += 1;
                            }),
                    ),
                ],
            ),
            Node::sequence(
                "Gather",
                vec![
                    Node::condition("No food?", |v: &Villager| v.food <= 0),
                    walk_to_bush("Walk to bush"),
                    Node::action(
                        "Pick berries",
                        ActionNode::new(day * 0.08).on_complete(|v: &mut Villager| {
                            v.add_food(3);
                            v.add_hunger(15.0);
                            v.add_fatigue(20.0);
                            v.tally.gathers += 1;
                        }),
                    ),
                ],
            ),
        ],
    );
    BehaviorTree::new(root)
}

fn gather_berries(name: &str, day: f32) -> Node<Villager> {
    Node::action(
        name,
        ActionNode::new(day * 0.1).on_complete(|v: &mut Villager| {
            let picked = v.rng.range_i32(2, 4);
            v.add_food(picked);
            v.add_hunger(10.0);
            v.add_fatigue(15.0);
            v.tally.gathers += 1;
        }),
    )
}

fn idle(v: &Villager) -> bool {
    !v.sleeping && !v.eating
}

/// Decision tree of the hybrid machine's Alive state. Death and collapse are handled by the
/// machine, so only routine needs remain.
pub fn alive_tree(day: f32) -> Result<BehaviorTree<Villager>, BuildError> {
    let root = Node::selector(
        "Survival priority",
        vec![
            Node::sequence(
                "Critical hunger",
                vec![
                    Node::condition("Starving with food?", |v: &Villager| {
                        v.hunger >= 80.0 && v.food > 0 && idle(v)
                    }),
                    Node::action(
                        "Emergency eat",
                        ActionNode::new(day * 0.03)
                            .on_start(|v: &mut Villager| {
                                v.eating = true;
                                v.mover.reset_path();
                            })
                            .on_complete(|v: &mut Villager| {
                                v.add_hunger(-50.0);
                                v.add_food(-1);
                                v.eating = false;
                                v.tally.meals += 1;
                            }),
                    ),
                ],
            ),
            Node::sequence(
                "High fatigue",
                vec![
                    Node::condition("Very tired?", |v: &Villager| {
                        v.fatigue >= 80.0 && v.fatigue < MAX_STAT && idle(v)
                    }),
                    walk_to_bed("Hurry to bed"),
                    Node::action(
                        "Deep sleep",
                        ActionNode::new(day * 0.3)
                            .on_start(|v: &mut Villager| v.sleeping = true)
                            .on_complete(|v: &mut Villager| {
                                v.add_fatigue(-90.0);
                                v.sleeping = false;
                                v.tally.sleeps += 1;
                            }),
                    ),
                ],
            ),
            Node::sequence(
                "Regular meal",
                vec![
                    Node::condition("Hungry with food?", |v: &Villager| {
                        v.hunger >= 60.0 && v.food > 0 && idle(v)
                    }),
                    Node::action(
                        "Eat meal",
                        ActionNode::new(day * 0.05)
                            .on_start(|v: &mut Villager| {
                                v.eating = true;
                                v.mover.reset_path();
                            })
                            .on_complete(|v: &mut Villager| {
                                v.add_hunger(-40.0);
                                v.add_food(-1);
                                v.eating = false;
                                v.tally.meals += 1;
                            }),
                    ),
                ],
            ),
            Node::sequence(
                "Normal sleep",
                vec![
                    Node::condition("Tired?", |v: &Villager| {
                        v.fatigue >= 70.0 && v.fatigue < 80.0 && idle(v)
                    }),
                    walk_to_bed("Walk to bed"),
                    Node::action(
                        "Sleep",
                        ActionNode::new(day * 0.25)
                            .on_start(|v: &mut Villager| v.sleeping = true)
                            .on_complete(|v: &mut Villager| {
                                v.add_fatigue(-80.0);
                                v.sleeping = false;
                                v.tally.sleeps += 1;
                            }),
                    ),
                ],
            ),
            Node::sequence(
                "Gather food",
                vec![
                    Node::condition("Out of food?", |v: &Villager| v.food <= 0 && idle(v)),
                    walk_to_bush("Walk to bush"),
                    gather_berries("Gather berries", day),
                ],
            ),
            Node::sequence(
                "Stock up",
                vec![
                    Node::condition("Low on food?", |v: &Villager| {
                        v.food <= 1 && v.hunger < 50.0 && v.fatigue < 60.0 && idle(v)
                    }),
                    walk_to_bush("Walk to bush"),
                    gather_berries("Gather more berries", day),
                ],
            ),
            Node::sequence(
                "Rest",
                vec![
                    Node::condition("Nothing urgent?", |_: &Villager| true),
                    Node::action(
                        "Idle",
                        ActionNode::new(day * 0.05)
                            .on_start(|v: &mut Villager| v.mover.reset_path())
                            .on_complete(|v: &mut Villager| {
                                if v.hunger < 30.0 && v.fatigue < 30.0 {
                                    v.add_health(2.0);
                                }
                            }),
                    ),
                ],
            ),
        ],
    );
    BehaviorTree::new(root)
}
