use npc_bt::{ActionNode, BehaviorTree, BuildError, Node, NodeKind, Status};
use npc_core::TickContext;

struct Npc {
    hungry: bool,
}

fn villager() -> Node<Npc> {
    Node::selector(
        "root",
        vec![
            Node::sequence(
                "eat",
                vec![
                    Node::condition("hungry", |n: &Npc| n.hungry),
                    Node::action("chew", ActionNode::new(2.0)),
                ],
            ),
            Node::action("idle", ActionNode::new(1.0)),
        ],
    )
}

#[test]
fn empty_composite_is_rejected() {
    let err = BehaviorTree::<Npc>::new(Node::sequence("nothing", vec![])).unwrap_err();
    assert_eq!(
        err,
        BuildError::EmptyComposite {
            name: "nothing".into()
        }
    );

    let nested = Node::selector("root", vec![Node::selector("inner", vec![])]);
    assert!(matches!(
        BehaviorTree::<Npc>::new(nested),
        Err(BuildError::EmptyComposite { name }) if name == "inner"
    ));
}

#[test]
fn invalid_duration_is_rejected() {
    for duration in [-1.0, f32::NAN, f32::INFINITY] {
        let err = BehaviorTree::<Npc>::new(Node::action("bad", ActionNode::new(duration)))
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidDuration { .. }));
    }
}

#[test]
fn arena_links_parents_and_children_in_preorder() {
    let tree = BehaviorTree::new(villager()).unwrap();
    assert_eq!(tree.len(), 5);

    let root = tree.root();
    assert_eq!(tree.name(root), Some("root"));
    assert_eq!(tree.parent(root), None);

    let eat = tree.find("eat").unwrap();
    let idle = tree.find("idle").unwrap();
    assert_eq!(tree.children(root), &[eat, idle]);
    assert_eq!(tree.parent(eat), Some(root));

    let chew = tree.find("chew").unwrap();
    assert_eq!(tree.parent(chew), Some(eat));
    assert!(tree.children(chew).is_empty());

    let node = tree.node(chew).unwrap();
    assert!(matches!(node.kind, NodeKind::Action(_)));
    assert_eq!(node.status, Status::Inactive);
    assert!(tree.find("missing").is_none());
}

#[test]
fn outline_marks_selected_child_and_running_nodes() {
    let mut tree = BehaviorTree::new(villager()).unwrap();
    let mut npc = Npc { hungry: true };

    assert_eq!(tree.to_string(), "root\n  eat\n    hungry\n    chew\n  idle\n");

    tree.tick(&TickContext::new(0, 1.0), &mut npc);
    assert_eq!(
        tree.to_string(),
        "root -> eat\n  eat [RUNNING]\n    hungry [SUCCESS]\n    chew [RUNNING]\n  idle\n"
    );
}
