use npc_goap::{ActionDescriptor, ActionId, Goal, Planner, PlannerConfig, WorldState};

#[test]
fn chains_actions_in_dependency_order() {
    let actions = vec![
        ActionDescriptor::new("B", 1.0)
            .precondition("Unlocked", 1)
            .effect("Done", 1),
        ActionDescriptor::new("A", 1.0).effect("Unlocked", 1),
    ];
    let goal = Goal::new("finish", 0).desire("Done", 1);

    let plan = Planner::new()
        .plan(&WorldState::new(), &actions, &goal)
        .unwrap();
    let names: Vec<&str> = plan.names(&actions).collect();
    assert_eq!(names, ["A", "B"]);
    assert_eq!(plan.steps, [ActionId(1), ActionId(0)]);
    assert_eq!(plan.cost, 2.0);
}

#[test]
fn unreachable_goal_yields_no_plan() {
    let actions = vec![
        ActionDescriptor::new("Gather", 2.0)
            .precondition("AtBush", 1)
            .effect("HasFood", 1),
    ];
    let goal = Goal::new("Gather", 0).desire("HasFood", 1);

    assert!(Planner::new()
        .plan(&WorldState::new(), &actions, &goal)
        .is_none());
    assert!(Planner::new()
        .plan(&WorldState::new(), &Vec::<ActionDescriptor>::new(), &goal)
        .is_none());
}

#[test]
fn satisfied_start_yields_empty_plan() {
    let goal = Goal::new("Eat", 0).desire("NotHungry", 1);
    let start = WorldState::new().with("NotHungry", 1);
    let actions = vec![ActionDescriptor::new("Eat", 1.0).effect("NotHungry", 1)];

    let plan = Planner::new().plan(&start, &actions, &goal).unwrap();
    assert!(plan.is_empty());
    assert_eq!(plan.cost, 0.0);
}

#[test]
fn prefers_cheaper_route_over_shorter_one() {
    let actions = vec![
        ActionDescriptor::new("Teleport", 10.0).effect("AtBed", 1),
        ActionDescriptor::new("Walk", 1.0).effect("Halfway", 1),
        ActionDescriptor::new("WalkOn", 1.0)
            .precondition("Halfway", 1)
            .effect("AtBed", 1),
    ];
    let goal = Goal::new("Bed", 0).desire("AtBed", 1);

    let plan = Planner::new()
        .plan(&WorldState::new(), &actions, &goal)
        .unwrap();
    assert_eq!(plan.names(&actions).collect::<Vec<_>>(), ["Walk", "WalkOn"]);
    assert_eq!(plan.cost, 2.0);
}

#[test]
fn equal_cost_ties_go_to_earlier_action() {
    let actions = vec![
        ActionDescriptor::new("First", 1.0).effect("Done", 1),
        ActionDescriptor::new("Second", 1.0).effect("Done", 1),
    ];
    let goal = Goal::new("done", 0).desire("Done", 1);

    let plan = Planner::new()
        .plan(&WorldState::new(), &actions, &goal)
        .unwrap();
    assert_eq!(plan.steps, [ActionId(0)]);
}

#[test]
fn repeated_actions_accumulate_effects() {
    let actions = vec![ActionDescriptor::new("Gather", 2.0).effect("HasFood", 1)];
    let goal = Goal::new("Stock", 0).desire("HasFood", 3);

    let plan = Planner::new()
        .plan(&WorldState::new(), &actions, &goal)
        .unwrap();
    assert_eq!(plan.len(), 3);
    assert_eq!(plan.cost, 6.0);
}

#[test]
fn expansion_budget_bounds_unreachable_search() {
    // Always applicable, never reaches the goal: the tree is infinite.
    let actions = vec![ActionDescriptor::new("Wander", 1.0).effect("Steps", 1)];
    let goal = Goal::new("Impossible", 0).desire("Flying", 1);

    let planner = Planner::new().with_config(PlannerConfig {
        max_expansions: Some(64),
    });
    assert!(planner.plan(&WorldState::new(), &actions, &goal).is_none());
    assert_eq!(PlannerConfig::default().max_expansions, Some(4096));
}

#[test]
fn budget_counts_expansions_not_goal_checks() {
    let actions = vec![ActionDescriptor::new("A", 1.0).effect("Done", 1)];
    let goal = Goal::new("finish", 0).desire("Done", 1);

    let no_expansions = Planner::new().with_config(PlannerConfig {
        max_expansions: Some(0),
    });
    let done = WorldState::new().with("Done", 1);
    let plan = no_expansions.plan(&done, &actions, &goal).unwrap();
    assert!(plan.is_empty());
    assert!(no_expansions
        .plan(&WorldState::new(), &actions, &goal)
        .is_none());

    let one_expansion = Planner::new().with_config(PlannerConfig {
        max_expansions: Some(1),
    });
    let plan = one_expansion
        .plan(&WorldState::new(), &actions, &goal)
        .unwrap();
    assert_eq!(plan.steps, [ActionId(0)]);
}

#[test]
fn negative_cost_is_clamped() {
    let action = ActionDescriptor::new("Free", -3.0);
    assert_eq!(action.cost, 0.0);
    assert_eq!(ActionDescriptor::new("Nan", f32::NAN).cost, 0.0);
}
