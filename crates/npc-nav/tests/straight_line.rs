use npc_nav::{NavAgent, PathStatus, StraightLineAgent, Vec2};

#[test]
fn path_is_pending_for_one_step() {
    let mut agent = StraightLineAgent::new(Vec2::ZERO, 1.0);
    agent.set_destination(Vec2::new(3.0, 0.0));

    assert!(agent.path_pending());
    assert!(!agent.has_path());
    assert_eq!(agent.remaining_distance(), 0.0);

    agent.step(1.0);
    assert!(!agent.path_pending());
    assert!(agent.has_path());
    // The resolving step does not move the agent.
    assert_eq!(agent.position(), Vec2::ZERO);
    assert!((agent.remaining_distance() - 3.0).abs() < 1e-5);
}

#[test]
fn walks_until_within_stopping_distance() {
    let mut agent = StraightLineAgent::new(Vec2::ZERO, 1.0);
    agent.set_stopping_distance(0.5);
    agent.set_destination(Vec2::new(2.0, 0.0));

    agent.step(1.0);
    agent.step(1.0);
    assert!((agent.remaining_distance() - 1.0).abs() < 1e-5);
    assert!(!agent.has_arrived());

    agent.step(1.0);
    assert!(agent.remaining_distance() <= agent.stopping_distance());
    assert!(agent.has_arrived());

    let resting = agent.position();
    agent.step(1.0);
    assert_eq!(agent.position(), resting);
}

#[test]
fn destination_outside_bounds_is_invalid() {
    let mut agent = StraightLineAgent::new(Vec2::ZERO, 1.0)
        .with_bounds(Vec2::new(-5.0, -5.0), Vec2::new(5.0, 5.0));
    agent.set_destination(Vec2::new(10.0, 0.0));
    agent.step(1.0);

    assert_eq!(agent.path_status(), PathStatus::Invalid);
    agent.step(1.0);
    assert_eq!(agent.position(), Vec2::ZERO);
}

#[test]
fn stopped_agent_keeps_destination_but_does_not_move() {
    let mut agent = StraightLineAgent::new(Vec2::ZERO, 1.0);
    agent.set_destination(Vec2::new(4.0, 0.0));
    agent.step(1.0);
    agent.set_stopped(true);
    agent.step(1.0);

    assert_eq!(agent.position(), Vec2::ZERO);
    assert_eq!(agent.destination(), Some(Vec2::new(4.0, 0.0)));
}

#[test]
fn reset_path_clears_destination() {
    let mut agent = StraightLineAgent::new(Vec2::ZERO, 1.0);
    agent.set_destination(Vec2::new(1.0, 1.0));
    agent.reset_path();

    assert_eq!(agent.destination(), None);
    assert!(!agent.path_pending());
    assert_eq!(agent.remaining_distance(), 0.0);
}
