use super::*;
use crate::environment::GridWorld;
use crate::utils::is_valid_path;

fn astar_agent() -> Agent<SearchStrategy> {
    Agent::new(SearchAlgorithm::AStar.strategy(u32::MAX))
}

fn idastar_agent() -> Agent<SearchStrategy> {
    Agent::new(SearchAlgorithm::IdaStar.strategy(u32::MAX))
}

// Drives the agent until no task is left or none can be reached
fn run_until_done<S: PathSearch>(agent: &mut Agent<S>, world: &mut GridWorld, max_ticks: usize) {
    for _ in 0..max_ticks {
        if world.task_count() == 0 {
            return;
        }
        if !agent.is_moving() && !agent.assign_nearest_task(&*world) {
            return;
        }
        agent.tick(world);
    }
    panic!("agent did not finish within {} ticks", max_ticks);
}

// A new agent starts idle at the origin
#[test]
pub fn agent_spawns_idle_at_origin() {
    let agent = astar_agent();
    assert_eq!(agent.position(), Cell::new(0, 0));
    assert_eq!(agent.status(), AgentStatus::Idle);
    assert_eq!(agent.remaining_path().count(), 0);
    assert_eq!(agent.tasks_completed(), 0);
}

// Straight corridor: both strategies walk the same five cells
#[test]
pub fn straight_corridor_both_strategies() {
    for mut agent in [astar_agent(), idastar_agent()] {
        let mut world = GridWorld::new(5, 1);
        let task = world.spawn_task(Cell::new(4, 0)).unwrap();

        assert!(agent.assign_nearest_task(&world));
        assert_eq!(agent.status(), AgentStatus::Moving);
        assert_eq!(
            agent.remaining_path().collect::<Vec<_>>(),
            vec![
                Cell::new(1, 0),
                Cell::new(2, 0),
                Cell::new(3, 0),
                Cell::new(4, 0),
            ]
        );

        let mut visited = vec![agent.position()];
        let mut claimed = Vec::new();
        while agent.is_moving() {
            claimed.extend(agent.tick(&mut world));
            visited.push(agent.position());
        }

        assert!(is_valid_path(&world, &visited, Cell::new(0, 0), Cell::new(4, 0)));
        assert_eq!(visited.len(), 5);
        assert_eq!(claimed, vec![task]);
        assert_eq!(agent.task_cost(task), Some(4));
        assert_eq!(agent.total_path_cost(), 4);
        assert_eq!(agent.status(), AgentStatus::Idle);
    }
}

// Detour: the wall forces the route through the bottom row
#[test]
pub fn detour_through_bottom_row() {
    for mut agent in [astar_agent(), idastar_agent()] {
        let mut world = GridWorld::from_ascii(
            "
            .#T
            .#.
            ...
            ",
        )
        .unwrap();

        assert!(agent.assign_nearest_task(&world));
        let path: Vec<Cell> = agent.remaining_path().collect();
        assert_eq!(path.len(), 6);
        assert!(path.contains(&Cell::new(1, 2)));

        run_until_done(&mut agent, &mut world, 100);
        assert_eq!(agent.position(), Cell::new(2, 0));
        assert_eq!(agent.total_path_cost(), 6);
    }
}

// Multiple tasks: the near one is taken first, then the far one
#[test]
pub fn nearest_task_is_taken_first() {
    for mut agent in [astar_agent(), idastar_agent()] {
        let mut world = GridWorld::new(6, 6);
        let far = world.spawn_task(Cell::new(5, 5)).unwrap();
        let near = world.spawn_task(Cell::new(1, 0)).unwrap();

        assert!(agent.assign_nearest_task(&world));
        assert_eq!(agent.remaining_path().last(), Some(Cell::new(1, 0)));

        run_until_done(&mut agent, &mut world, 100);

        assert_eq!(agent.completed_tasks(), &[near, far]);
        assert_eq!(agent.task_cost(near), Some(1));
        // From (1, 0) to (5, 5)
        assert_eq!(agent.task_cost(far), Some(9));
        assert_eq!(agent.total_path_cost(), 10);
        assert_eq!(world.task_count(), 0);
    }
}

// A claimed task is never claimed again and never reassigned
#[test]
pub fn claimed_tasks_are_not_reassigned() {
    let mut world = GridWorld::new(4, 1);
    let first = world.spawn_task(Cell::new(1, 0)).unwrap();
    let second = world.spawn_task(Cell::new(3, 0)).unwrap();
    let mut agent = astar_agent();

    assert!(agent.assign_nearest_task(&world));
    assert_eq!(agent.tick(&mut world), Some(first));
    assert_eq!(world.task_cells(), vec![Cell::new(3, 0)]);

    // Standing on the claimed cell again claims nothing
    assert_eq!(agent.check_task_completion(&mut world), None);

    assert!(agent.assign_nearest_task(&world));
    assert_eq!(agent.remaining_path().last(), Some(Cell::new(3, 0)));
    run_until_done(&mut agent, &mut world, 10);

    assert_eq!(agent.completed_tasks(), &[first, second]);
    assert!(!agent.assign_nearest_task(&world));
}

// Passing over another task on the way claims it too
#[test]
pub fn tasks_on_the_way_are_claimed() {
    let mut world = GridWorld::from_ascii(
        "
        ..T.T
        #####
        ",
    )
    .unwrap();
    // Make (4, 0) the only target by spawning the nearer one after assignment
    let removed = world.claim_task(Cell::new(2, 0)).unwrap();
    let target = world.task_at(Cell::new(4, 0)).unwrap();
    let mut agent = astar_agent();
    assert!(agent.assign_nearest_task(&world));

    let on_the_way = world.spawn_task(Cell::new(2, 0)).unwrap();
    assert_ne!(on_the_way, removed);

    let mut claimed = Vec::new();
    while agent.is_moving() {
        claimed.extend(agent.tick(&mut world));
    }

    assert_eq!(claimed, vec![on_the_way, target]);
    // Both are charged the cost of the assignment that carried the agent there
    assert_eq!(agent.task_cost(on_the_way), Some(4));
    assert_eq!(agent.task_cost(target), Some(4));
    assert_eq!(agent.total_path_cost(), 8);
}

// Sealed-off tasks leave the agent idle rather than failing
#[test]
pub fn unreachable_tasks_leave_agent_idle() {
    for mut agent in [astar_agent(), idastar_agent()] {
        let mut world = GridWorld::from_ascii(
            "
            .#.
            .#T
            ",
        )
        .unwrap();

        assert!(!agent.assign_nearest_task(&world));
        assert_eq!(agent.status(), AgentStatus::Idle);
        assert_eq!(agent.tick(&mut world), None);
        assert_eq!(agent.position(), Cell::new(0, 0));
        assert_eq!(world.task_count(), 1);
    }
}

// A task under the agent is claimed without moving
#[test]
pub fn task_under_agent() {
    let mut world = GridWorld::new(3, 3);
    let task = world.spawn_task(Cell::new(1, 1)).unwrap();
    let mut agent = Agent::with_position(AStarSearch::new(), Cell::new(1, 1));

    assert!(agent.assign_nearest_task(&world));
    assert!(!agent.is_moving());
    assert_eq!(agent.check_task_completion(&mut world), Some(task));
    assert_eq!(agent.task_cost(task), Some(0));
}

// Reassigning mid-path replaces the old path
#[test]
pub fn reassignment_replaces_path() {
    let mut world = GridWorld::new(5, 5);
    world.spawn_task(Cell::new(4, 0)).unwrap();
    let mut agent = astar_agent();

    assert!(agent.assign_nearest_task(&world));
    agent.tick(&mut world);
    assert_eq!(agent.position(), Cell::new(1, 0));

    let closer = world.spawn_task(Cell::new(1, 1)).unwrap();
    assert!(agent.assign_nearest_task(&world));
    assert_eq!(agent.remaining_path().collect::<Vec<_>>(), vec![Cell::new(1, 1)]);
    assert_eq!(agent.tick(&mut world), Some(closer));
}

// A whole generated world is cleared by both strategies
#[test]
pub fn generated_world_is_cleared_by_both_strategies() {
    let origin = Cell::new(0, 0);

    for mut agent in [astar_agent(), idastar_agent()] {
        let mut world = GridWorld::generate(6, 6, 0, 5, &[origin], 11).unwrap();
        run_until_done(&mut agent, &mut world, 1000);

        assert_eq!(world.task_count(), 0);
        assert_eq!(agent.tasks_completed(), 5);
        assert!(agent.total_path_cost() > 0);
    }
}

// The report serializes for display layers
#[test]
pub fn report_serializes() {
    let mut world = GridWorld::new(3, 1);
    let task = world.spawn_task(Cell::new(2, 0)).unwrap();
    let mut agent = astar_agent();
    agent.assign_nearest_task(&world);
    agent.tick(&mut world);

    let report = agent.report();
    assert_eq!(report.status, AgentStatus::Moving);
    assert_eq!(report.remaining_steps, 1);

    agent.tick(&mut world);
    let report = agent.report();
    assert_eq!(report.task_costs, vec![TaskCost { task, cost: 2 }]);

    let json = serde_json::to_string(&report).unwrap();
    let parsed: AgentReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}
