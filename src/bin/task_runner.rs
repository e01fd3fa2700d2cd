use std::error::Error;

use log::{info, warn};

use gridtask_pathfinding::agent::Agent;
use gridtask_pathfinding::config::RunnerConfig;
use gridtask_pathfinding::environment::GridWorld;

// Usage: task_runner [config.toml]
fn main() -> Result<(), Box<dyn Error>> {
    fast_log::init(
        fast_log::config::Config::new()
            .console()
            .level(log::LevelFilter::Info),
    )?;

    let config = match std::env::args().nth(1) {
        Some(path) => RunnerConfig::from_file(path)?,
        None => RunnerConfig::default(),
    };

    let grid = &config.grid;
    let mut world = GridWorld::generate(
        grid.width,
        grid.height,
        grid.barrier_count,
        grid.task_count,
        &[config.agent.start],
        grid.seed,
    )?;
    info!("starting grid:\n{}", world);

    let strategy = config.agent.algorithm.strategy(config.agent.max_ops);
    let mut agent = Agent::with_position(strategy, config.agent.start);
    info!(
        "running {} agent from {}",
        config.agent.algorithm,
        agent.position()
    );

    let mut ticks: u64 = 0;
    while world.task_count() > 0 {
        if ticks >= config.agent.max_ticks {
            warn!("stopping after {} ticks", ticks);
            break;
        }

        if !agent.is_moving() {
            if !agent.assign_nearest_task(&world) {
                warn!("{} tasks remain but none is reachable", world.task_count());
                break;
            }
            // Nearest task was under the agent
            if !agent.is_moving() {
                agent.check_task_completion(&mut world);
                continue;
            }
        }

        agent.tick(&mut world);
        ticks += 1;
    }

    info!("finished after {} ticks:\n{}", ticks, world);
    info!("{}", serde_json::to_string_pretty(&agent.report())?);
    log::logger().flush();
    Ok(())
}
