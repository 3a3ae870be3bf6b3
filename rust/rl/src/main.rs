use anyhow::Result;
use clap::Parser;
use gridworld::*;
use rl_dp::{config::*, *};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::Level;

/// Solves a grid world with policy iteration and value iteration and checks
/// that both arrive at the same policy.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON scenario file. Uses the built-in 50x50 scenario when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log value functions and policies.
    #[arg(short, long)]
    verbose: bool,

    /// Step limit for the greedy episode played after planning.
    #[arg(long, default_value_t = 1000)]
    max_episode_steps: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let scenario = match &args.config {
        Some(path) => Scenario::from_file(path)?,
        None => Scenario::default(),
    };
    let PlannerConfig { min_delta, gamma } = scenario.planner;
    let env = Rc::new(GridWorld::from_config(scenario.grid)?);

    let mut pi = PolicyIteration::new(Rc::clone(&env), min_delta, gamma)?;
    let (stable, n) = pi.run()?;
    tracing::info!("Policy iteration: policy stable: {stable}, number of iterations: {n}");

    let mut vi = ValueIteration::new(Rc::clone(&env), min_delta, gamma)?;
    let (converged, n) = vi.run()?;
    tracing::info!("Value iteration: converged: {converged}, number of sweeps: {n}");

    let mismatches = policy_mismatches(pi.states(), pi.policy(), vi.policy());
    if !mismatches.is_empty() {
        tracing::error!(
            "Algorithms did not converge to same policy! {} states differ: {:?}",
            mismatches.len(),
            mismatches
        );
    }

    let mut episode_env = (*env).clone();
    let policy = MdpSolverPolicy { mdp_solver: &pi };
    let (ep, terminated) = generate_episode(&mut episode_env, &policy, args.max_episode_steps)?;
    tracing::info!(
        "Greedy episode from {:?}: {} steps, terminated: {}, discounted return: {:.6}, V*: {:.6}",
        env.start(),
        ep.len() - 1,
        terminated,
        discounted_return(&ep, gamma),
        pi.v_star(&env.start()).unwrap_or_default()
    );

    Ok(())
}
