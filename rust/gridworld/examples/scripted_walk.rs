extern crate gridworld;

use gridworld::*;

/// Alternates DOWN and RIGHT, which reaches the far corner of any grid.
struct Staircase;

impl Policy<Location, GridAction> for Staircase {
    fn policy(&self, s: &Location) -> GridAction {
        if s.0 <= s.1 {
            GridAction::Down
        } else {
            GridAction::Right
        }
    }
}

fn main() -> Result<(), EnvError> {
    tracing_subscriber::fmt::init();

    let mut env = GridWorld::new((4, 4), (0, 0), &[(3, 3)], &[(3, 3, 1.), (1, 2, -0.5)])?;
    let policy = Staircase;

    for ep in 0..3 {
        let mut s = env.reset();
        let mut tot_reward = 0.;
        loop {
            let action = policy.policy(&s);
            let si = env.step(&action)?;
            println!("{action}\n{}\n", env.render());
            tot_reward += si.reward;

            if si.terminated {
                break;
            }
            s = si.observation;
        }
        println!("Finished episode {} with total reward {}", ep, tot_reward);
    }

    Ok(())
}
