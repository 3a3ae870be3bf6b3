use gridworld::*;
use rl_dp::*;
use std::rc::Rc;

pub fn grid(
    shape: (usize, usize),
    terminals: &[Location],
    rewards: &[RewardLocation],
) -> Rc<GridWorld> {
    Rc::new(GridWorld::new(shape, (0, 0), terminals, rewards).unwrap())
}

pub fn solve_pi(env: &Rc<GridWorld>, min_delta: Continous, gamma: Continous) -> PolicyIteration<GridWorld> {
    let mut pi = PolicyIteration::new(Rc::clone(env), min_delta, gamma).unwrap();
    let (stable, _) = pi.run().unwrap();
    assert!(stable);
    pi
}

pub fn solve_vi(env: &Rc<GridWorld>, min_delta: Continous, gamma: Continous) -> ValueIteration<GridWorld> {
    let mut vi = ValueIteration::new(Rc::clone(env), min_delta, gamma).unwrap();
    let (converged, _) = vi.run().unwrap();
    assert!(converged);
    vi
}

/// `Q(s, a)` for every action of `s`, in action order.
pub fn q_row(solver: &dyn MdpSolver<GridWorld>, s: &Location) -> Vec<Continous> {
    (0..solver.actions().len())
        .map(|a| solver.q_star(s, a).unwrap())
        .collect()
}

/// Index of the first maximum.
pub fn first_argmax(values: &[Continous]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}
