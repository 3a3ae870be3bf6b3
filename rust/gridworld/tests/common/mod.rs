use gridworld::*;

#[allow(dead_code)]
pub fn single_goal_3x3() -> GridWorld {
    GridWorld::new((3, 3), (0, 0), &[(2, 2)], &[(2, 2, 1.)]).unwrap()
}

#[allow(dead_code)]
pub fn run_episode(env: &mut GridWorld, actions: &[GridAction]) -> Vec<StepInfo<Location>> {
    actions.iter().map(|a| env.step(a).unwrap()).collect()
}
