use crate::common::utils::*;
use crate::*;
use itertools::iproduct;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Grid moves. The discriminants are the action indices stored in policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridAction {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

impl GridAction {
    pub const ALL: [GridAction; 4] = [
        GridAction::Left,
        GridAction::Down,
        GridAction::Right,
        GridAction::Up,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            GridAction::Left => "LEFT",
            GridAction::Down => "DOWN",
            GridAction::Right => "RIGHT",
            GridAction::Up => "UP",
        }
    }

    fn delta(self) -> (Discrete, Discrete) {
        match self {
            GridAction::Left => (0, -1),
            GridAction::Down => (1, 0),
            GridAction::Right => (0, 1),
            GridAction::Up => (-1, 0),
        }
    }
}

impl fmt::Display for GridAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridWorldConfig {
    pub shape: (usize, usize),
    pub start: Location,
    #[serde(default)]
    pub terminals: Vec<Location>,
    #[serde(default)]
    pub rewards: Vec<RewardLocation>,
}

impl GridWorldConfig {
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// Rectangular lattice with deterministic moves. Moves that would leave the
/// lattice keep the agent in place. Acting from a cell yields that cell's
/// reward.
#[derive(Debug, Clone)]
pub struct GridWorld {
    config: GridWorldConfig,
    terminals: HashSet<Location>,
    grid: Array2<Continous>,
    state: Option<Location>,
}

impl GridWorld {
    pub fn new(
        shape: (usize, usize),
        start: Location,
        terminals: &[Location],
        rewards: &[RewardLocation],
    ) -> Result<Self, EnvError> {
        Self::from_config(GridWorldConfig {
            shape,
            start,
            terminals: terminals.to_vec(),
            rewards: rewards.to_vec(),
        })
    }

    pub fn from_config(config: GridWorldConfig) -> Result<Self, EnvError> {
        let shape = config.shape;
        if shape.0 == 0 || shape.1 == 0 {
            return Err(EnvError::EmptyShape(shape));
        }
        if Discrete::try_from(shape.0).is_err() || Discrete::try_from(shape.1).is_err() {
            return Err(EnvError::ShapeTooLarge(shape));
        }

        for &location in &config.terminals {
            if cell_index(shape, location).is_none() {
                return Err(EnvError::OutOfBounds {
                    what: "terminal",
                    location,
                    shape,
                });
            }
        }

        // Later entries for the same cell overwrite earlier ones.
        let mut grid = Array2::<Continous>::zeros(shape);
        for &(r, c, value) in &config.rewards {
            let location = (r, c);
            let ix = cell_index(shape, location).ok_or(EnvError::OutOfBounds {
                what: "reward",
                location,
                shape,
            })?;
            if !value.is_finite() {
                return Err(EnvError::NonFiniteReward { location, value });
            }
            grid[ix] = value;
        }

        if cell_index(shape, config.start).is_none() {
            tracing::warn!(
                "Start location {:?} lies outside grid of shape {:?}.",
                config.start,
                shape
            );
        }

        Ok(Self {
            terminals: config.terminals.iter().copied().collect(),
            state: Some(config.start),
            config,
            grid,
        })
    }

    pub fn config(&self) -> &GridWorldConfig {
        &self.config
    }

    pub fn shape(&self) -> (usize, usize) {
        self.config.shape
    }

    pub fn start(&self) -> Location {
        self.config.start
    }

    /// Current episodic location, `None` once the episode has ended.
    pub fn location(&self) -> Option<Location> {
        self.state
    }

    /// Reward collected when acting from `location`. Off-grid cells carry none.
    pub fn reward(&self, location: &Location) -> Continous {
        cell_index(self.shape(), *location).map_or(0., |ix| self.grid[ix])
    }

    fn next_location(&self, location: &Location, a: &GridAction) -> Location {
        let (dr, dc) = a.delta();
        let next = (location.0 + dr, location.1 + dc);
        if cell_index(self.shape(), next).is_some() {
            next
        } else {
            *location
        }
    }
}

fn cell_index(shape: (usize, usize), (r, c): Location) -> Option<(usize, usize)> {
    let r = usize::try_from(r).ok()?;
    let c = usize::try_from(c).ok()?;
    (r < shape.0 && c < shape.1).then_some((r, c))
}

impl Mdp for GridWorld {
    type State = Location;
    type Action = GridAction;

    /// All cells in row-major order.
    fn states(&self) -> Vec<Location> {
        let (h, w) = self.shape();
        iproduct!(0..h, 0..w)
            .map(|(r, c)| (r as Discrete, c as Discrete))
            .collect()
    }

    fn actions(&self) -> Vec<GridAction> {
        GridAction::ALL.to_vec()
    }

    fn simulate_step(&self, s: &Location, a: &GridAction) -> StepInfo<Location> {
        let terminated = self.is_terminal(s);
        StepInfo {
            observation: if terminated {
                *s
            } else {
                self.next_location(s, a)
            },
            reward: self.reward(s),
            terminated,
        }
    }

    fn is_terminal(&self, s: &Location) -> bool {
        self.terminals.contains(s)
    }

    fn render_value_function(&self, v: &ValueFunction<Location>) -> String {
        let mut value_map = Array2::<Continous>::zeros(self.shape());
        for (s, value) in v {
            if let Some(ix) = cell_index(self.shape(), *s) {
                value_map[ix] = *value;
            }
        }

        render_matrix(&value_map, fmt_value)
    }

    fn render_policy(&self, pi: &PolicyTable<Location>) -> String {
        let mut policy_map = Array2::from_elem(self.shape(), "");
        for (s, a) in pi {
            if let Some(ix) = cell_index(self.shape(), *s) {
                policy_map[ix] = if self.is_terminal(s) {
                    "X"
                } else {
                    GridAction::from_index(*a).map_or("?", GridAction::name)
                };
            }
        }

        render_matrix(&policy_map, fmt_label)
    }
}

impl Episodic for GridWorld {
    fn reset(&mut self) -> Location {
        self.state = Some(self.start());
        self.start()
    }

    fn step(&mut self, a: &GridAction) -> Result<StepInfo<Location>, EnvError> {
        let s = self.state.ok_or(EnvError::NotReady)?;
        let info = self.simulate_step(&s, a);
        self.state = if info.terminated {
            None
        } else {
            Some(info.observation)
        };

        Ok(info)
    }

    /// Reward grid with the current location marked `X`.
    fn render(&self) -> String {
        let mut cells = self.grid.map(|r| format!("{r:.1}"));
        if let Some(ix) = self.state.and_then(|s| cell_index(self.shape(), s)) {
            cells[ix] = "X".to_string();
        }

        render_matrix(&cells, |c| format!("{c:>5}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Location, RewardLocation};
    use assertor::*;
    use rstest::*;

    fn corridor() -> GridWorld {
        GridWorld::new((1, 3), (0, 0), &[(0, 2)], &[(0, 2, 1.)]).unwrap()
    }

    #[rstest]
    #[case(GridAction::Left, (1, 0))]
    #[case(GridAction::Down, (2, 1))]
    #[case(GridAction::Right, (1, 2))]
    #[case(GridAction::Up, (0, 1))]
    fn moves_follow_action_table(#[case] a: GridAction, #[case] expected: Location) {
        let env = GridWorld::new((3, 3), (0, 0), &[], &[]).unwrap();

        let si = env.simulate_step(&(1, 1), &a);

        assert_eq!(si.observation, expected);
        assert!(!si.terminated);
    }

    #[rstest]
    #[case(0, GridAction::Left)]
    #[case(1, GridAction::Down)]
    #[case(2, GridAction::Right)]
    #[case(3, GridAction::Up)]
    fn action_indices_are_stable(#[case] i: usize, #[case] a: GridAction) {
        assert_eq!(GridAction::from_index(i), Some(a));
        assert_eq!(a.index(), i);
        assert_eq!(corridor().actions()[i], a);
    }

    #[test]
    fn off_grid_moves_stay_put() {
        let env = GridWorld::new((3, 4), (0, 0), &[], &[]).unwrap();
        let (h, w) = (3, 4);

        for (r, c) in env.states() {
            for a in env.actions() {
                let (dr, dc) = a.delta();
                let leaves = r + dr < 0 || c + dc < 0 || r + dr >= h || c + dc >= w;
                if leaves {
                    assert_eq!(env.simulate_step(&(r, c), &a).observation, (r, c));
                }
            }
        }
    }

    #[test]
    fn origin_clips_left_and_up() {
        let env = GridWorld::new((3, 3), (0, 0), &[(2, 2)], &[(2, 2, 1.)]).unwrap();

        assert_eq!(env.simulate_step(&(0, 0), &GridAction::Left).observation, (0, 0));
        assert_eq!(env.simulate_step(&(0, 0), &GridAction::Up).observation, (0, 0));
    }

    #[test]
    fn states_are_row_major() {
        let env = GridWorld::new((2, 3), (0, 0), &[], &[]).unwrap();

        assert_eq!(
            env.states(),
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn terminal_step_returns_own_reward() {
        let env = corridor();

        for a in env.actions() {
            let si = env.simulate_step(&(0, 2), &a);
            assert!(si.terminated);
            assert_eq!(si.reward, 1.);
            assert_eq!(si.observation, (0, 2));
        }
    }

    #[test]
    fn reward_is_taken_from_current_cell() {
        let env = corridor();

        let si = env.simulate_step(&(0, 1), &GridAction::Right);

        assert_eq!(si.observation, (0, 2));
        assert_eq!(si.reward, 0.);
    }

    #[test]
    fn last_reward_for_a_cell_wins() {
        let env = GridWorld::new((2, 2), (0, 0), &[], &[(1, 1, 2.), (1, 1, -3.)]).unwrap();

        assert_eq!(env.reward(&(1, 1)), -3.);
        assert_eq!(env.reward(&(0, 1)), 0.);
    }

    #[rstest]
    #[case((1, 3), &[(0, 3)], &[])]
    #[case((1, 3), &[], &[(-1, 0, 1.)])]
    #[case((2, 2), &[(2, 0)], &[])]
    fn out_of_bounds_locations_are_rejected(
        #[case] shape: (usize, usize),
        #[case] terminals: &[Location],
        #[case] rewards: &[RewardLocation],
    ) {
        let err = GridWorld::new(shape, (0, 0), terminals, rewards).unwrap_err();

        assert!(matches!(err, EnvError::OutOfBounds { .. }), "{err}");
    }

    #[test]
    fn empty_shape_is_rejected() {
        let err = GridWorld::new((0, 4), (0, 0), &[], &[]).unwrap_err();

        assert_eq!(err, EnvError::EmptyShape((0, 4)));
    }

    #[rstest]
    #[case((Discrete::MAX as usize + 1, 1))]
    #[case((2, usize::MAX))]
    fn shape_beyond_coordinate_range_is_rejected(#[case] shape: (usize, usize)) {
        let err = GridWorld::new(shape, (0, 0), &[], &[]).unwrap_err();

        assert_eq!(err, EnvError::ShapeTooLarge(shape));
    }

    #[test]
    fn non_finite_reward_is_rejected() {
        let err = GridWorld::new((2, 2), (0, 0), &[], &[(0, 1, f64::NAN)]).unwrap_err();

        assert!(matches!(
            err,
            EnvError::NonFiniteReward {
                location: (0, 1),
                ..
            }
        ));
    }

    #[test]
    fn off_grid_start_is_accepted() {
        let env = GridWorld::new((2, 2), (5, -1), &[(0, 0)], &[]).unwrap();

        assert_eq!(env.start(), (5, -1));
        assert_that!(env.states()).has_length(4);
    }

    #[test]
    fn terminal_may_coincide_with_start() {
        let mut env = GridWorld::new((2, 2), (1, 1), &[(1, 1)], &[(1, 1, 4.)]).unwrap();

        let s = env.reset();
        let si = env.step(&GridAction::Up).unwrap();

        assert_eq!(s, (1, 1));
        assert!(si.terminated);
        assert_eq!(si.reward, 4.);
    }

    #[test]
    fn render_policy_marks_terminals() {
        let env = corridor();
        let pi = PolicyTable::from([((0, 0), 2), ((0, 1), 2), ((0, 2), 0)]);

        insta::assert_snapshot!(env.render_policy(&pi), @"[RIGHT RIGHT     X]");
    }

    #[test]
    fn render_value_function_is_dense() {
        let env = GridWorld::new((2, 2), (0, 0), &[(1, 1)], &[(1, 1, 1.)]).unwrap();
        let v = ValueFunction::from([((1, 1), 1.), ((0, 1), 0.9)]);

        insta::assert_snapshot!(env.render_value_function(&v), @r###"
        [  0.0000   0.9000]
        [  0.0000   1.0000]
        "###);
    }
}
