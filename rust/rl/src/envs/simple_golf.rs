use gridworld::*;
use itertools::Itertools;

/// Deterministic take on the golf course of
/// https://towardsdatascience.com/reinforcement-learning-an-easy-introduction-to-value-iteration-e4cfe0731fd5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lie {
    Fairway,
    Green,
    Hole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Club {
    Driver,
    Putter,
}

pub const STROKE_REWARD: Continous = -1.;
pub const HOLE_REWARD: Continous = 10.;

pub struct SimpleGolf {
    stroke_reward: Continous,
    list_hole: bool,
}

impl Default for SimpleGolf {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleGolf {
    pub fn new() -> Self {
        Self {
            stroke_reward: STROKE_REWARD,
            list_hole: true,
        }
    }

    pub fn with_stroke_reward(stroke_reward: Continous) -> Self {
        Self {
            stroke_reward,
            list_hole: true,
        }
    }

    /// Leaves `Hole` out of `states()` while still transitioning into it.
    pub fn without_hole() -> Self {
        Self {
            stroke_reward: STROKE_REWARD,
            list_hole: false,
        }
    }
}

impl Mdp for SimpleGolf {
    type State = Lie;
    type Action = Club;

    fn states(&self) -> Vec<Lie> {
        if self.list_hole {
            vec![Lie::Fairway, Lie::Green, Lie::Hole]
        } else {
            vec![Lie::Fairway, Lie::Green]
        }
    }

    fn actions(&self) -> Vec<Club> {
        vec![Club::Driver, Club::Putter]
    }

    fn simulate_step(&self, s: &Lie, a: &Club) -> StepInfo<Lie> {
        let (observation, reward, terminated) = match (s, a) {
            (Lie::Hole, _) => (Lie::Hole, HOLE_REWARD, true),
            (Lie::Fairway, Club::Driver) => (Lie::Green, self.stroke_reward, false),
            (Lie::Fairway, Club::Putter) => (Lie::Fairway, self.stroke_reward, false),
            (Lie::Green, Club::Driver) => (Lie::Fairway, self.stroke_reward, false),
            (Lie::Green, Club::Putter) => (Lie::Hole, self.stroke_reward, false),
        };

        StepInfo {
            observation,
            reward,
            terminated,
        }
    }

    fn is_terminal(&self, s: &Lie) -> bool {
        *s == Lie::Hole
    }

    fn render_value_function(&self, v: &ValueFunction<Lie>) -> String {
        self.states()
            .iter()
            .map(|s| format!("{s:?}: {:.4}", v.get(s).copied().unwrap_or_default()))
            .join("\n")
    }

    fn render_policy(&self, pi: &PolicyTable<Lie>) -> String {
        let actions = self.actions();
        self.states()
            .iter()
            .map(|s| format!("{s:?}: {:?}", pi.get(s).and_then(|&a| actions.get(a))))
            .join("\n")
    }
}
