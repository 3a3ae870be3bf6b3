use super::*;
use std::fmt::Debug;
use std::hash::Hash;

/// Deterministic finite Markov Decision Process - Sutton & Barto 2018.
///
/// This is the planning surface: everything is `&self` and `simulate_step`
/// is a pure function of its arguments.
pub trait Mdp {
    type State: Copy + Eq + Hash + Debug;
    type Action: Copy + Debug;

    /// Every state that can appear as a `next_state`, in sweep order.
    fn states(&self) -> Vec<Self::State>;

    /// Action set. Policies store indices into this sequence.
    fn actions(&self) -> Vec<Self::Action>;

    fn simulate_step(&self, s: &Self::State, a: &Self::Action) -> StepInfo<Self::State>;

    fn is_terminal(&self, s: &Self::State) -> bool;

    fn render_value_function(&self, v: &ValueFunction<Self::State>) -> String;

    fn render_policy(&self, pi: &PolicyTable<Self::State>) -> String;
}

/// Episodic interface over an `Mdp`. Not used for planning.
pub trait Episodic: Mdp {
    fn reset(&mut self) -> Self::State;

    /// Acts from the current location. Fails with `EnvError::NotReady` once
    /// the episode has ended.
    fn step(&mut self, a: &Self::Action) -> Result<StepInfo<Self::State>, EnvError>;

    fn render(&self) -> String;
}

pub trait Policy<S, A> {
    fn policy(&self, s: &S) -> A;
}
