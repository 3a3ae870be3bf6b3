use gridworld::*;
use std::hash::Hash;
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("{name} = {value} is out of range, expected {expected}")]
    InvalidParameter {
        name: &'static str,
        value: Continous,
        expected: &'static str,
    },

    #[error("state {0} is not in the environment's state set")]
    UnknownState(String),

    #[error("action index {0} is out of range")]
    UnknownAction(usize),

    #[error("non-finite value {value} at state {state}")]
    NonFinite { state: String, value: Continous },

    #[error("environment has no actions")]
    NoActions,
}

/// Dynamic programming solver over a known, deterministic `Mdp`.
pub trait MdpSolver<M: Mdp> {
    fn name(&self) -> &'static str;

    fn env(&self) -> &M;

    fn states(&self) -> &[M::State];

    fn actions(&self) -> &[M::Action];

    fn v_star(&self, s: &M::State) -> Option<Continous>;

    /// One-step backup of `(s, a)` under the current value function.
    fn q_star(&self, s: &M::State, a: usize) -> Result<Continous, SolverError>;

    fn pi_star(&self, s: &M::State) -> Option<usize>;

    fn value_function(&self) -> &ValueFunction<M::State>;

    fn policy(&self) -> &PolicyTable<M::State>;

    /// Iterations performed over the lifetime of the solver.
    fn iterations(&self) -> usize;

    /// Iterates until converged, or until `num_iterations` more iterations
    /// have been performed. Returns whether it converged and the number of
    /// iterations performed by this call.
    fn exec(&mut self, num_iterations: Option<usize>) -> Result<(bool, usize), SolverError>;

    fn run(&mut self) -> Result<(bool, usize), SolverError> {
        let start_time = Instant::now();
        let ret = self.exec(None)?;
        tracing::info!(
            "{} took {:?} to converge.",
            self.name(),
            start_time.elapsed()
        );

        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!("{}", "-".repeat(50));
            tracing::debug!(
                "Value function:\n{}",
                self.env().render_value_function(self.value_function())
            );
            tracing::debug!("Policy:\n{}", self.env().render_policy(self.policy()));
        }

        Ok(ret)
    }
}

/// States, in `states` order, on which the two policies pick different actions.
pub fn policy_mismatches<S>(states: &[S], a: &PolicyTable<S>, b: &PolicyTable<S>) -> Vec<S>
where
    S: Copy + Eq + Hash,
{
    states
        .iter()
        .filter(|s| a.get(s) != b.get(s))
        .copied()
        .collect()
}
