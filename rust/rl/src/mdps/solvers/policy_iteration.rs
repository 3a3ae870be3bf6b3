use super::super::mdp_solver::*;
use super::common::*;
use gridworld::*;
use std::rc::Rc;

/// Policy Iteration - Sutton & Barto 2018, section 4.3.
///
/// Alternates policy evaluation, which drives V to the value of the current
/// policy, with greedy policy improvement until no action changes. Both
/// phases update the tables in place, so later states in a sweep see the
/// values already written for earlier ones.
pub struct PolicyIteration<M: Mdp> {
    core: SolverCore<M>,
}

impl<M: Mdp> PolicyIteration<M> {
    pub fn new(env: Rc<M>, min_delta: Continous, gamma: Continous) -> Result<Self, SolverError> {
        Ok(Self {
            core: SolverCore::new(env, min_delta, gamma)?,
        })
    }

    /// Sweeps until the largest change of V within one sweep is below
    /// `min_delta`. Returns the number of sweeps.
    fn policy_evaluation(&mut self) -> Result<usize, SolverError> {
        tracing::debug!("\tPolicy evaluation.");
        let core = &mut self.core;
        let mut sweeps = 0;
        loop {
            sweeps += 1;
            let mut delta: Continous = 0.;
            for s in &core.states {
                let a = &core.actions[core.pi[s]];
                let new_value = q_value(&*core.env, &core.v, core.gamma, s, a)?;
                if let Some(old_value) = core.v.insert(*s, new_value) {
                    delta = delta.max((old_value - new_value).abs());
                }
            }

            if delta < core.min_delta {
                return Ok(sweeps);
            }
            tracing::debug!("\tMaximum value change: {delta:.3}");
        }
    }

    /// Makes the policy greedy with respect to V. Returns whether the policy
    /// is stable.
    fn policy_improvement(&mut self) -> Result<bool, SolverError> {
        tracing::debug!("\tPolicy improvement.");
        Ok(!self.core.greedy_policy()?)
    }
}

impl<M: Mdp> MdpSolver<M> for PolicyIteration<M> {
    fn name(&self) -> &'static str {
        "PolicyIteration"
    }

    fn env(&self) -> &M {
        &self.core.env
    }

    fn states(&self) -> &[M::State] {
        &self.core.states
    }

    fn actions(&self) -> &[M::Action] {
        &self.core.actions
    }

    fn v_star(&self, s: &M::State) -> Option<Continous> {
        self.core.v.get(s).copied()
    }

    fn q_star(&self, s: &M::State, a: usize) -> Result<Continous, SolverError> {
        self.core.q_star(s, a)
    }

    fn pi_star(&self, s: &M::State) -> Option<usize> {
        self.core.pi.get(s).copied()
    }

    fn value_function(&self) -> &ValueFunction<M::State> {
        &self.core.v
    }

    fn policy(&self) -> &PolicyTable<M::State> {
        &self.core.pi
    }

    fn iterations(&self) -> usize {
        self.core.iterations
    }

    fn exec(&mut self, num_iterations: Option<usize>) -> Result<(bool, usize), SolverError> {
        let mut n = 0;
        loop {
            if num_iterations.is_some_and(|max| n >= max) {
                return Ok((false, n));
            }

            n += 1;
            self.core.iterations += 1;
            tracing::debug!("Iteration {}:", self.core.iterations);
            let sweeps = self.policy_evaluation()?;
            tracing::debug!("\tPolicy evaluated in {sweeps} sweeps.");
            if self.policy_improvement()? {
                return Ok((true, n));
            }
        }
    }
}
