use super::super::mdp_solver::*;
use super::common::*;
use gridworld::*;
use std::rc::Rc;

/// Value Iteration - Sutton & Barto 2018, section 4.4.
///
/// Sweeps `V[s] <- max_a Q(s, a)` in place until the largest change within a
/// sweep is below `min_delta`, then extracts the greedy policy.
pub struct ValueIteration<M: Mdp> {
    core: SolverCore<M>,
}

impl<M: Mdp> ValueIteration<M> {
    pub fn new(env: Rc<M>, min_delta: Continous, gamma: Continous) -> Result<Self, SolverError> {
        Ok(Self {
            core: SolverCore::new(env, min_delta, gamma)?,
        })
    }

    /// One in-place sweep. Returns the largest absolute change of V.
    fn value_sweep(&mut self) -> Result<Continous, SolverError> {
        let core = &mut self.core;
        let mut delta: Continous = 0.;
        for s in &core.states {
            q_values(
                &*core.env,
                &core.v,
                core.gamma,
                s,
                &core.actions,
                &mut core.q,
            )?;
            let new_value = max(&core.q).ok_or(SolverError::NoActions)?;
            if let Some(old_value) = core.v.insert(*s, new_value) {
                delta = delta.max((old_value - new_value).abs());
            }
        }

        Ok(delta)
    }
}

impl<M: Mdp> MdpSolver<M> for ValueIteration<M> {
    fn name(&self) -> &'static str {
        "ValueIteration"
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

    /// An iteration is one value sweep. The policy is extracted from V when
    /// the sweeps stop, whether or not they converged.
    fn exec(&mut self, num_iterations: Option<usize>) -> Result<(bool, usize), SolverError> {
        tracing::debug!("Value iteration:");
        let mut n = 0;
        let converged = loop {
            if num_iterations.is_some_and(|max| n >= max) {
                break false;
            }

            n += 1;
            self.core.iterations += 1;
            let delta = self.value_sweep()?;
            if delta < self.core.min_delta {
                break true;
            }
            tracing::debug!("\tMaximum value change: {delta:.3}");
        };

        self.core.greedy_policy()?;

        Ok((converged, n))
    }
}
