use super::super::mdp_solver::*;
use gridworld::*;
use itertools::Itertools;
use std::cmp::Ordering;
use std::rc::Rc;

/// Single-action backup: `r` for a terminal state, `r + gamma * V[s']` otherwise.
pub fn q_value<M: Mdp>(
    env: &M,
    v: &ValueFunction<M::State>,
    gamma: Continous,
    s: &M::State,
    a: &M::Action,
) -> Result<Continous, SolverError> {
    let si = env.simulate_step(s, a);
    if !si.reward.is_finite() {
        return Err(non_finite(s, si.reward));
    }
    if si.terminated {
        return Ok(si.reward);
    }

    let v_next = v
        .get(&si.observation)
        .ok_or_else(|| SolverError::UnknownState(format!("{:?}", si.observation)))?;
    let q = si.reward + gamma * v_next;
    if q.is_finite() {
        Ok(q)
    } else {
        Err(non_finite(s, q))
    }
}

/// Action sweep: `Q(s, a)` for every action, in action order, written into `out`.
pub fn q_values<M: Mdp>(
    env: &M,
    v: &ValueFunction<M::State>,
    gamma: Continous,
    s: &M::State,
    actions: &[M::Action],
    out: &mut Vec<Continous>,
) -> Result<(), SolverError> {
    out.clear();
    for a in actions {
        out.push(q_value(env, v, gamma, s, a)?);
    }

    Ok(())
}

/// Index of the first maximum.
pub fn argmax(values: &[Continous]) -> Option<usize> {
    // position_min_by keeps the first of equal elements, position_max_by the last.
    values
        .iter()
        .position_min_by(|x, y| y.partial_cmp(x).unwrap_or(Ordering::Equal))
}

pub fn max(values: &[Continous]) -> Option<Continous> {
    argmax(values).map(|i| values[i])
}

fn non_finite<S: std::fmt::Debug>(s: &S, value: Continous) -> SolverError {
    SolverError::NonFinite {
        state: format!("{s:?}"),
        value,
    }
}

/// Tables and parameters shared by the planners.
pub(crate) struct SolverCore<M: Mdp> {
    pub env: Rc<M>,
    pub min_delta: Continous,
    pub gamma: Continous,
    pub states: Vec<M::State>,
    pub actions: Vec<M::Action>,
    pub v: ValueFunction<M::State>,
    pub pi: PolicyTable<M::State>,
    pub iterations: usize,
    /// Scratch for action sweeps.
    pub q: Vec<Continous>,
}

impl<M: Mdp> SolverCore<M> {
    pub fn new(env: Rc<M>, min_delta: Continous, gamma: Continous) -> Result<Self, SolverError> {
        if !(gamma > 0. && gamma <= 1.) {
            return Err(SolverError::InvalidParameter {
                name: "gamma",
                value: gamma,
                expected: "0 < gamma <= 1",
            });
        }
        if !(min_delta > 0. && min_delta.is_finite()) {
            return Err(SolverError::InvalidParameter {
                name: "min_delta",
                value: min_delta,
                expected: "a finite min_delta > 0",
            });
        }

        let states = env.states();
        let actions = env.actions();
        if actions.is_empty() {
            return Err(SolverError::NoActions);
        }

        Ok(Self {
            v: states.iter().map(|&s| (s, 0.)).collect(),
            pi: states.iter().map(|&s| (s, 0)).collect(),
            q: Vec::with_capacity(actions.len()),
            env,
            min_delta,
            gamma,
            states,
            actions,
            iterations: 0,
        })
    }

    pub fn q_star(&self, s: &M::State, a: usize) -> Result<Continous, SolverError> {
        let a = self.actions.get(a).ok_or(SolverError::UnknownAction(a))?;
        if !self.v.contains_key(s) {
            return Err(SolverError::UnknownState(format!("{s:?}")));
        }

        q_value(&*self.env, &self.v, self.gamma, s, a)
    }

    /// Sets `pi[s]` to the greedy action under the current `v` for every
    /// state. Returns whether any action changed.
    pub fn greedy_policy(&mut self) -> Result<bool, SolverError> {
        let mut changed = false;
        for s in &self.states {
            q_values(
                &*self.env,
                &self.v,
                self.gamma,
                s,
                &self.actions,
                &mut self.q,
            )?;
            let new_action = argmax(&self.q).ok_or(SolverError::NoActions)?;
            if self.pi.insert(*s, new_action) != Some(new_action) {
                changed = true;
            }
        }

        Ok(changed)
    }
}
