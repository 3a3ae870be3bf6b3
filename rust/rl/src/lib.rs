pub mod config;
pub mod mdps;

#[cfg(test)]
mod envs;

pub use mdps::{
    mdp_simulator::*, mdp_solver::*, mdp_solver_policy::*, solvers::policy_iteration::*,
    solvers::value_iteration::*,
};
