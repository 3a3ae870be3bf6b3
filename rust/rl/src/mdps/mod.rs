pub mod mdp_simulator;
pub mod mdp_solver;
pub mod mdp_solver_policy;
pub mod solvers;
