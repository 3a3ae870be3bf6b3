use super::mdp_solver::*;
use gridworld::*;

/// Acts greedily with respect to a solver's policy table.
///
/// States the solver has never seen get the zero-index action, which is
/// what every policy table starts with.
pub struct MdpSolverPolicy<'a, M: Mdp> {
    pub mdp_solver: &'a dyn MdpSolver<M>,
}

impl<'a, M: Mdp> Policy<M::State, M::Action> for MdpSolverPolicy<'a, M> {
    fn policy(&self, s: &M::State) -> M::Action {
        self.mdp_solver.actions()[self.mdp_solver.pi_star(s).unwrap_or_default()]
    }
}
