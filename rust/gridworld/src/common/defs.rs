use std::collections::HashMap;

pub type Discrete = i32;
pub type Continous = f64;

/// Lattice coordinate `(row, col)`.
pub type Location = (Discrete, Discrete);

/// `(row, col, reward)` entry of a grid configuration.
pub type RewardLocation = (Discrete, Discrete, Continous);

/// State-value table V.
pub type ValueFunction<S> = HashMap<S, Continous>;

/// Deterministic policy π: state to index into `Mdp::actions()`.
pub type PolicyTable<S> = HashMap<S, usize>;
