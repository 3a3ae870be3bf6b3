pub mod common;
pub mod grid_world;
pub mod mdps;

pub use common::defs::*;
pub use grid_world::*;
pub use mdps::*;

use thiserror::Error;

/// Result of acting once from a state.
///
/// `terminated` refers to the state that was acted from: it is absorbing, the
/// reward is the last one the episode collects and `observation` carries no
/// meaning for planning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInfo<S> {
    pub observation: S,
    pub reward: Continous,
    pub terminated: bool,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvError {
    #[error("grid shape must have non-zero dimensions, got {0:?}")]
    EmptyShape((usize, usize)),

    #[error("grid shape {0:?} has more rows or columns than coordinates can address")]
    ShapeTooLarge((usize, usize)),

    #[error("{what} location {location:?} lies outside grid of shape {shape:?}")]
    OutOfBounds {
        what: &'static str,
        location: Location,
        shape: (usize, usize),
    },

    #[error("reward at {location:?} is not finite: {value}")]
    NonFiniteReward { location: Location, value: Continous },

    #[error("episode has ended, call reset() before stepping again")]
    NotReady,
}
