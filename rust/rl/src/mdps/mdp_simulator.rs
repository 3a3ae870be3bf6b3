use gridworld::*;

/// `s` is the state reached and `r` the reward received on the way there.
/// The first event of an episode is the start state with zero reward.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeEvent<S> {
    pub s: S,
    pub r: Continous,
}

/// Plays `policy` from a freshly reset `env` until a terminal state has been
/// acted from or `max_steps` steps were taken. Returns the events and whether
/// the episode terminated.
pub fn generate_episode<E, P>(
    env: &mut E,
    policy: &P,
    max_steps: usize,
) -> Result<(Vec<EpisodeEvent<E::State>>, bool), EnvError>
where
    E: Episodic,
    P: Policy<E::State, E::Action>,
{
    let mut s = env.reset();
    let mut ep = vec![EpisodeEvent { s, r: 0. }];
    for _ in 0..max_steps {
        let si = env.step(&policy.policy(&s))?;
        ep.push(EpisodeEvent {
            s: si.observation,
            r: si.reward,
        });
        if si.terminated {
            return Ok((ep, true));
        }
        s = si.observation;
    }

    Ok((ep, false))
}

/// Discounted return from the first state of the episode.
pub fn discounted_return<S>(ep: &[EpisodeEvent<S>], gamma: Continous) -> Continous {
    let mut g = 0.;
    for t in (0..ep.len().saturating_sub(1)).rev() {
        g = gamma * g + ep[t + 1].r;
    }

    g
}
