use crate::agent::DqnAgent;
use crate::env::{StepOutcome, TeamEnvironment, NUM_TEAMS};
use crate::error::{AresError, Result};
use crate::replay_buffer::Transition;
use crate::shaping::penalize_losing_team;
use rand::Rng;

/// Where an episode stands. A single status value is checked at every loop
/// level of the rollout, so termination needs no multi-level control flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EpisodeStatus {
    Running,
    Terminal { winner: usize },
}

/// Everything one episode produced.
#[derive(Clone, Debug)]
pub struct EpisodeOutcome {
    /// Per-team transitions recorded this episode (zero-reward steps are
    /// filtered out). Shaped already if the episode terminated.
    pub team_buffers: [Vec<Transition>; NUM_TEAMS],
    /// Per-team reward accumulated over the recorded transitions.
    pub team_rewards: [f32; NUM_TEAMS],
    /// Rounds played (one round = every live fighter on both teams acts once).
    pub rounds: usize,
    /// Team whose action ended the episode, `None` if the round budget ran out.
    pub winner: Option<usize>,
}

impl EpisodeOutcome {
    /// Whether the episode reached a terminal step. Only terminated episodes
    /// may feed the replay buffer.
    pub fn terminated(&self) -> bool {
        self.winner.is_some()
    }
}

/// Drives one episode of turn-based two-team play.
///
/// Teams act in fixed order; within a team, every live fighter acts once per
/// round. Each fighter follows the shared epsilon-greedy policy: a uniform
/// draw above `exploration_rate` selects the greedy action from the value
/// network, anything else samples a random action from the environment.
pub struct EpisodeRunner {
    pub exploration_rate: f32,
    pub max_rounds: usize,
    pub reward_for_win: f32,
}

impl EpisodeRunner {
    pub fn new(exploration_rate: f32, max_rounds: usize, reward_for_win: f32) -> Self {
        EpisodeRunner {
            exploration_rate,
            max_rounds,
            reward_for_win,
        }
    }

    /// Run one episode to termination or the round budget.
    ///
    /// `rng` is the exploration stream; random actions themselves come from
    /// the environment's own sampler so the two sources stay independently
    /// seedable.
    pub fn run<E, R>(&self, env: &mut E, agent: &mut DqnAgent, rng: &mut R) -> Result<EpisodeOutcome>
    where
        E: TeamEnvironment,
        R: Rng,
    {
        let mut state = env.reset();
        let mut team_buffers = [Vec::new(), Vec::new()];
        let mut team_rewards = [0.0f32; NUM_TEAMS];
        let mut status = EpisodeStatus::Running;
        let mut rounds = 0;

        while status == EpisodeStatus::Running && rounds < self.max_rounds {
            if (0..NUM_TEAMS).all(|team| env.team_len(team) == 0) {
                return Err(AresError::Environment(
                    "both teams report zero live fighters".to_string(),
                ));
            }

            let mut team = 0;
            while status == EpisodeStatus::Running && team < NUM_TEAMS {
                let mut slot = 0;
                while status == EpisodeStatus::Running && slot < env.team_len(team) {
                    let action = if rng.gen::<f32>() > self.exploration_rate {
                        agent.greedy_action(state.view())?
                    } else {
                        env.sample_action()
                    };

                    env.set_active(slot, team);
                    let StepOutcome {
                        next_state,
                        reward,
                        done,
                        ..
                    } = env.step(action);

                    // Sparsity filter: only steps that moved the score are kept.
                    if reward != 0.0 {
                        team_rewards[team] += reward;
                        team_buffers[team].push(Transition {
                            state: state.clone(),
                            action,
                            reward,
                            next_state: next_state.clone(),
                            done,
                        });
                    }

                    state = next_state;

                    if done {
                        status = EpisodeStatus::Terminal { winner: team };
                    }
                    slot += 1;
                }
                team += 1;
            }
            rounds += 1;
        }

        let winner = match status {
            EpisodeStatus::Terminal { winner } => {
                let loser = (winner + 1) % NUM_TEAMS;
                penalize_losing_team(&mut team_buffers[loser], self.reward_for_win);
                Some(winner)
            }
            EpisodeStatus::Running => None,
        };

        Ok(EpisodeOutcome {
            team_buffers,
            team_rewards,
            rounds,
            winner,
        })
    }
}
