use ndarray::Array1;

/// The arena always pits two teams against each other.
pub const NUM_TEAMS: usize = 2;

/// Result of advancing the environment by one action.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    pub next_state: Array1<f32>,
    pub reward: f32,
    pub done: bool,
    /// Upstream truncation flag; the trainer enforces its own step budget
    /// and ignores this.
    pub truncated: bool,
}

/// Turn-structured, team-based game consumed by the trainer.
///
/// The game simulation itself is an external collaborator; the trainer only
/// ever sees this narrow interface. All agents on both teams share one state
/// vector, and `set_active` directs which fighter the next `step` controls.
/// Implementations own their action-sampling RNG so that exploration, batch
/// sampling, and environment randomness stay independently seedable.
pub trait TeamEnvironment {
    /// Begin a new episode and return the initial shared state.
    fn reset(&mut self) -> Array1<f32>;

    /// Advance the environment with the chosen action for the active fighter.
    fn step(&mut self, action: usize) -> StepOutcome;

    /// Uniform random legal action from the environment's own RNG.
    fn sample_action(&mut self) -> usize;

    /// Dimensionality of the shared state vector. Fixed for the episode.
    fn state_dim(&self) -> usize;

    /// Size of the discrete action space. Fixed for the episode.
    fn num_actions(&self) -> usize;

    /// Number of live fighters on a team. May shrink as fighters are
    /// eliminated; queried fresh every micro-step.
    fn team_len(&self, team: usize) -> usize;

    /// Direct which fighter the next `step` call controls.
    fn set_active(&mut self, slot: usize, team: usize);
}
