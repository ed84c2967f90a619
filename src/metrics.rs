use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::env::NUM_TEAMS;

/// Aggregated statistics for one training epoch.
///
/// Semantics follow the reference reporter: every average is a floor
/// division, `avg_steps` reflects only the last episode of the epoch, and
/// `avg_loss` is absent when no learning update ran.
#[derive(Clone, Debug, Serialize)]
pub struct EpochStats {
    pub epoch: usize,
    /// Per-team reward accumulated over the epoch, floor-divided by the
    /// episode count.
    pub avg_team_rewards: [f32; NUM_TEAMS],
    /// The last episode's round count, floor-divided by the episode count.
    pub avg_steps: f32,
    /// Summed loss floor-divided by the update count; `None` when the epoch
    /// saw no update.
    pub avg_loss: Option<f32>,
    pub elapsed: Duration,
}

impl fmt::Display for EpochStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Epoch {}: Total Average Rewards = [{}, {}] Average steps = {} Average loss = ",
            self.epoch, self.avg_team_rewards[0], self.avg_team_rewards[1], self.avg_steps,
        )?;
        match self.avg_loss {
            Some(loss) => write!(f, "{}", loss)?,
            None => write!(f, "n/a")?,
        }
        write!(f, " Elapsed Time = {} seconds", self.elapsed.as_secs())
    }
}

/// Floor division of a running sum by a count, matching the reference
/// reporter's integer-division semantics on real-valued sums.
pub(crate) fn floor_div(sum: f32, count: usize) -> f32 {
    (sum / count as f32).floor()
}
