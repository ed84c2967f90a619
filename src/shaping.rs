use crate::replay_buffer::Transition;

/// Retroactively penalize the losing team: subtract `reward_for_win` from
/// the reward of its last recorded transition. Exactly one transition
/// changes; the winning team gets no symmetric bonus.
///
/// A team that never earned a nonzero reward has an empty episode buffer
/// (the sparsity filter drops zero-reward steps), so losing without a
/// recorded transition is a legal outcome and shaping becomes a no-op.
pub fn penalize_losing_team(buffer: &mut [Transition], reward_for_win: f32) {
    match buffer.last_mut() {
        Some(last) => last.reward -= reward_for_win,
        None => log::warn!("losing team has no recorded transitions, skipping penalty"),
    }
}
