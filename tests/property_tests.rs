#[cfg(test)]
mod property_tests {
    use ares::replay_buffer::{ReplayBuffer, Transition};
    use ares::shaping::penalize_losing_team;
    use ndarray::array;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn transition(tag: usize) -> Transition {
        Transition {
            state: array![tag as f32],
            action: tag % 4,
            reward: tag as f32,
            next_state: array![(tag + 1) as f32],
            done: false,
        }
    }

    // A buffer operation: extend by a chunk, or sample-and-evict a batch.
    #[derive(Clone, Debug)]
    enum Op {
        Extend(usize),
        SampleEvict(usize),
    }

    fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
        prop::collection::vec(
            prop_oneof![
                (1usize..=20).prop_map(Op::Extend),
                (1usize..=10).prop_map(Op::SampleEvict),
            ],
            1..=40,
        )
    }

    proptest! {
        #[test]
        fn buffer_never_exceeds_capacity(
            capacity in 1usize..=16,
            ops in ops_strategy()
        ) {
            let mut buffer = ReplayBuffer::new(capacity);
            let mut rng = StdRng::seed_from_u64(0);
            let mut next_tag = 0usize;

            for op in ops {
                match op {
                    Op::Extend(count) => {
                        buffer.extend((0..count).map(|_| {
                            let t = transition(next_tag);
                            next_tag += 1;
                            t
                        }));
                    }
                    Op::SampleEvict(count) => {
                        let batch = buffer.sample_batch(count, &mut rng);
                        if !buffer.is_empty() {
                            prop_assert_eq!(batch.len(), count);
                        }
                        buffer.discard_oldest(count);
                    }
                }
                prop_assert!(buffer.len() <= capacity);
            }
        }

        #[test]
        fn buffer_contents_are_a_suffix_of_history(
            capacity in 1usize..=16,
            chunks in prop::collection::vec(1usize..=10, 1..=10)
        ) {
            // Pure insertion history: after any sequence of extends, the
            // buffer holds exactly the newest <= capacity insertions, in order.
            let mut buffer = ReplayBuffer::new(capacity);
            let mut history = Vec::new();

            for chunk in chunks {
                let start = history.len();
                buffer.extend((start..start + chunk).map(transition));
                history.extend(start..start + chunk);

                let expected_len = history.len().min(capacity);
                let expected: Vec<f32> = history[history.len() - expected_len..]
                    .iter()
                    .map(|&tag| tag as f32)
                    .collect();
                let actual: Vec<f32> = buffer.iter().map(|t| t.state[0]).collect();
                prop_assert_eq!(actual, expected);
            }
        }

        #[test]
        fn eviction_removes_exactly_the_oldest(
            fill in 2usize..=32,
            evict in 1usize..=32
        ) {
            let mut buffer = ReplayBuffer::new(64);
            buffer.extend((0..fill).map(transition));
            // Sampling first must not influence what eviction removes.
            let mut rng = StdRng::seed_from_u64(1);
            let _batch = buffer.sample_batch(evict, &mut rng);
            buffer.discard_oldest(evict);

            let survivors: Vec<f32> = buffer.iter().map(|t| t.state[0]).collect();
            let expected: Vec<f32> = (evict.min(fill)..fill).map(|t| t as f32).collect();
            prop_assert_eq!(survivors, expected);
        }

        #[test]
        fn sampling_draws_only_live_entries_and_does_not_mutate(
            fill in 1usize..=32,
            batch_size in 1usize..=64
        ) {
            let mut buffer = ReplayBuffer::new(64);
            buffer.extend((0..fill).map(transition));

            let mut rng = StdRng::seed_from_u64(2);
            let batch = buffer.sample_batch(batch_size, &mut rng);

            prop_assert_eq!(batch.len(), batch_size);
            for sampled in &batch {
                let tag = sampled.state[0] as usize;
                prop_assert!(tag < fill);
            }
            prop_assert_eq!(buffer.len(), fill);
        }

        #[test]
        fn shaping_changes_only_the_last_reward(
            rewards in prop::collection::vec(-5.0f32..5.0, 1..=16),
            penalty in 0.1f32..3.0
        ) {
            let mut buffer: Vec<Transition> = rewards
                .iter()
                .enumerate()
                .map(|(i, &r)| {
                    let mut t = transition(i);
                    t.reward = r;
                    t
                })
                .collect();
            let before = buffer.clone();

            penalize_losing_team(&mut buffer, penalty);

            let last = buffer.len() - 1;
            for i in 0..last {
                prop_assert_eq!(&buffer[i], &before[i]);
            }
            prop_assert_eq!(buffer[last].reward, before[last].reward - penalty);
            prop_assert_eq!(&buffer[last].state, &before[last].state);
            prop_assert_eq!(buffer[last].action, before[last].action);
            prop_assert_eq!(&buffer[last].next_state, &before[last].next_state);
            prop_assert_eq!(buffer[last].done, before[last].done);
        }
    }

    #[test]
    fn shaping_empty_buffer_is_a_noop() {
        let mut buffer: Vec<Transition> = Vec::new();
        penalize_losing_team(&mut buffer, 1.0);
        assert!(buffer.is_empty());
    }
}
