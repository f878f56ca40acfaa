//! Sorting algorithm drivers.
//!
//! Drivers are plain control flow over [`RunContext`] primitives. They never
//! see a renderer or a timer; pacing happens inside the primitives they
//! await. Recursive algorithms keep their pending ranges on an explicit work
//! stack instead of recursing through suspension points.

pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

use crate::context::RunContext;
use crate::core::algorithm::Algorithm;
use crate::core::error::SortError;

/// Sort `ctx` ascending with `algorithm`.
pub async fn drive(algorithm: Algorithm, ctx: &mut RunContext) -> Result<(), SortError> {
    match algorithm {
        Algorithm::BubbleSort => bubble::sort(ctx).await,
        Algorithm::SelectionSort => selection::sort(ctx).await,
        Algorithm::InsertionSort => insertion::sort(ctx).await,
        Algorithm::QuickSort => quick::sort(ctx).await,
        Algorithm::MergeSort => merge::sort(ctx).await,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::core::algorithm::Algorithm;
    use crate::core::sequence::Sequence;
    use crate::playback::record;

    fn adversarial() -> Vec<Vec<u32>> {
        vec![
            vec![],
            vec![42],
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
            vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 1],
            vec![5, 5, 5, 5, 5],
            vec![0, 99, 0, 99, 0, 99],
            vec![2, 1],
        ]
    }

    #[test]
    fn every_driver_sorts_and_preserves_entries() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut inputs = adversarial();
        for _ in 0..200 {
            let len = rng.gen_range(0..=10);
            inputs.push((0..len).map(|_| rng.gen_range(0..=99)).collect());
        }

        for algorithm in Algorithm::ALL {
            for values in &inputs {
                let initial = Sequence::from_values(values.clone());
                let mut expected = values.clone();
                expected.sort_unstable();

                let run = record(algorithm, initial.clone()).expect("record");
                assert_eq!(run.output, expected, "{algorithm} over {values:?}");
                assert_eq!(&run.input, values);
            }
        }
    }

    #[test]
    fn tags_travel_with_values() {
        let mut rng = StdRng::seed_from_u64(11);
        for algorithm in Algorithm::ALL {
            for _ in 0..50 {
                let initial = Sequence::random(8, &mut rng);
                let mut ctx = crate::context::RunContext::new(
                    crate::core::types::RunId(0),
                    initial.clone(),
                    crate::playback::Playback::silent(),
                );
                futures::executor::block_on(super::drive(algorithm, &mut ctx)).expect("drive");
                assert!(ctx.sequence().is_sorted());
                assert!(
                    ctx.sequence().is_permutation_of(&initial),
                    "{algorithm} lost or duplicated an entry"
                );
            }
        }
    }

    #[test]
    fn trivial_inputs_emit_no_steps() {
        for algorithm in Algorithm::ALL {
            for values in [vec![], vec![7]] {
                let run = record(algorithm, Sequence::from_values(values.clone())).expect("record");
                assert!(run.steps.is_empty(), "{algorithm} over {values:?}");
                assert_eq!(run.output, values);
            }
        }
    }

    #[test]
    fn step_lists_are_deterministic() {
        let values = vec![31, 4, 15, 92, 65, 35, 89, 79, 32, 38];
        for algorithm in Algorithm::ALL {
            let first = record(algorithm, Sequence::from_values(values.clone())).expect("first");
            let second = record(algorithm, Sequence::from_values(values.clone())).expect("second");
            assert_eq!(first.steps, second.steps, "{algorithm}");
        }
    }
}
