// Properties that tie the sequential, streaming and fan-out strategies together.

use proptest::prelude::*;
use seqflow::config::{ParallelConfig, PipelineConfig};
use seqflow::{
    filter, filter_stream, foldl, foldr, from_stream, map, map_stream, pmap, remove,
    remove_stream, reverse, take, to_stream, Config, Executor,
};

fn small_executor() -> Executor {
    Executor::new(Config {
        parallel: ParallelConfig {
            fan_out_limit: 8,
            pool_threads: 3,
        },
        pipeline: PipelineConfig {
            thread_prefix: "prop".to_string(),
        },
    })
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reverse_is_an_involution(s: Vec<i32>) {
        prop_assert_eq!(reverse(&reverse(&s)), s);
    }

    #[test]
    fn stream_round_trip(s: Vec<i32>) {
        let mut stream = to_stream(s.clone());
        prop_assert_eq!(from_stream(&mut stream).unwrap(), s);
    }

    #[test]
    fn filter_and_remove_partition(s: Vec<i32>, m in 1i32..7) {
        let pred = |x: &i32| x.rem_euclid(m) == 0;
        let kept = filter(pred, &s);
        let dropped = remove(pred, &s);
        prop_assert_eq!(kept.len() + dropped.len(), s.len());

        // Interleaving both halves by the predicate rebuilds the input.
        let (mut k, mut d) = (kept.iter(), dropped.iter());
        let rebuilt: Vec<i32> = s
            .iter()
            .map(|x| if pred(x) { *k.next().unwrap() } else { *d.next().unwrap() })
            .collect();
        prop_assert_eq!(rebuilt, s);
    }

    #[test]
    fn take_then_drop_rebuilds(s: Vec<u8>, n in 0usize..64) {
        let n = n.min(s.len());
        let mut joined = take(n, &s);
        joined.extend(seqflow::drop(n, &s));
        prop_assert_eq!(joined, s);
    }

    #[test]
    fn folds_agree_on_addition(s: Vec<i64>) {
        let left = foldl(|acc, &x| acc.wrapping_add(x), 0i64, &s);
        let right = foldr(|&x, acc| x.wrapping_add(acc), 0i64, &s);
        prop_assert_eq!(left, right);
    }

    #[test]
    fn stream_map_matches_map(s: Vec<i32>) {
        let f = |x: i32| x.wrapping_mul(3).wrapping_sub(1);
        let mut streamed = map_stream(f, to_stream(s.clone()));
        prop_assert_eq!(from_stream(&mut streamed).unwrap(), map(|x| f(*x), &s));
    }

    #[test]
    fn stream_filter_and_remove_match_slices(s: Vec<i32>) {
        let odd = |x: &i32| x % 2 != 0;
        prop_assert_eq!(filter_stream(odd, to_stream(s.clone())).collect().unwrap(), filter(odd, &s));
        prop_assert_eq!(remove_stream(odd, to_stream(s.clone())).collect().unwrap(), remove(odd, &s));
    }

    #[test]
    fn pmap_matches_map(s in prop::collection::vec(any::<i32>(), 0..40)) {
        let f = |x: &i32| x.wrapping_mul(7);
        prop_assert_eq!(pmap(f, &s), map(f, &s));
        // Crosses the executor's fan-out limit of 8 for most inputs.
        prop_assert_eq!(small_executor().pmap(f, &s), map(f, &s));
    }
}

#[test]
fn documented_examples() {
    let t: Vec<i32> = (1..=10).collect();
    assert_eq!(take(3, &t), vec![1, 2, 3]);
    assert_eq!(seqflow::drop(3, &t), vec![4, 5, 6, 7, 8, 9, 10]);
    assert_eq!(foldl(|acc, &x| acc - x, 0, &[1, 2, 3, 4, 5]), -15);
    assert_eq!(foldr(|&x, acc| x - acc, 0, &[1, 2, 3, 4, 5]), 3);

    let mut evens = filter_stream(|x| x % 2 == 0, to_stream(t));
    assert_eq!(from_stream(&mut evens).unwrap(), vec![2, 4, 6, 8, 10]);
    assert!(from_stream(&mut evens).unwrap().is_empty());
}
