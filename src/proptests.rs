use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Put(String, i32),
    Remove(String),
    Get(String),
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // a small alphabet keeps collisions and repeated keys frequent
    "[a-e]{0,4}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
        25 => key.clone().prop_map(Op::Remove),
        25 => key.prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=500)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_table_matches_btreemap(
        ops in ops_strategy(),
        capacity in 1usize..16,
        weighted in any::<bool>(),
    ) {
        let hash = if weighted { HashFunction::PositionWeighted } else { HashFunction::Sum };
        let mut t: ChainedHashMap<i32> = ChainedHashMap::with_hasher(capacity, hash).unwrap();
        let mut m: BTreeMap<String, i32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Put(key, value) => {
                    let old_t = t.put(key.clone(), value);
                    let old_m = m.insert(key, value);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Remove(key) => {
                    prop_assert_eq!(t.remove(&key), m.remove(&key));
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.get(&key), m.get(&key));
                    prop_assert_eq!(t.contains_key(&key), m.contains_key(&key));
                }
            }
            prop_assert_eq!(t.len(), m.len());
            prop_assert!(t.load_factor() <= 1.0);
        }

        prop_assert!(t.check_invariants().is_ok());
        let mut got: Vec<(String, i32)> = t.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        got.sort();
        let expected: Vec<(String, i32)> = m.into_iter().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_distance_is_a_metric(a in "[a-c]{0,8}", b in "[a-c]{0,8}") {
        let d = distance(&a, &b);
        prop_assert_eq!(d, distance(&b, &a));
        prop_assert!(d <= a.len().max(b.len()));
        prop_assert!(d >= a.len().abs_diff(b.len()));
        prop_assert_eq!(d == 0, a == b);
    }

    #[test]
    fn prop_top_k_keeps_smallest_scores(scores in prop::collection::vec(0usize..20, 0..100)) {
        let mut top: TopK<usize> = TopK::new();
        for (i, score) in scores.iter().enumerate() {
            top.offer(i, *score);
        }
        let kept: Vec<usize> = top.iter().map(|(_, score)| score).collect();
        let mut sorted = scores.clone();
        sorted.sort();
        sorted.truncate(5);
        prop_assert_eq!(kept, sorted);
    }

    #[test]
    fn prop_suggestions_are_closest_words(
        dictionary in prop::collection::vec("[a-d]{1,5}", 0..40),
        query in "[a-d]{1,5}",
    ) {
        let mut checker = SpellChecker::from_words(&dictionary, Config::default()).unwrap();
        let outcome = checker.check(&query);
        if dictionary.contains(&query) {
            prop_assert!(outcome.is_correct());
        } else {
            let mut all: Vec<usize> = checker.dictionary().keys().map(|w| distance(w, &query)).collect();
            all.sort();
            all.truncate(5);
            let got: Vec<usize> = outcome.suggestions().iter().map(|s| s.distance).collect();
            prop_assert_eq!(got, all);
        }
    }
}
