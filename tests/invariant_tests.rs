use std::collections::BTreeMap;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use snapstore::SnapMap;

#[derive(Clone, Debug)]
enum Op {
    Set(String, i32),
    Remove(String),
    Clear,
}

// A narrow key alphabet so collisions actually happen
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        ("[a-e]{1,2}", any::<i32>()).prop_map(|(key, value)| Op::Set(key, value)),
        "[a-e]{1,2}".prop_map(Op::Remove),
        Just(Op::Clear),
    ]
}

fn assert_sorted_unique(map: &SnapMap<String, i32>) -> Result<(), TestCaseError> {
    let view = map.view();
    for window in view.windows(2) {
        prop_assert!(
            window[0].0 < window[1].0,
            "pair list not strictly ascending: {:?} then {:?}",
            window[0],
            window[1]
        );
    }
    Ok(())
}

proptest! {
    #[test]
    fn batch_construction_is_sorted_unique_last_wins(
        pairs in prop::collection::vec(("[a-e]{1,2}", any::<i32>()), 0..64)
    ) {
        let map = SnapMap::from_pairs(pairs.clone());
        assert_sorted_unique(&map)?;

        // Last-write-wins is exactly what replaying the batch through a
        // plain map in batch order produces
        let mut model = BTreeMap::new();
        for (key, value) in pairs {
            model.insert(key, value);
        }
        let expected: Vec<(String, i32)> = model.into_iter().collect();
        prop_assert_eq!(map.view().as_ref().clone(), expected);
    }

    #[test]
    fn mutations_preserve_sortedness_and_match_model(
        ops in prop::collection::vec(op_strategy(), 0..64)
    ) {
        let map: SnapMap<String, i32> = SnapMap::new();
        let mut model: BTreeMap<String, i32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Set(key, value) => {
                    map.set(key.clone(), value);
                    model.insert(key, value);
                }
                Op::Remove(key) => {
                    map.remove(key.as_str());
                    model.remove(&key);
                }
                Op::Clear => {
                    map.clear();
                    model.clear();
                }
            }

            // Invariant holds after every single mutation
            assert_sorted_unique(&map)?;
        }

        let expected: Vec<(String, i32)> = model.into_iter().collect();
        prop_assert_eq!(map.view().as_ref().clone(), expected);
    }

    #[test]
    fn lookups_agree_with_model(
        pairs in prop::collection::vec(("[a-e]{1,2}", any::<i32>()), 0..32),
        probes in prop::collection::vec("[a-e]{1,2}", 0..16)
    ) {
        let map = SnapMap::from_pairs(pairs.clone());
        let mut model = BTreeMap::new();
        for (key, value) in pairs {
            model.insert(key, value);
        }

        for probe in probes {
            prop_assert_eq!(map.get_checked(probe.as_str()), model.get(&probe).copied());
            prop_assert_eq!(map.contains_key(probe.as_str()), model.contains_key(&probe));
        }

        prop_assert_eq!(map.keys(), model.keys().cloned().collect::<Vec<_>>());
    }
}
