use super::labels::split_labels;
use super::tree::{LabelTree, TreeError};

use proptest::prelude::*;
use std::collections::HashMap;

fn label_strategy() -> impl Strategy<Value = String> + Clone {
    // A tiny alphabet so generated hosts share suffixes and collide often.
    "[a-c]{1,2}"
}

fn host_strategy() -> impl Strategy<Value = String> + Clone {
    prop::collection::vec(label_strategy(), 1..=4).prop_map(|labels| labels.join("."))
}

/// Whether `host` names a node created by inserting `inserted`.
fn is_label_suffix(host: &str, inserted: &str) -> bool {
    inserted == host || inserted.ends_with(&format!(".{host}"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_round_trip(host in host_strategy(), context in any::<u32>()) {
        let mut tree = LabelTree::new();
        tree.add(&host, context).unwrap();
        prop_assert_eq!(tree.get(&host), Ok(Some(&context)));
    }

    #[test]
    fn prop_exact_hosts_match_model(
        inserts in prop::collection::vec((host_strategy(), any::<u32>()), 0..=32),
        queries in prop::collection::vec(host_strategy(), 0..=32),
    ) {
        let mut tree = LabelTree::new();
        let mut stored: HashMap<String, u32> = HashMap::new();

        for (host, context) in inserts {
            let occupied = stored.keys().any(|inserted| is_label_suffix(&host, inserted));
            let result = tree.add(&host, context);
            if occupied {
                prop_assert_eq!(result, Err(TreeError::AlreadyExists));
            } else {
                prop_assert_eq!(result, Ok(()));
                stored.insert(host, context);
            }
        }

        for host in stored.keys().cloned().chain(queries) {
            let expected = match stored.get(&host) {
                Some(context) => Ok(Some(context)),
                None if stored.keys().any(|inserted| is_label_suffix(&host, inserted)) => Ok(None),
                None => Err(TreeError::NotFound),
            };
            prop_assert_eq!(tree.get(&host), expected);
        }
    }

    #[test]
    fn prop_catch_all_matches_everything(host in host_strategy(), context in any::<u32>()) {
        let mut tree = LabelTree::new();
        tree.add("*", context).unwrap();
        prop_assert_eq!(tree.get(&host), Ok(Some(&context)));
    }

    #[test]
    fn prop_invalid_paths_are_rejected_without_mutation(
        labels in prop::collection::vec(prop_oneof![label_strategy(), Just(String::new())], 1..=4),
    ) {
        let path = labels.join(".");
        prop_assume!(split_labels(&path).is_err());

        let mut tree = LabelTree::new();
        prop_assert!(matches!(tree.add(&path, 1u32), Err(TreeError::InvalidArgument(_))));
        prop_assert!(matches!(tree.get(&path), Err(TreeError::InvalidArgument(_))));

        for label in labels.iter().filter(|label| !label.is_empty()) {
            prop_assert_eq!(tree.get(label), Err(TreeError::NotFound));
        }
    }
}
