//! Grouping support for [`Query::group_by`](crate::Query::group_by) and
//! [`Query::to_group`](crate::Query::to_group).

use std::collections::HashMap;
use std::hash::Hash;

/// A group key and its payload.
///
/// `group_by` produces `Group<K, Vec<T>>`; `to_group` lets the caller
/// shape `group` with a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Group<K, G> {
    pub key: K,
    pub group: G,
}

impl<K, G> Group<K, G> {
    pub fn new(key: K, group: G) -> Self {
        Group { key, group }
    }
}

/// Splits items into `(key, items)` buckets in first-seen-key order.
///
/// Items keep their relative order inside each bucket.
pub(crate) fn partition<T, K, F>(items: impl IntoIterator<Item = T>, key_selector: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut buckets: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let key = key_selector(&item);
        match slots.get(&key) {
            Some(&slot) => buckets[slot].1.push(item),
            None => {
                slots.insert(key.clone(), buckets.len());
                buckets.push((key, vec![item]));
            }
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_follow_first_seen_order() {
        let words = ["pear", "fig", "plum", "kiwi", "apple", "date"];
        let buckets = partition(words, |w| w.len());

        let keys: Vec<usize> = buckets.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, [4, 3, 5]);
        assert_eq!(buckets[0].1, ["pear", "plum", "kiwi", "date"]);
        assert_eq!(buckets[1].1, ["fig"]);
        assert_eq!(buckets[2].1, ["apple"]);
    }

    #[test]
    fn empty_input_has_no_buckets() {
        let buckets = partition(Vec::<i32>::new(), |n| *n % 2);
        assert!(buckets.is_empty());
    }

    #[test]
    fn group_new() {
        let group = Group::new("k", vec![1, 2]);
        assert_eq!(group.key, "k");
        assert_eq!(group.group, [1, 2]);
    }
}
