//! Property-based tests for sift using proptest.

#![cfg(feature = "derive")]

use proptest::prelude::*;
use sift::{Dir, Query, Record};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Record)]
struct Item {
    id: usize,
    value: i64,
    tag: String,
}

// Strategy to generate items with unique ids and a small tag alphabet so
// that groups and ties actually occur.
fn items_strategy(max: usize) -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec((-1000i64..1000, "[a-d]"), 0..max).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(id, (value, tag))| Item { id, value, tag })
            .collect()
    })
}

fn ids(items: &[Item]) -> Vec<usize> {
    items.iter().map(|i| i.id).collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// filter returns an order-preserving subsequence whose items all pass.
    #[test]
    fn filter_is_ordered_subset(
        items in items_strategy(60),
        threshold in -1000i64..1000,
    ) {
        let query = Query::from(items.clone());
        let kept = query.filter(|i| i.value > threshold).into_vec();

        prop_assert!(kept.iter().all(|i| i.value > threshold));
        prop_assert!(kept.len() <= query.count());

        // ids are increasing in the source, so a subsequence keeps them increasing
        let kept_ids = ids(&kept);
        prop_assert!(kept_ids.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(
            kept.len(),
            items.iter().filter(|i| i.value > threshold).count()
        );
    }

    /// page(p, s) is skip(p * s).take(s).
    #[test]
    fn page_matches_skip_take(
        items in items_strategy(60),
        page_index in 0usize..15,
        page_size in 0usize..15,
    ) {
        let query = Query::from(items);
        let paged = query.page(page_index, page_size);
        let sliced = query.skip(page_index * page_size).take(page_size);

        prop_assert_eq!(paged, sliced);
    }

    /// skip and take never panic and respect bounds.
    #[test]
    fn skip_take_bounds(
        items in items_strategy(40),
        count in 0usize..100,
    ) {
        let query = Query::from(items);
        prop_assert_eq!(query.skip(count).count(), query.count().saturating_sub(count));
        prop_assert_eq!(query.take(count).count(), query.count().min(count));
    }

    /// avg is sum / count, and 0 when empty.
    #[test]
    fn avg_is_sum_over_count(items in items_strategy(40)) {
        let query = Query::from(items);
        let sum = query.sum(Item::VALUE).unwrap();
        let avg = query.avg(Item::VALUE).unwrap();

        if query.is_empty() {
            prop_assert_eq!(avg, 0.0);
        } else {
            prop_assert!((avg - sum / query.count() as f64).abs() < 1e-9);
        }
    }

    /// group_by partitions the input exactly, in first-seen key order.
    #[test]
    fn group_by_partitions(items in items_strategy(60)) {
        let groups = Query::from(items.clone()).group_by(|i| i.tag.clone());

        let mut first_seen: Vec<String> = Vec::new();
        for item in &items {
            if !first_seen.contains(&item.tag) {
                first_seen.push(item.tag.clone());
            }
        }
        let keys: Vec<String> = groups.iter().map(|g| g.key.clone()).collect();
        prop_assert_eq!(keys, first_seen);

        let mut total = 0;
        for group in &groups {
            prop_assert!(group.group.iter().all(|i| i.tag == group.key));
            let group_ids = ids(&group.group);
            prop_assert!(group_ids.windows(2).all(|w| w[0] < w[1]));
            total += group.group.len();
        }
        prop_assert_eq!(total, items.len());
    }

    /// Descending order is non-increasing; ties keep input order.
    #[test]
    fn order_by_desc_is_sorted_and_stable(items in items_strategy(60)) {
        let sorted = Query::from(items).order_by(Item::VALUE, Dir::Desc).into_vec();

        for pair in sorted.windows(2) {
            prop_assert!(pair[0].value >= pair[1].value);
            if pair[0].value == pair[1].value {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    /// Float fields holding NaN sort without panicking; NaN goes last.
    #[test]
    fn order_by_float_with_nan_is_total(
        raw in prop::collection::vec(prop_oneof![
            3 => (-1.0e6f64..1.0e6).boxed(),
            1 => Just(f64::NAN).boxed(),
        ], 0..300),
    ) {
        let rows: Query<sift::Row> = raw.iter().map(|v| sift::Row::new().with("v", *v)).collect();
        let sorted: Vec<f64> = rows
            .order_by("v", Dir::Asc)
            .iter()
            .filter_map(|r| r.field("v").as_number().map(|n| n.to_f64()))
            .collect();

        let nan_count = raw.iter().filter(|v| v.is_nan()).count();
        let (numbers, nans) = sorted.split_at(sorted.len() - nan_count);
        prop_assert!(numbers.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(nans.iter().all(|v| v.is_nan()));
    }

    /// max/min agree with the iterator extremes on the field value.
    #[test]
    fn max_min_hold_extreme_values(items in items_strategy(40)) {
        let query = Query::from(items.clone());
        let max = query.max(Item::VALUE).map(|i| i.value);
        let min = query.min(Item::VALUE).map(|i| i.value);

        prop_assert_eq!(max, items.iter().map(|i| i.value).max());
        prop_assert_eq!(min, items.iter().map(|i| i.value).min());
    }

    /// join emits one row per left item whose key exists on the right.
    #[test]
    fn join_is_inner(
        left in items_strategy(40),
        right_tags in prop::collection::vec("[a-f]", 0..6),
    ) {
        let query = Query::from(left.clone());
        let joined = query.join(
            right_tags.clone(),
            |i| i.tag.clone(),
            |t| t.clone(),
            |i, _| i.id,
        );

        let expected: Vec<usize> = left
            .iter()
            .filter(|i| right_tags.contains(&i.tag))
            .map(|i| i.id)
            .collect();
        prop_assert_eq!(joined.into_vec(), expected);
    }

    /// any() is count() > 0 and all() agrees with the iterator.
    #[test]
    fn any_and_all_consistent(
        items in items_strategy(40),
        threshold in -1000i64..1000,
    ) {
        let query = Query::from(items.clone());
        prop_assert_eq!(query.any(), !items.is_empty());
        prop_assert_eq!(
            query.all(|i| i.value < threshold),
            items.iter().all(|i| i.value < threshold)
        );
    }
}
