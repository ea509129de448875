//! Field-based aggregate helpers shared by the numeric and extreme
//! operators on [`Query`](crate::Query).

use std::cmp::Ordering;

use tracing::debug;

use crate::error::{QueryError, Result};
use crate::ordering::compare_values;
use crate::record::Record;
use crate::value::Value;

/// Sums a numeric field over `items`.
///
/// Any value that is not a [`Value::Number`] is an error; NaN already
/// stored in a float field propagates.
pub(crate) fn sum_field<'a, R, I>(items: I, field: &str) -> Result<f64>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut total = 0.0;
    for item in items {
        match item.field(field) {
            Value::Number(n) => total += n.to_f64(),
            other => {
                debug!(field, found = other.kind(), "non-numeric value in numeric aggregate");
                return Err(QueryError::NonNumeric {
                    field: field.to_string(),
                    found: other.kind(),
                });
            }
        }
    }
    Ok(total)
}

/// Strict comparison used by `max`/`min`: missing values never compare.
fn strict_compare(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    if a.is_none() || b.is_none() {
        return None;
    }
    compare_values(a, b)
}

/// Picks the item whose field compares strictly `wanted` against every
/// earlier candidate. The first item holding a value seeds the scan, so
/// ties and incomparable values keep the earliest candidate. When no item
/// holds the field the first item is returned.
pub(crate) fn extreme_by_field<'a, R: Record>(
    items: &'a [R],
    field: &str,
    wanted: Ordering,
) -> Option<&'a R> {
    let seed = items
        .iter()
        .position(|item| !item.field(field).is_none())
        .unwrap_or(0);
    let mut best = items.get(seed)?;
    for item in &items[seed + 1..] {
        if strict_compare(&item.field(field), &best.field(field)) == Some(wanted) {
            best = item;
        }
    }
    Some(best)
}

/// Closure-keyed variant of [`extreme_by_field`].
pub(crate) fn extreme_by_key<'a, T, K, F>(items: &'a [T], key: F, wanted: Ordering) -> Option<&'a T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let (first, rest) = items.split_first()?;
    let mut best = first;
    let mut best_key = key(first);
    for item in rest {
        let item_key = key(item);
        if item_key.partial_cmp(&best_key) == Some(wanted) {
            best = item;
            best_key = item_key;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Row;
    use crate::value::OwnedValue;

    fn ages(values: &[i64]) -> Vec<Row> {
        values.iter().map(|a| Row::new().with("age", *a)).collect()
    }

    #[test]
    fn sum_of_numbers() {
        let rows = ages(&[30, 25, 35]);
        assert_eq!(sum_field(&rows, "age").unwrap(), 90.0);
        assert_eq!(sum_field(&Vec::<Row>::new(), "age").unwrap(), 0.0);
    }

    #[test]
    fn sum_rejects_non_numbers() {
        let rows = vec![Row::new().with("age", 3i64), Row::new().with("age", "four")];
        let err = sum_field(&rows, "age").unwrap_err();
        assert!(matches!(
            err,
            QueryError::NonNumeric { ref field, found: "string" } if field == "age"
        ));

        let missing = vec![Row::new().with("name", "x")];
        assert!(sum_field(&missing, "age").is_err());
    }

    #[test]
    fn extremes_return_whole_items() {
        let rows = ages(&[30, 25, 35]);

        let max = extreme_by_field(&rows, "age", Ordering::Greater).unwrap();
        let min = extreme_by_field(&rows, "age", Ordering::Less).unwrap();

        assert_eq!(max.get("age"), Some(&OwnedValue::from(35i64)));
        assert_eq!(min.get("age"), Some(&OwnedValue::from(25i64)));
        assert!(extreme_by_field(&Vec::<Row>::new(), "age", Ordering::Greater).is_none());
    }

    #[test]
    fn ties_keep_first_candidate() {
        let rows = vec![
            Row::new().with("id", 1i64).with("age", 40i64),
            Row::new().with("id", 2i64).with("age", 40i64),
        ];
        let max = extreme_by_field(&rows, "age", Ordering::Greater).unwrap();
        assert_eq!(max.get("id"), Some(&OwnedValue::from(1i64)));
    }

    #[test]
    fn missing_values_are_skipped() {
        let rows = vec![
            Row::new().with("age", 20i64),
            Row::new().with("name", "no age"),
            Row::new().with("age", 50i64),
        ];
        let max = extreme_by_field(&rows, "age", Ordering::Greater).unwrap();
        assert_eq!(max.get("age"), Some(&OwnedValue::from(50i64)));
    }

    #[test]
    fn leading_missing_value_does_not_win() {
        let rows = vec![
            Row::new().with("name", "no age"),
            Row::new().with("age", 20i64),
            Row::new().with("age", 10i64),
        ];
        let min = extreme_by_field(&rows, "age", Ordering::Less).unwrap();
        assert_eq!(min.get("age"), Some(&OwnedValue::from(10i64)));
    }

    #[test]
    fn extreme_by_closure_key() {
        let words = ["kiwi", "banana", "fig", "cherry"];
        assert_eq!(
            extreme_by_key(&words, |w| w.len(), Ordering::Greater),
            Some(&"banana")
        );
        assert_eq!(
            extreme_by_key(&words, |w| w.len(), Ordering::Less),
            Some(&"fig")
        );
    }
}
