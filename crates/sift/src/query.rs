//! The query engine.
//!
//! [`Query`] wraps an ordered sequence of items. Every operator computes
//! its result immediately and returns a fresh engine (or a scalar), so a
//! query can be branched into several chains without copying it first.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::aggregate::{extreme_by_field, extreme_by_key, sum_field};
use crate::criteria::Criteria;
use crate::error::{QueryError, Result};
use crate::group::{partition, Group};
use crate::ordering::{compare_by_orderings, Dir, OrderBy};
use crate::record::Record;
use crate::row::Row;

/// A chainable, eagerly evaluated query over an in-memory sequence.
///
/// # Example
///
/// ```
/// use sift::{Dir, Query, Record};
///
/// #[derive(Debug, Clone, Record)]
/// struct Employee {
///     name: String,
///     dept: String,
///     age: u32,
/// }
///
/// let staff = Query::from(vec![
///     Employee { name: "Ada".into(), dept: "Eng".into(), age: 36 },
///     Employee { name: "Grace".into(), dept: "Eng".into(), age: 45 },
///     Employee { name: "Linus".into(), dept: "Ops".into(), age: 28 },
/// ]);
///
/// let senior = staff
///     .filter(|e| e.age >= 30)
///     .order_by("age", Dir::Desc)
///     .select(&["name"])?;
///
/// let names: Vec<_> = senior.iter().filter_map(|r| r.field("name").as_str()).collect();
/// assert_eq!(names, ["Grace", "Ada"]);
///
/// // The source query is untouched and can start another chain.
/// assert_eq!(staff.group_by(|e| e.dept.clone()).count(), 2);
/// # Ok::<(), sift::QueryError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query<T> {
    items: Vec<T>,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Query { items: Vec::new() }
    }
}

impl<T> Query<T> {
    /// Creates an empty query.
    pub fn new() -> Self {
        Query::default()
    }

    /// Creates a query over an initial sequence.
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        Query {
            items: items.into_iter().collect(),
        }
    }

    /// Replaces the wrapped sequence in place and returns the same query.
    ///
    /// This is the only operator that mutates a query.
    ///
    /// ```
    /// use sift::Query;
    ///
    /// let mut query = Query::from(vec![1, 2, 3]);
    /// assert_eq!(query.source(vec![9]).count(), 1);
    /// assert_eq!(query.to_vec(), [9]);
    /// ```
    pub fn source(&mut self, items: impl IntoIterator<Item = T>) -> &mut Self {
        self.items = items.into_iter().collect();
        trace!(op = "source", len = self.items.len());
        self
    }

    fn derive<U>(&self, op: &'static str, items: Vec<U>) -> Query<U> {
        trace!(op, input = self.items.len(), output = items.len());
        Query { items }
    }

    // ========================================================================
    // Filtering and projection
    // ========================================================================

    /// Keeps the items for which `predicate` returns `true`.
    pub fn filter<P>(&self, predicate: P) -> Query<T>
    where
        T: Clone,
        P: Fn(&T) -> bool,
    {
        let kept = self
            .items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect();
        self.derive("filter", kept)
    }

    /// Keeps the items matching `criteria`.
    pub fn matching(&self, criteria: &Criteria) -> Query<T>
    where
        T: Record + Clone,
    {
        self.filter(|item| criteria.matches(item))
    }

    /// Projects every item onto the named fields.
    ///
    /// Each [`Row`] holds the fields in the order given by `keys`.
    /// Returns [`QueryError::UnknownField`] if any item lacks one of them.
    pub fn select(&self, keys: &[&str]) -> Result<Query<Row>>
    where
        T: Record,
    {
        let missing = self
            .items
            .iter()
            .find_map(|item| keys.iter().find(|key| !item.has_field(key)));
        if let Some(missing) = missing {
            debug!(field = *missing, "select on unknown field");
            return Err(QueryError::UnknownField {
                field: missing.to_string(),
            });
        }

        let rows = self
            .items
            .iter()
            .map(|item| Row::project(item, keys))
            .collect();
        Ok(self.derive("select", rows))
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Sorts by the natural ordering of a field.
    ///
    /// `Dir::Desc` reverses each comparison. Missing values sort after
    /// present ones (before them when descending), NaN after every other
    /// number, and mismatched kinds order by kind as in
    /// [`sort_compare`](crate::sort_compare). The sort is stable.
    pub fn order_by(&self, key: &str, dir: Dir) -> Query<T>
    where
        T: Record + Clone,
    {
        self.order_by_all(&[OrderBy::new(key, dir)])
    }

    pub fn order_asc(&self, key: &str) -> Query<T>
    where
        T: Record + Clone,
    {
        self.order_by(key, Dir::Asc)
    }

    pub fn order_desc(&self, key: &str) -> Query<T>
    where
        T: Record + Clone,
    {
        self.order_by(key, Dir::Desc)
    }

    /// Sorts by several fields; later orderings break ties of earlier ones.
    pub fn order_by_all(&self, orderings: &[OrderBy]) -> Query<T>
    where
        T: Record + Clone,
    {
        let mut sorted = self.items.clone();
        sorted.sort_by(|a, b| compare_by_orderings(a, b, orderings));
        self.derive("order_by", sorted)
    }

    /// Sorts by a closure-computed key.
    ///
    /// The sort is stable, so items with equal keys keep their input order
    /// in both directions.
    pub fn order_by_key<K, F>(&self, key: F, dir: Dir) -> Query<T>
    where
        T: Clone,
        K: Ord,
        F: Fn(&T) -> K,
    {
        let mut sorted = self.items.clone();
        sorted.sort_by(|a, b| dir.apply(key(a).cmp(&key(b))));
        self.derive("order_by_key", sorted)
    }

    // ========================================================================
    // Limits
    // ========================================================================

    /// Drops the first `count` items.
    pub fn skip(&self, count: usize) -> Query<T>
    where
        T: Clone,
    {
        let rest = self.items.iter().skip(count).cloned().collect();
        self.derive("skip", rest)
    }

    /// Keeps at most the first `count` items.
    pub fn take(&self, count: usize) -> Query<T>
    where
        T: Clone,
    {
        let head = self.items.iter().take(count).cloned().collect();
        self.derive("take", head)
    }

    /// Returns page `page_index` (zero-based) of `page_size` items.
    ///
    /// Same as `skip(page_index * page_size).take(page_size)`.
    pub fn page(&self, page_index: usize, page_size: usize) -> Query<T>
    where
        T: Clone,
    {
        let page = self
            .items
            .iter()
            .skip(page_index.saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect();
        self.derive("page", page)
    }

    // ========================================================================
    // Grouping and joining
    // ========================================================================

    /// Partitions items by key.
    ///
    /// Groups come out in the order their key was first seen; items keep
    /// their order inside a group. Keys are compared with `Eq`, so
    /// callers wanting structural matching normalise the key first.
    ///
    /// ```
    /// use sift::Query;
    ///
    /// let words = Query::from(vec!["ant", "bee", "asp", "cat", "bat"]);
    /// let groups = words.group_by(|w| w.chars().next());
    ///
    /// let keys: Vec<_> = groups.iter().map(|g| g.key).collect();
    /// assert_eq!(keys, [Some('a'), Some('b'), Some('c')]);
    /// assert_eq!(groups.first().unwrap().group, ["ant", "asp"]);
    /// ```
    pub fn group_by<K, F>(&self, key_selector: F) -> Query<Group<K, Vec<T>>>
    where
        T: Clone,
        K: Eq + Hash + Clone,
        F: Fn(&T) -> K,
    {
        let groups = partition(self.items.iter().cloned(), key_selector)
            .into_iter()
            .map(|(key, group)| Group { key, group })
            .collect();
        self.derive("group_by", groups)
    }

    /// Partitions items by key and shapes each group with `group_selector`.
    ///
    /// Emits `Group { key, group: group_selector(&key, items) }` per key,
    /// in first-seen-key order.
    ///
    /// ```
    /// use sift::Query;
    ///
    /// let sales = Query::from(vec![("north", 3), ("south", 5), ("north", 4)]);
    /// let totals = sales.to_group(|s| s.0, |_, items| items.iter().map(|s| s.1).sum::<i32>());
    ///
    /// let pairs: Vec<_> = totals.iter().map(|g| (g.key, g.group)).collect();
    /// assert_eq!(pairs, [("north", 7), ("south", 5)]);
    /// ```
    pub fn to_group<K, G, F, S>(&self, key_selector: F, group_selector: S) -> Query<Group<K, G>>
    where
        T: Clone,
        K: Eq + Hash + Clone,
        F: Fn(&T) -> K,
        S: Fn(&K, Vec<T>) -> G,
    {
        let groups = partition(self.items.iter().cloned(), key_selector)
            .into_iter()
            .map(|(key, items)| {
                let group = group_selector(&key, items);
                Group { key, group }
            })
            .collect();
        self.derive("to_group", groups)
    }

    /// Joins this query with `other` on equal keys (inner equi-join).
    ///
    /// `other` can be anything iterable, including another [`Query`]
    /// (by value or by reference). When several right-hand items share a
    /// key the last one wins, so each left item matches at most once.
    /// Left items without a match are dropped; output follows left order.
    ///
    /// ```
    /// use sift::Query;
    ///
    /// let people = Query::from(vec![(1, "Ada", 10), (2, "Linus", 20), (3, "Grace", 99)]);
    /// let depts = Query::from(vec![(10, "Eng"), (20, "Ops")]);
    ///
    /// let joined = people.join(&depts, |p| p.2, |d| d.0, |p, d| format!("{}@{}", p.1, d.1));
    /// assert_eq!(joined.to_vec(), ["Ada@Eng", "Linus@Ops"]);
    /// ```
    pub fn join<U, K, R, I, LK, RK, S>(
        &self,
        other: I,
        key_selector: LK,
        other_key_selector: RK,
        result_selector: S,
    ) -> Query<R>
    where
        I: IntoIterator<Item = U>,
        K: Eq + Hash,
        LK: Fn(&T) -> K,
        RK: Fn(&U) -> K,
        S: Fn(&T, &U) -> R,
    {
        let lookup: HashMap<K, U> = other
            .into_iter()
            .map(|right| (other_key_selector(&right), right))
            .collect();

        let joined = self
            .items
            .iter()
            .filter_map(|left| {
                lookup
                    .get(&key_selector(left))
                    .map(|right| result_selector(left, right))
            })
            .collect();
        self.derive("join", joined)
    }

    // ========================================================================
    // Aggregates
    // ========================================================================

    /// Number of items.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the query holds at least one item.
    pub fn any(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns `true` if every item satisfies the predicate.
    ///
    /// Vacuously `true` for an empty query.
    pub fn all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().all(predicate)
    }

    /// Sum of a numeric field; `0.0` for an empty query.
    ///
    /// Returns [`QueryError::NonNumeric`] when an item's field is not a
    /// number (including a missing field).
    pub fn sum(&self, key: &str) -> Result<f64>
    where
        T: Record,
    {
        sum_field(&self.items, key)
    }

    /// Mean of a numeric field; `0.0` for an empty query.
    pub fn avg(&self, key: &str) -> Result<f64>
    where
        T: Record,
    {
        if self.items.is_empty() {
            return Ok(0.0);
        }
        Ok(self.sum(key)? / self.items.len() as f64)
    }

    /// Item holding the greatest value of `key`.
    ///
    /// Returns the whole item, or `None` for an empty query. Ties keep the
    /// earliest item, and values that do not compare (missing, NaN, other
    /// kinds) never displace the current candidate.
    pub fn max(&self, key: &str) -> Option<&T>
    where
        T: Record,
    {
        extreme_by_field(&self.items, key, Ordering::Greater)
    }

    /// Item holding the smallest value of `key`. See [`Query::max`].
    pub fn min(&self, key: &str) -> Option<&T>
    where
        T: Record,
    {
        extreme_by_field(&self.items, key, Ordering::Less)
    }

    /// Item with the greatest key. Ties keep the earliest item.
    pub fn max_by_key<K, F>(&self, key: F) -> Option<&T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        extreme_by_key(&self.items, key, Ordering::Greater)
    }

    /// Item with the smallest key. Ties keep the earliest item.
    pub fn min_by_key<K, F>(&self, key: F) -> Option<&T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        extreme_by_key(&self.items, key, Ordering::Less)
    }

    // ========================================================================
    // Element access
    // ========================================================================

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// First item satisfying the predicate.
    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }

    /// Index of the first item satisfying the predicate.
    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().position(predicate)
    }

    // ========================================================================
    // Materialization
    // ========================================================================

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Copies the sequence out of the query.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    /// Unwraps the query into its sequence.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> From<Vec<T>> for Query<T> {
    fn from(items: Vec<T>) -> Self {
        Query { items }
    }
}

impl<T> FromIterator<T> for Query<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Query::from_items(iter)
    }
}

impl<T> IntoIterator for Query<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Query<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
