//! Sort direction and field ordering.

use std::cmp::Ordering;

use crate::record::Record;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl Dir {
    /// Maps a `descending` flag to a direction.
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            Dir::Desc
        } else {
            Dir::Asc
        }
    }

    /// Applies this direction to a comparison outcome.
    ///
    /// `Desc` flips the outcome of each comparison; it does not reverse an
    /// already sorted sequence.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field and the direction to sort it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub dir: Dir,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Orders two values in this ordering's direction, using the total
    /// order of [`sort_compare`].
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        self.dir.apply(sort_compare(a, b))
    }
}

/// Natural ordering of two field values.
///
/// Values of the same kind compare naturally, numbers across
/// representations. `None` sorts after every present value. Returns
/// `None` for a type mismatch or a NaN.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Enum(a), Value::Enum(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),

        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Greater),
        (_, Value::None) => Some(Ordering::Less),

        _ => None,
    }
}

/// Total order over field values, used for sorting.
///
/// Agrees with [`compare_values`] wherever that returns an ordering.
/// NaN sorts after every other number. Values of different kinds order
/// by kind: string, number, timestamp, enum, bool, then missing.
pub fn sort_compare(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a.total_cmp(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::Enum(a), Value::Enum(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::String(_) => 0,
        Value::Number(_) => 1,
        Value::Timestamp(_) => 2,
        Value::Enum(_) => 3,
        Value::Bool(_) => 4,
        Value::None => 5,
    }
}

/// Compares two records over a list of orderings.
///
/// The first ordering decides; later ones only break ties.
pub fn compare_by_orderings<R: Record + ?Sized>(a: &R, b: &R, orderings: &[OrderBy]) -> Ordering {
    for order_by in orderings {
        let ordering = order_by.compare(&a.field(&order_by.field), &b.field(&order_by.field));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
