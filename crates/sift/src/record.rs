//! The [`Record`] trait: named-field access for query items.
//!
//! Operators that take field names (`select`, `order_by`, `sum`, `max`,
//! criteria clauses, ...) read fields through this trait. It is usually
//! derived with `#[derive(Record)]`, but can be written by hand.

use crate::value::{Timestamp, Value};

/// An item whose fields can be read by name.
///
/// # Derive Usage
///
/// ```
/// use sift::{Query, Record};
///
/// #[derive(Clone, Record)]
/// struct Employee {
///     name: String,
///     age: u32,
///     #[record(skip)]
///     badge: Vec<u8>,
/// }
///
/// let staff = Query::from(vec![
///     Employee { name: "Ada".into(), age: 36, badge: vec![] },
///     Employee { name: "Linus".into(), age: 28, badge: vec![] },
/// ]);
///
/// let oldest = staff.max(Employee::AGE).unwrap();
/// assert_eq!(oldest.name, "Ada");
/// ```
///
/// # Manual Implementation
///
/// ```
/// use sift::{Number, Record, Value};
///
/// struct Employee {
///     name: String,
///     age: u32,
/// }
///
/// impl Record for Employee {
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "name" => Value::String(&self.name),
///             "age" => Value::Number(Number::from(self.age)),
///             _ => Value::None,
///         }
///     }
///
///     fn has_field(&self, name: &str) -> bool {
///         matches!(name, "name" | "age")
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a field, or [`Value::None`] if the field is
    /// unknown or null.
    fn field(&self, name: &str) -> Value<'_>;

    /// Returns `true` if the record type has a field with this name.
    ///
    /// The default treats a `None` value as a missing field. Records with
    /// nullable fields should override it so that `select` accepts them.
    fn has_field(&self, name: &str) -> bool {
        !self.field(name).is_none()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Value<'_> {
        (**self).field(name)
    }

    fn has_field(&self, name: &str) -> bool {
        (**self).has_field(name)
    }
}

/// Maps an enum type to a stable `u32` discriminant.
///
/// Needed for fields marked `#[record(Enum)]`.
///
/// ```
/// use sift::AsDiscriminant;
///
/// #[derive(Clone, Copy)]
/// enum Level {
///     Junior,
///     Senior,
/// }
///
/// impl AsDiscriminant for Level {
///     fn discriminant(&self) -> u32 {
///         match self {
///             Level::Junior => 0,
///             Level::Senior => 1,
///         }
///     }
/// }
/// ```
pub trait AsDiscriminant {
    /// Use explicit values rather than declaration order so that stored
    /// criteria keep their meaning when variants are added.
    fn discriminant(&self) -> u32;
}

/// Converts a datetime type into a [`Timestamp`].
///
/// Needed for fields marked `#[record(Timestamp)]`.
pub trait AsTimestamp {
    fn as_timestamp(&self) -> Timestamp;
}

impl AsTimestamp for Timestamp {
    fn as_timestamp(&self) -> Timestamp {
        *self
    }
}

impl AsTimestamp for i64 {
    fn as_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(*self)
    }
}

impl AsTimestamp for u64 {
    fn as_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}
