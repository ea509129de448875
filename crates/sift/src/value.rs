//! Runtime values read from record fields.
//!
//! [`Value`] borrows from the record it was read from and is what the
//! ordering, criteria and aggregate code compare. [`OwnedValue`] is its
//! owned twin, used where a field has to outlive the source record, such
//! as the [`Row`](crate::Row)s built by `select`.

use std::cmp::Ordering;

/// Field value borrowed from a record.
///
/// # Example
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
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Enum discriminant value.
    Enum(u32),
    /// Boolean value.
    Bool(bool),
    /// Field not present or null.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the timestamp value, if present.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Timestamp(_) => "timestamp",
            Value::Enum(_) => "enum",
            Value::Bool(_) => "bool",
            Value::None => "missing",
        }
    }

    /// Copies the value out of the record.
    pub fn to_owned_value(&self) -> OwnedValue {
        OwnedValue::from(self.clone())
    }
}

/// Owned counterpart of [`Value`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OwnedValue {
    String(String),
    Number(Number),
    Timestamp(Timestamp),
    Enum(u32),
    Bool(bool),
    None,
}

impl OwnedValue {
    /// Borrows this value as a [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            OwnedValue::String(s) => Value::String(s),
            OwnedValue::Number(n) => Value::Number(*n),
            OwnedValue::Timestamp(t) => Value::Timestamp(*t),
            OwnedValue::Enum(d) => Value::Enum(*d),
            OwnedValue::Bool(b) => Value::Bool(*b),
            OwnedValue::None => Value::None,
        }
    }
}

impl From<Value<'_>> for OwnedValue {
    fn from(value: Value<'_>) -> Self {
        match value {
            Value::String(s) => OwnedValue::String(s.to_string()),
            Value::Number(n) => OwnedValue::Number(n),
            Value::Timestamp(t) => OwnedValue::Timestamp(t),
            Value::Enum(d) => OwnedValue::Enum(d),
            Value::Bool(b) => OwnedValue::Bool(b),
            Value::None => OwnedValue::None,
        }
    }
}

impl From<&str> for OwnedValue {
    fn from(s: &str) -> Self {
        OwnedValue::String(s.to_string())
    }
}

impl From<String> for OwnedValue {
    fn from(s: String) -> Self {
        OwnedValue::String(s)
    }
}

impl From<bool> for OwnedValue {
    fn from(b: bool) -> Self {
        OwnedValue::Bool(b)
    }
}

impl From<Timestamp> for OwnedValue {
    fn from(t: Timestamp) -> Self {
        OwnedValue::Timestamp(t)
    }
}

impl From<Number> for OwnedValue {
    fn from(n: Number) -> Self {
        OwnedValue::Number(n)
    }
}

/// Numeric value supporting all common numeric types.
///
/// Integers keep their exact representation, and comparisons across
/// variants are exact as well.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        Some(self.total_cmp(other))
    }

    /// Total order over numbers: exact by value across variants, with
    /// every NaN equal to each other and after all other numbers.
    /// `-0.0` and `0.0` are equal.
    pub fn total_cmp(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => a.cmp(&b),
            (Number::U64(a), Number::U64(b)) => a.cmp(&b),
            (Number::I64(a), Number::U64(b)) => cmp_i64_u64(a, b),
            (Number::U64(a), Number::I64(b)) => cmp_i64_u64(b, a).reverse(),
            (Number::F64(a), Number::F64(b)) => match (a.is_nan(), b.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            },
            (Number::I64(a), Number::F64(b)) => cmp_i64_f64(a, b),
            (Number::F64(a), Number::I64(b)) => cmp_i64_f64(b, a).reverse(),
            (Number::U64(a), Number::F64(b)) => cmp_u64_f64(a, b),
            (Number::F64(a), Number::U64(b)) => cmp_u64_f64(b, a).reverse(),
        }
    }
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

fn cmp_i64_u64(a: i64, b: u64) -> Ordering {
    match u64::try_from(a) {
        Ok(a) => a.cmp(&b),
        Err(_) => Ordering::Less,
    }
}

/// Orders an integer against a float without rounding the integer.
/// NaN sorts after every integer.
fn cmp_i64_f64(a: i64, b: f64) -> Ordering {
    if b.is_nan() || b >= TWO_POW_63 {
        return Ordering::Less;
    }
    if b < -TWO_POW_63 {
        return Ordering::Greater;
    }
    let whole = b.trunc();
    a.cmp(&(whole as i64)).then_with(|| fraction_order(b, whole))
}

fn cmp_u64_f64(a: u64, b: f64) -> Ordering {
    if b.is_nan() || b >= TWO_POW_64 {
        return Ordering::Less;
    }
    if b < 0.0 {
        return Ordering::Greater;
    }
    let whole = b.trunc();
    a.cmp(&(whole as u64)).then_with(|| fraction_order(b, whole))
}

/// How an integer equal to `whole` orders against `value`.
fn fraction_order(value: f64, whole: f64) -> Ordering {
    if value > whole {
        Ordering::Less
    } else if value < whole {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

macro_rules! owned_number_from {
    ($($source:ty),*) => {
        $(
            impl From<$source> for OwnedValue {
                fn from(n: $source) -> Self {
                    OwnedValue::Number(Number::from(n))
                }
            }
        )*
    };
}

owned_number_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Timestamp represented as milliseconds since Unix epoch.
///
/// ```
/// use sift::Timestamp;
///
/// assert!(Timestamp::from_secs(1) < Timestamp::from_millis(1500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    pub fn as_secs(self) -> i64 {
        self.0 / 1000
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_kind_names() {
        assert_eq!(Value::String("x").kind(), "string");
        assert_eq!(Value::Number(Number::I64(1)).kind(), "number");
        assert_eq!(Value::Timestamp(Timestamp(0)).kind(), "timestamp");
        assert_eq!(Value::Enum(2).kind(), "enum");
        assert_eq!(Value::Bool(true).kind(), "bool");
        assert_eq!(Value::None.kind(), "missing");
    }

    #[test]
    fn value_extractors() {
        assert_eq!(Value::String("hello").as_str(), Some("hello"));
        assert_eq!(
            Value::Number(Number::U64(7)).as_number(),
            Some(Number::U64(7))
        );
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(Value::String("7").as_number(), None);
        assert_eq!(Value::None.as_str(), None);
    }

    #[test]
    fn owned_value_borrows_back() {
        let owned = Value::String("Ada").to_owned_value();
        assert_eq!(owned, OwnedValue::String("Ada".to_string()));
        assert_eq!(owned.as_value(), Value::String("Ada"));

        let none = OwnedValue::from(Value::None);
        assert!(none.as_value().is_none());
    }

    #[test]
    fn number_comparisons() {
        assert_eq!(
            Number::I64(5).compare(Number::I64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::U64(10).compare(Number::F64(5.5)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn number_total_order_ranks_nan_last() {
        let nan = Number::F64(f64::NAN);
        assert_eq!(nan.total_cmp(Number::F64(f64::INFINITY)), Ordering::Greater);
        assert_eq!(Number::I64(i64::MAX).total_cmp(nan), Ordering::Less);
        assert_eq!(Number::U64(0).total_cmp(nan), Ordering::Less);
        assert_eq!(nan.total_cmp(Number::F64(-f64::NAN)), Ordering::Equal);
        assert_eq!(Number::F64(-0.0).total_cmp(Number::I64(0)), Ordering::Equal);
    }

    #[test]
    fn number_mixed_comparisons_are_exact() {
        // 2^53 + 1 is not representable as f64
        let big = 9_007_199_254_740_993i64;
        assert_eq!(
            Number::I64(big).total_cmp(Number::F64(9_007_199_254_740_992.0)),
            Ordering::Greater
        );
        assert_eq!(Number::I64(-1).total_cmp(Number::U64(0)), Ordering::Less);
        assert_eq!(Number::U64(u64::MAX).total_cmp(Number::I64(i64::MAX)), Ordering::Greater);
        assert_eq!(Number::I64(-1).total_cmp(Number::F64(-1.5)), Ordering::Greater);
        assert_eq!(Number::U64(3).total_cmp(Number::F64(-0.5)), Ordering::Greater);
        assert_eq!(Number::U64(u64::MAX).total_cmp(Number::F64(1e30)), Ordering::Less);
        assert_eq!(Number::I64(i64::MIN).total_cmp(Number::F64(f64::NEG_INFINITY)), Ordering::Greater);
    }

    #[test]
    fn number_conversions() {
        assert_eq!(Number::from(42i32), Number::I64(42));
        assert_eq!(Number::from(42u8), Number::U64(42));
        assert_eq!(Number::from(1.5f32), Number::F64(1.5));
        assert_eq!(Number::from(3usize).to_f64(), 3.0);
    }

    #[test]
    fn timestamp_conversions() {
        assert_eq!(Timestamp::from_secs(2).as_millis(), 2000);
        assert_eq!(Timestamp::from_millis(5500).as_secs(), 5);
        assert_eq!(Timestamp::from(10), Timestamp(10));
    }
}
