//! Declarative field criteria.
//!
//! A [`Criteria`] is a closure-free predicate over [`Record`] fields that
//! can be built up, inspected and reused across queries. It is applied
//! with [`Query::matching`](crate::Query::matching).
//!
//! Clauses live in three groups combined with fixed logic:
//!
//! ```text
//! match = (all AND clauses match)
//!       ∧ (at least one OR clause matches, OR no OR clauses exist)
//!       ∧ (no NOT clause matches)
//! ```

use regex::Regex;

use crate::error::Result;
use crate::op::Op;
use crate::ordering::compare_values;
use crate::record::Record;
use crate::value::{Number, Timestamp, Value};

/// Right-hand side of a clause, owned so criteria can be stored.
#[derive(Debug, Clone)]
pub enum Operand {
    String(String),
    Number(Number),
    Timestamp(Timestamp),
    Enum(u32),
    /// Discriminant set for [`Op::In`].
    EnumSet(Vec<u32>),
    Bool(bool),
    /// Compiled pattern for [`Op::Regex`].
    Regex(Regex),
}

impl Operand {
    /// Scalar operands as a [`Value`]; sets and patterns have none.
    fn as_value(&self) -> Option<Value<'_>> {
        match self {
            Operand::String(s) => Some(Value::String(s)),
            Operand::Number(n) => Some(Value::Number(*n)),
            Operand::Timestamp(t) => Some(Value::Timestamp(*t)),
            Operand::Enum(d) => Some(Value::Enum(*d)),
            Operand::Bool(b) => Some(Value::Bool(*b)),
            Operand::EnumSet(_) | Operand::Regex(_) => None,
        }
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::String(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::String(s)
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

impl From<Timestamp> for Operand {
    fn from(t: Timestamp) -> Self {
        Operand::Timestamp(t)
    }
}

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Number(n)
    }
}

impl From<Regex> for Operand {
    fn from(r: Regex) -> Self {
        Operand::Regex(r)
    }
}

impl From<Vec<u32>> for Operand {
    fn from(set: Vec<u32>) -> Self {
        Operand::EnumSet(set)
    }
}

macro_rules! operand_from_number {
    ($($source:ty),*) => {
        $(
            impl From<$source> for Operand {
                fn from(n: $source) -> Self {
                    Operand::Number(Number::from(n))
                }
            }
        )*
    };
}

operand_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// A single `field <op> operand` test.
#[derive(Debug, Clone)]
pub struct Clause {
    pub field: String,
    pub op: Op,
    pub operand: Operand,
}

impl Clause {
    pub fn new(field: impl Into<String>, op: Op, operand: impl Into<Operand>) -> Self {
        Clause {
            field: field.into(),
            op,
            operand: operand.into(),
        }
    }

    /// Tests a field value against this clause.
    ///
    /// Missing values and kind mismatches never match, for `Ne` too.
    pub fn matches(&self, value: &Value<'_>) -> bool {
        if value.is_none() {
            return false;
        }

        match (self.op, &self.operand) {
            (Op::Regex, Operand::Regex(re)) => value.as_str().is_some_and(|s| re.is_match(s)),
            (Op::Contains, Operand::String(needle)) => {
                value.as_str().is_some_and(|s| s.contains(needle.as_str()))
            }
            (Op::StartsWith, Operand::String(prefix)) => {
                value.as_str().is_some_and(|s| s.starts_with(prefix.as_str()))
            }
            (Op::EndsWith, Operand::String(suffix)) => {
                value.as_str().is_some_and(|s| s.ends_with(suffix.as_str()))
            }
            (Op::In, Operand::EnumSet(set)) => match value {
                Value::Enum(d) => set.contains(d),
                _ => false,
            },
            (op, operand) if op.is_comparison() => operand
                .as_value()
                .and_then(|rhs| compare_values(value, &rhs))
                .is_some_and(|ordering| op.eval_ordering(ordering)),
            _ => false,
        }
    }

    /// Reads this clause's field from a record and tests it.
    pub fn matches_record<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.matches(&record.field(&self.field))
    }
}

/// AND / OR / NOT clause groups over record fields.
///
/// ```
/// use sift::{Criteria, Row};
///
/// let criteria = Criteria::new()
///     .and_gte("age", 30)
///     .or_eq("dept", "Eng")
///     .or_eq("dept", "HR")
///     .not_eq("retired", true);
///
/// let row = Row::new().with("age", 41).with("dept", "HR").with("retired", false);
/// assert!(criteria.matches(&row));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    and_clauses: Vec<Clause>,
    or_clauses: Vec<Clause>,
    not_clauses: Vec<Clause>,
}

impl Criteria {
    /// Creates empty criteria, which match every record.
    pub fn new() -> Self {
        Criteria::default()
    }

    pub fn and(mut self, field: &str, op: Op, operand: impl Into<Operand>) -> Self {
        self.and_clauses.push(Clause::new(field, op, operand));
        self
    }

    pub fn or(mut self, field: &str, op: Op, operand: impl Into<Operand>) -> Self {
        self.or_clauses.push(Clause::new(field, op, operand));
        self
    }

    pub fn not(mut self, field: &str, op: Op, operand: impl Into<Operand>) -> Self {
        self.not_clauses.push(Clause::new(field, op, operand));
        self
    }

    pub fn and_eq(self, field: &str, operand: impl Into<Operand>) -> Self {
        self.and(field, Op::Eq, operand)
    }

    pub fn and_ne(self, field: &str, operand: impl Into<Operand>) -> Self {
        self.and(field, Op::Ne, operand)
    }

    pub fn and_gt(self, field: &str, operand: impl Into<Operand>) -> Self {
        self.and(field, Op::Gt, operand)
    }

    pub fn and_gte(self, field: &str, operand: impl Into<Operand>) -> Self {
        self.and(field, Op::Gte, operand)
    }

    pub fn and_lt(self, field: &str, operand: impl Into<Operand>) -> Self {
        self.and(field, Op::Lt, operand)
    }

    pub fn and_lte(self, field: &str, operand: impl Into<Operand>) -> Self {
        self.and(field, Op::Lte, operand)
    }

    pub fn and_contains(self, field: &str, needle: &str) -> Self {
        self.and(field, Op::Contains, needle)
    }

    pub fn and_startswith(self, field: &str, prefix: &str) -> Self {
        self.and(field, Op::StartsWith, prefix)
    }

    /// Field is an enum whose discriminant is one of `values`.
    pub fn and_in<I>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        self.and(field, Op::In, values.into_iter().collect::<Vec<_>>())
    }

    /// Adds an AND regex clause.
    ///
    /// Returns an error if the pattern does not compile.
    pub fn and_regex(self, field: &str, pattern: &str) -> Result<Self> {
        Ok(self.and(field, Op::Regex, Regex::new(pattern)?))
    }

    pub fn or_eq(self, field: &str, operand: impl Into<Operand>) -> Self {
        self.or(field, Op::Eq, operand)
    }

    pub fn or_contains(self, field: &str, needle: &str) -> Self {
        self.or(field, Op::Contains, needle)
    }

    pub fn or_regex(self, field: &str, pattern: &str) -> Result<Self> {
        Ok(self.or(field, Op::Regex, Regex::new(pattern)?))
    }

    pub fn not_eq(self, field: &str, operand: impl Into<Operand>) -> Self {
        self.not(field, Op::Eq, operand)
    }

    pub fn not_regex(self, field: &str, pattern: &str) -> Result<Self> {
        Ok(self.not(field, Op::Regex, Regex::new(pattern)?))
    }

    /// Tests a record against all three clause groups.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.and_clauses.iter().all(|c| c.matches_record(record))
            && (self.or_clauses.is_empty()
                || self.or_clauses.iter().any(|c| c.matches_record(record)))
            && !self.not_clauses.iter().any(|c| c.matches_record(record))
    }

    pub fn and_clauses(&self) -> &[Clause] {
        &self.and_clauses
    }

    pub fn or_clauses(&self) -> &[Clause] {
        &self.or_clauses
    }

    pub fn not_clauses(&self) -> &[Clause] {
        &self.not_clauses
    }

    /// Returns `true` if no clause has been added.
    pub fn is_empty(&self) -> bool {
        self.and_clauses.is_empty() && self.or_clauses.is_empty() && self.not_clauses.is_empty()
    }
}
