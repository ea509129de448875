//! Comparison operators for criteria clauses.

use std::cmp::Ordering;

/// Comparison operator of a [`Clause`](crate::Clause).
///
/// | Operator | Applies to |
/// |----------|------------|
/// | `Eq`, `Ne` | every kind |
/// | `Gt`, `Gte`, `Lt`, `Lte` | strings, numbers, timestamps |
/// | `Contains`, `StartsWith`, `EndsWith`, `Regex` | strings |
/// | `In` | enums |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    StartsWith,
    EndsWith,
    Regex,
    /// Membership in a set of enum discriminants.
    In,
}

impl Op {
    /// Returns `true` for the operators decided by an [`Ordering`].
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Op::Eq | Op::Ne | Op::Gt | Op::Gte | Op::Lt | Op::Lte
        )
    }

    /// Evaluates a comparison operator against the ordering of
    /// `field` relative to the clause operand.
    ///
    /// Non-comparison operators always yield `false`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::Contains => "contains",
            Op::StartsWith => "startswith",
            Op::EndsWith => "endswith",
            Op::Regex => "regex",
            Op::In => "in",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
