//! Sift - chainable LINQ-style queries over in-memory collections.
//!
//! Sift wraps a sequence that is already loaded in memory in a [`Query`]
//! and shapes it with chained operators:
//!
//! - Filtering and projection: `filter`, `matching`, `select`
//! - Ordering and pagination: `order_by`, `order_by_all`, `skip`, `take`, `page`
//! - Grouping and joining: `group_by`, `to_group`, `join`
//! - Aggregates: `count`, `sum`, `avg`, `max`, `min`, `any`, `all`, `first`, `last`
//!
//! Evaluation is eager: each operator computes its result when called and
//! returns a new [`Query`], leaving the one it was called on untouched.
//! Nothing is lazy and nothing is asynchronous.
//!
//! # Quick Start
//!
//! ```rust
//! use sift::{Dir, Query, Record};
//!
//! #[derive(Debug, Clone, Record)]
//! struct Employee {
//!     id: u32,
//!     dept_id: u32,
//!     age: u32,
//! }
//!
//! #[derive(Debug, Clone, Record)]
//! struct Dept {
//!     id: u32,
//!     name: String,
//! }
//!
//! let staff = Query::from(vec![
//!     Employee { id: 1, dept_id: 1, age: 30 },
//!     Employee { id: 2, dept_id: 2, age: 25 },
//!     Employee { id: 3, dept_id: 9, age: 35 },
//! ]);
//! let depts = vec![
//!     Dept { id: 1, name: "HR".into() },
//!     Dept { id: 2, name: "Eng".into() },
//! ];
//!
//! // Inner join: employee 3 has no department and is dropped.
//! let joined = staff.join(depts, |e| e.dept_id, |d| d.id, |e, d| (e.id, d.name.clone()));
//! assert_eq!(joined.to_vec(), [(1, "HR".to_string()), (2, "Eng".to_string())]);
//!
//! let oldest = staff.order_by(Employee::AGE, Dir::Desc).first().map(|e| e.id);
//! assert_eq!(oldest, Some(3));
//! assert_eq!(staff.avg(Employee::AGE)?, 30.0);
//! # Ok::<(), sift::QueryError>(())
//! ```
//!
//! # Records
//!
//! Operators that take field names read fields through the [`Record`]
//! trait. `#[derive(Record)]` (feature `derive`, on by default) implements
//! it and adds a `const` per field name. Operators that take closures work
//! on any item type.
//!
//! # Cargo Features
//!
//! | Feature | Default | Effect |
//! |---------|---------|--------|
//! | `derive` | yes | `#[derive(Record)]` |
//! | `serde` | no | `Serialize` for [`Row`], [`Group`], [`OwnedValue`], [`Number`], [`Timestamp`] |
//!
//! # Logging
//!
//! Operators emit `tracing` events at `trace` level (operator name and
//! sizes) and `debug` level for rejected operations. Install a subscriber
//! to see them.

extern crate self as sift;

mod aggregate;
mod criteria;
mod error;
mod group;
mod op;
mod ordering;
mod query;
mod record;
mod row;
mod value;

pub use criteria::{Clause, Criteria, Operand};
pub use error::{QueryError, Result};
pub use group::Group;
pub use op::Op;
pub use ordering::{compare_values, sort_compare, Dir, OrderBy};
pub use query::Query;
pub use record::{AsDiscriminant, AsTimestamp, Record};
pub use row::Row;
pub use value::{Number, OwnedValue, Timestamp, Value};

#[cfg(feature = "derive")]
pub use sift_macros::Record;
