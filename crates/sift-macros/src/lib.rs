//! Proc macros for Sift.
//!
//! - [`Record`] - expose struct fields by name to the `sift` query engine

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `sift::Record` for a struct with named fields.
///
/// # Field Kinds
///
/// Without an attribute the kind is inferred from the field type:
///
/// | Field type | Kind |
/// |------------|------|
/// | `String`, `&str` | String |
/// | `i8`..`i64`, `u8`..`u64`, `isize`, `usize`, `f32`, `f64` | Number |
/// | `bool` | Bool |
/// | `Option<_>` of the above | same kind, `None` reads as `Value::None` |
///
/// Fields of any other type are not exposed unless annotated.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `String`, `Number`, `Bool` | Force the kind |
/// | `Timestamp` | Field type implements `AsTimestamp` |
/// | `Enum` | Field type implements `AsDiscriminant` |
/// | `skip` | Do not expose the field |
/// | `rename = "..."` | Query the field under another name |
/// | `ty = "..."` | Kind given as a string |
///
/// # Generated Code
///
/// 1. A `&'static str` constant per exposed field (`Employee::DEPT_ID`)
/// 2. `impl sift::Record` with `field` and `has_field`
///
/// # Example
///
/// ```ignore
/// use sift::{Query, Record};
///
/// #[derive(Clone, Record)]
/// struct Employee {
///     name: String,
///     #[record(rename = "dept")]
///     dept_id: u32,
///     #[record(Enum)]
///     level: Level,
///     #[record(skip)]
///     salary: u64,
/// }
///
/// let staff = Query::from(employees);
/// let by_dept = staff.order_asc(Employee::DEPT);
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
