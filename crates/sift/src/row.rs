//! Projected records.
//!
//! [`Row`] is what [`Query::select`](crate::Query::select) produces: the
//! requested fields copied out of each item, in the order they were asked
//! for. Rows are records themselves, so a projection can keep chaining.

use crate::record::Record;
use crate::value::{OwnedValue, Value};

/// An ordered set of named field values.
///
/// ```
/// use sift::{OwnedValue, Record, Row, Value};
///
/// let row = Row::new().with("id", 1i64).with("name", "HR");
///
/// assert_eq!(row.names().collect::<Vec<_>>(), ["id", "name"]);
/// assert_eq!(row.field("name"), Value::String("HR"));
/// assert_eq!(row.get("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, OwnedValue)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Row::default()
    }

    /// Builder form of [`Row::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OwnedValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field, replacing the value in place if the name already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<OwnedValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&OwnedValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OwnedValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Copies the named fields out of a record.
    ///
    /// Callers check `has_field` beforehand; unknown names end up as
    /// [`OwnedValue::None`].
    pub(crate) fn project<R: Record + ?Sized>(record: &R, keys: &[&str]) -> Self {
        let fields = keys
            .iter()
            .map(|key| (key.to_string(), record.field(key).to_owned_value()))
            .collect();
        Row { fields }
    }
}

impl Record for Row {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map_or(Value::None, OwnedValue::as_value)
    }

    fn has_field(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Row {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
