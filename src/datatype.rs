// used for persistence
use rusqlite::types::{FromSql, ToSql, ToSqlOutput, ValueRef};

// used for timestamps in the database
use chrono::NaiveDateTime;

// rows are built and dropped for every statement, so columns are kept inline
use smallvec::SmallVec;

// used to print out readable forms of a value
use std::fmt;

use crate::error::{Result, StrataError};

/// The storage type of a column, used when creating tables and when
/// hydrating values that come back from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    Timestamp,
}

impl ColumnType {
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Real => "real",
            ColumnType::Text => "text",
            ColumnType::Timestamp => "timestamp",
        }
    }
}

/// A single column value as it travels between a record and the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Brings a raw value from the store to the representation the column
    /// declares. SQLite hands back timestamps as text and may store whole
    /// reals as integers, so both are reinterpreted here.
    pub fn coerce(self, column_type: ColumnType) -> Result<Value> {
        let coerced = match (column_type, self) {
            (_, Value::Null) => Value::Null,
            (ColumnType::Integer, Value::Integer(i)) => Value::Integer(i),
            (ColumnType::Integer, Value::Real(r)) if r.fract() == 0.0 => Value::Integer(r as i64),
            (ColumnType::Real, Value::Real(r)) => Value::Real(r),
            (ColumnType::Real, Value::Integer(i)) => Value::Real(i as f64),
            (ColumnType::Text, Value::Text(s)) => Value::Text(s),
            (ColumnType::Text, Value::Integer(i)) => Value::Text(i.to_string()),
            (ColumnType::Text, Value::Real(r)) => Value::Text(r.to_string()),
            (ColumnType::Timestamp, Value::Timestamp(t)) => Value::Timestamp(t),
            (ColumnType::Timestamp, Value::Text(s)) => {
                let parsed = NaiveDateTime::column_result(ValueRef::Text(s.as_bytes()))
                    .map_err(|e| StrataError::Serialization(format!("'{s}' is not a timestamp: {e}")))?;
                Value::Timestamp(parsed)
            }
            (column_type, value) => {
                return Err(StrataError::Serialization(format!(
                    "{value:?} cannot be stored in a {} column",
                    column_type.sql_type()
                )));
            }
        };
        Ok(coerced)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Value::Null => Ok(ToSqlOutput::Owned(rusqlite::types::Value::Null)),
            Value::Integer(i) => i.to_sql(),
            Value::Real(r) => r.to_sql(),
            Value::Text(s) => s.to_sql(),
            Value::Timestamp(t) => t.to_sql(),
        }
    }
}

// no facet table declares a blob column
impl TryFrom<ValueRef<'_>> for Value {
    type Error = StrataError;
    fn try_from(value: ValueRef<'_>) -> Result<Self> {
        match value {
            ValueRef::Null => Ok(Value::Null),
            ValueRef::Integer(i) => Ok(Value::Integer(i)),
            ValueRef::Real(r) => Ok(Value::Real(r)),
            ValueRef::Text(t) => std::str::from_utf8(t)
                .map(|s| Value::Text(s.to_string()))
                .map_err(|e| StrataError::Serialization(format!("stored text is not UTF-8: {e}"))),
            ValueRef::Blob(b) => Err(StrataError::Serialization(format!(
                "unexpected blob of {} bytes",
                b.len()
            ))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => write!(f, "{}", s),
            Value::Timestamp(t) => write!(f, "{}", t),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self { Value::Integer(v) }
}
impl From<i32> for Value {
    fn from(v: i32) -> Self { Value::Integer(v as i64) }
}
impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::Real(v) }
}
impl From<String> for Value {
    fn from(v: String) -> Self { Value::Text(v) }
}
impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::Text(v.to_string()) }
}
impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self { Value::Timestamp(v) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Reads a typed field back out of a (coerced) value. `Null` maps to `None`.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Option<Self>>;
}

fn mismatch<T>(value: &Value, expected: &str) -> Result<Option<T>> {
    Err(StrataError::Serialization(format!("expected {expected}, found {value:?}")))
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s.clone())),
            other => mismatch(other, "text"),
        }
    }
}
impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Integer(i) => Ok(Some(*i)),
            other => mismatch(other, "an integer"),
        }
    }
}
impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        match i64::from_value(value)? {
            Some(i) => i32::try_from(i)
                .map(Some)
                .map_err(|_| StrataError::Serialization(format!("{i} does not fit in 32 bits"))),
            None => Ok(None),
        }
    }
}
impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Real(r) => Ok(Some(*r)),
            Value::Integer(i) => Ok(Some(*i as f64)),
            other => mismatch(other, "a real"),
        }
    }
}
impl FromValue for NaiveDateTime {
    fn from_value(value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Timestamp(t) => Ok(Some(*t)),
            other => mismatch(other, "a timestamp"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct RowEntry {
    name: String,
    value: Value,
}

/// An ordered mapping from column name to value. Column order is kept so
/// that the statements built from a row are stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    entries: SmallVec<[RowEntry; 12]>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }
    /// Sets a column, replacing the value in place if the column is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.value = value,
            None => self.entries.push(RowEntry { name, value }),
        }
    }
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|e| e.name == name).map(|e| &e.value)
    }
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.value))
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Overwrites `field` with the column's value, but only when the row
    /// actually carries that column.
    pub fn assign<T: FromValue>(&self, name: &str, field: &mut Option<T>) -> Result<()> {
        if let Some(value) = self.get(name) {
            *field = T::from_value(value)?;
        }
        Ok(())
    }
}
