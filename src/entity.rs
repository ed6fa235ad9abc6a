//! The generic CRUD pattern shared by every facet.
//!
//! An [`Entity`] pairs a [`Schema`] (which table, which columns) with an
//! in-memory [`Record`] (which fields) under one [`Identifier`]. Every
//! facet of every dataset kind is an `Entity<R>` for some record type `R`;
//! kind specific differences live in the schema, not in the type.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::datatype::{Row, Value};
use crate::error::{Result, StrataError};
use crate::persist::Store;
use crate::schema::Schema;
use crate::serializer::Serializer;

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^([^@\s]+)@([^@\s]+)$").unwrap();
}

// ------------- Identifier -------------
/// An identifier of the form `name@mapset`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    ident: String,
    at: usize,
}

impl Identifier {
    pub fn new(ident: &str) -> Result<Self> {
        let captures = IDENTIFIER
            .captures(ident)
            .ok_or_else(|| StrataError::InvalidIdentifier(format!("'{ident}' is not of the form name@mapset")))?;
        let at = captures.get(1).map_or(0, |m| m.end());
        Ok(Self { ident: ident.to_string(), at })
    }
    pub fn as_str(&self) -> &str {
        &self.ident
    }
    pub fn name(&self) -> &str {
        &self.ident[..self.at]
    }
    pub fn mapset(&self) -> &str {
        &self.ident[self.at + 1..]
    }
}

impl FromStr for Identifier {
    type Err = StrataError;
    fn from_str(s: &str) -> Result<Self> {
        Identifier::new(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ident)
    }
}

// ------------- Record -------------
/// The in-memory field set of a facet.
pub trait Record: Default + fmt::Display {
    /// All fields as columns; absent fields are `Value::Null`.
    fn to_row(&self) -> Row;
    /// Overwrites the fields whose columns are present in `row`.
    fn hydrate(&mut self, row: &Row) -> Result<()>;
    /// Checked before the record is written.
    fn validate(&self, _schema: &Schema) -> Result<()> {
        Ok(())
    }
}

/// Writes one line of a `print_self` dump.
pub(crate) fn write_field<T: fmt::Display>(
    f: &mut fmt::Formatter,
    label: &str,
    value: &Option<T>,
) -> fmt::Result {
    let label = format!("{label}: ");
    match value {
        Some(v) => writeln!(f, " | {:.<28} {}", label, v),
        None => writeln!(f, " | {:.<28} None", label),
    }
}

// ------------- Entity -------------
#[derive(Debug, Clone, PartialEq)]
pub struct Entity<R: Record> {
    schema: &'static Schema,
    ident: Identifier,
    record: R,
}

impl<R: Record> Entity<R> {
    pub fn new(schema: &'static Schema, ident: Identifier) -> Self {
        Self::with_record(schema, ident, R::default())
    }
    pub fn with_record(schema: &'static Schema, ident: Identifier, record: R) -> Self {
        Self { schema, ident, record }
    }
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }
    pub fn ident(&self) -> &Identifier {
        &self.ident
    }
    pub fn record(&self) -> &R {
        &self.record
    }

    fn serializer(&self) -> Serializer<'static> {
        Serializer::new(self.schema.table, self.schema.primary_key)
    }

    fn key_row(&self) -> Row {
        let mut row = Row::new();
        row.insert(self.schema.primary_key, self.ident.as_str());
        row
    }

    /// The row written to the store: the key plus every schema column,
    /// taken from the record or `Null` when the record leaves it out.
    fn row(&self) -> Row {
        let fields = self.record.to_row();
        let mut row = self.key_row();
        for column in self.schema.columns {
            row.insert(column.name, fields.get(column.name).cloned().unwrap_or(Value::Null));
        }
        row
    }

    pub fn is_in_db<S: Store + ?Sized>(&self, store: &S) -> Result<bool> {
        let statement = self.serializer().select(&self.key_row())?;
        Ok(!store.query(&statement.sql, &statement.values)?.is_empty())
    }

    pub fn insert<S: Store + ?Sized>(&self, store: &S) -> Result<()> {
        self.record.validate(self.schema)?;
        if self.is_in_db(store)? {
            return Err(StrataError::duplicate(self.schema.table, &self.ident));
        }
        let statement = self.serializer().insert(&self.row())?;
        store.execute_statement(&statement.sql, &statement.values)?;
        debug!(table = self.schema.table, ident = %self.ident, "inserted");
        Ok(())
    }

    pub fn select<S: Store + ?Sized>(&mut self, store: &S) -> Result<()> {
        let mut wanted = self.key_row();
        for column in self.schema.columns {
            wanted.insert(column.name, Value::Null);
        }
        let statement = self.serializer().select(&wanted)?;
        let stored = store
            .query(&statement.sql, &statement.values)?
            .into_iter()
            .next()
            .ok_or_else(|| StrataError::not_found(self.schema.table, &self.ident))?;
        let mut typed = Row::new();
        for column in self.schema.columns {
            if let Some(value) = stored.get(column.name) {
                typed.insert(column.name, value.clone().coerce(column.column_type)?);
            }
        }
        self.record.hydrate(&typed)?;
        debug!(table = self.schema.table, ident = %self.ident, "selected");
        Ok(())
    }

    /// Overwrites the stored row with the in-memory fields. Fields that are
    /// absent in memory are written as NULL.
    pub fn update<S: Store + ?Sized>(&self, store: &S) -> Result<()> {
        self.record.validate(self.schema)?;
        let statement = self.serializer().update(&self.row())?;
        if store.execute_statement(&statement.sql, &statement.values)? == 0 {
            return Err(StrataError::not_found(self.schema.table, &self.ident));
        }
        debug!(table = self.schema.table, ident = %self.ident, "updated");
        Ok(())
    }

    pub fn delete<S: Store + ?Sized>(&self, store: &S) -> Result<()> {
        let statement = self.serializer().delete(&self.key_row())?;
        if store.execute_statement(&statement.sql, &statement.values)? == 0 {
            return Err(StrataError::not_found(self.schema.table, &self.ident));
        }
        debug!(table = self.schema.table, ident = %self.ident, "deleted");
        Ok(())
    }

    /// Resets every field to absent. The identifier is kept and the store
    /// is not touched.
    pub fn clear(&mut self) {
        self.record = R::default();
    }

    pub fn print_self(&self) {
        print!("{}", self);
    }
}

impl<R: Record> Deref for Entity<R> {
    type Target = R;
    fn deref(&self) -> &R {
        &self.record
    }
}

impl<R: Record> DerefMut for Entity<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.record
    }
}

impl<R: Record> fmt::Display for Entity<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, " +{:-^52}+", format!(" {} ", self.schema.table))?;
        writeln!(f, " | {:.<28} {}", "Id: ", self.ident)?;
        write!(f, "{}", self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_splits_name_and_mapset() {
        let ident = Identifier::new("soil0@PERMANENT").unwrap();
        assert_eq!(ident.name(), "soil0");
        assert_eq!(ident.mapset(), "PERMANENT");
        assert_eq!(ident.to_string(), "soil0@PERMANENT");
    }

    #[test]
    fn malformed_identifiers_are_rejected() {
        for bad in ["soil0", "@PERMANENT", "soil0@", "a@b@c", "so il@PERMANENT", ""] {
            assert!(
                matches!(Identifier::new(bad), Err(StrataError::InvalidIdentifier(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
