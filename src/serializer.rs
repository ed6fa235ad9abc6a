//! Turns a named-field [`Row`] into parameterized SQL for one table.
//!
//! Only the columns present in the row take part in a statement; a column
//! holding [`Value::Null`] is bound as SQL NULL. Values are never spliced
//! into the SQL text, every value is a `?` parameter.

use crate::datatype::{Row, Value};
use crate::error::{Result, StrataError};

/// A statement ready to be handed to a [`crate::persist::Store`].
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub values: Vec<Value>,
}

pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[derive(Debug, Clone, Copy)]
pub struct Serializer<'a> {
    table: &'a str,
    primary_key: &'a str,
}

impl<'a> Serializer<'a> {
    pub fn new(table: &'a str, primary_key: &'a str) -> Self {
        Self { table, primary_key }
    }

    fn check(&self, row: &Row) -> Result<Value> {
        if row.is_empty() {
            return Err(StrataError::Serialization(format!(
                "no columns given for {}",
                self.table
            )));
        }
        match row.get(self.primary_key) {
            Some(key) if !key.is_null() => Ok(key.clone()),
            _ => Err(StrataError::Serialization(format!(
                "primary key {} of {} has no value",
                self.primary_key, self.table
            ))),
        }
    }

    pub fn insert(&self, row: &Row) -> Result<SqlStatement> {
        self.check(row)?;
        let columns: Vec<String> = row.columns().map(quote_identifier).collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        Ok(SqlStatement {
            sql: format!(
                "insert into {} ({}) values ({})",
                quote_identifier(self.table),
                columns.join(", "),
                placeholders
            ),
            values: row.iter().map(|(_, v)| v.clone()).collect(),
        })
    }

    pub fn select(&self, row: &Row) -> Result<SqlStatement> {
        let key = self.check(row)?;
        let columns: Vec<String> = row.columns().map(quote_identifier).collect();
        Ok(SqlStatement {
            sql: format!(
                "select {} from {} where {} = ?",
                columns.join(", "),
                quote_identifier(self.table),
                quote_identifier(self.primary_key)
            ),
            values: vec![key],
        })
    }

    pub fn update(&self, row: &Row) -> Result<SqlStatement> {
        let key = self.check(row)?;
        let assignments: Vec<String> = row
            .columns()
            .filter(|c| *c != self.primary_key)
            .map(|c| format!("{} = ?", quote_identifier(c)))
            .collect();
        if assignments.is_empty() {
            return Err(StrataError::Serialization(format!(
                "nothing to update in {}",
                self.table
            )));
        }
        let mut values: Vec<Value> = row
            .iter()
            .filter(|(c, _)| *c != self.primary_key)
            .map(|(_, v)| v.clone())
            .collect();
        values.push(key);
        Ok(SqlStatement {
            sql: format!(
                "update {} set {} where {} = ?",
                quote_identifier(self.table),
                assignments.join(", "),
                quote_identifier(self.primary_key)
            ),
            values,
        })
    }

    pub fn delete(&self, row: &Row) -> Result<SqlStatement> {
        let key = self.check(row)?;
        Ok(SqlStatement {
            sql: format!(
                "delete from {} where {} = ?",
                quote_identifier(self.table),
                quote_identifier(self.primary_key)
            ),
            values: vec![key],
        })
    }
}
