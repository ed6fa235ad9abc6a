// used for persistence
use rusqlite::{params_from_iter, Connection, Transaction};
use tracing::{debug, info};

use crate::datatype::{Row, Value};
use crate::error::Result;
use crate::schema::ALL_SCHEMAS;

/// The narrow storage interface every facet is persisted through.
///
/// Statements are plain SQL templates with `?` placeholders and the values
/// to bind, in order. Rows come back as column name to value mappings.
pub trait Store {
    /// Runs an insert, update or delete and returns the number of rows affected.
    fn execute_statement(&self, sql: &str, values: &[Value]) -> Result<usize>;
    /// Runs a select and returns every matching row.
    fn query(&self, sql: &str, values: &[Value]) -> Result<Vec<Row>>;
}

fn execute_on(connection: &Connection, sql: &str, values: &[Value]) -> Result<usize> {
    debug!(sql, parameters = values.len(), "execute");
    let mut statement = connection.prepare_cached(sql)?;
    Ok(statement.execute(params_from_iter(values.iter()))?)
}

fn query_on(connection: &Connection, sql: &str, values: &[Value]) -> Result<Vec<Row>> {
    debug!(sql, parameters = values.len(), "query");
    let mut statement = connection.prepare_cached(sql)?;
    let names: Vec<String> = statement.column_names().into_iter().map(String::from).collect();
    let mut rows = statement.query(params_from_iter(values.iter()))?;
    let mut result = Vec::new();
    while let Some(row) = rows.next()? {
        let mut hydrated = Row::new();
        for (index, name) in names.iter().enumerate() {
            hydrated.insert(name.as_str(), Value::try_from(row.get_ref(index)?)?);
        }
        result.push(hydrated);
    }
    Ok(result)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMode {
    InMemory,
    File(String),
}

// ------------- Persistence -------------
pub struct Persistor {
    connection: Connection,
}

impl Persistor {
    pub fn new(mode: PersistenceMode) -> Result<Persistor> {
        let connection = match &mode {
            PersistenceMode::InMemory => Connection::open_in_memory()?,
            PersistenceMode::File(path) => Connection::open(path)?,
        };
        debug!(?mode, "opened store");
        Ok(Persistor { connection })
    }
    /// Creates every facet table that does not exist yet. Meant to be called
    /// once, when a process or session starts using a store.
    pub fn create_temporal_database(&self) -> Result<()> {
        let ddl: Vec<String> = ALL_SCHEMAS.iter().map(|s| s.create_table_sql()).collect();
        self.connection.execute_batch(&ddl.join("\n"))?;
        info!(tables = ALL_SCHEMAS.len(), "temporal database created");
        Ok(())
    }
    /// Starts a session whose statements are committed together. Pass the
    /// session wherever a [`Store`] is expected to make an aggregate
    /// operation atomic.
    pub fn session(&self) -> Result<Session<'_>> {
        Ok(Session {
            transaction: self.connection.unchecked_transaction()?,
        })
    }
}

impl Store for Persistor {
    fn execute_statement(&self, sql: &str, values: &[Value]) -> Result<usize> {
        execute_on(&self.connection, sql, values)
    }
    fn query(&self, sql: &str, values: &[Value]) -> Result<Vec<Row>> {
        query_on(&self.connection, sql, values)
    }
}

/// A transaction over a [`Persistor`]'s connection. Dropping a session
/// without committing it rolls everything back.
pub struct Session<'db> {
    transaction: Transaction<'db>,
}

impl Session<'_> {
    pub fn commit(self) -> Result<()> {
        self.transaction.commit()?;
        debug!("session committed");
        Ok(())
    }
    pub fn rollback(self) -> Result<()> {
        self.transaction.rollback()?;
        debug!("session rolled back");
        Ok(())
    }
}

impl Store for Session<'_> {
    fn execute_statement(&self, sql: &str, values: &[Value]) -> Result<usize> {
        execute_on(&self.transaction, sql, values)
    }
    fn query(&self, sql: &str, values: &[Value]) -> Result<Vec<Row>> {
        query_on(&self.transaction, sql, values)
    }
}
