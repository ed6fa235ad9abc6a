// Error type for strata
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrataError {
    #[error("Not found: no row for '{ident}' in {table}")]
    NotFound { table: String, ident: String },
    #[error("Duplicate entity: '{ident}' already exists in {table}")]
    DuplicateEntity { table: String, ident: String },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid extent: {0}")]
    InvalidExtent(String),
    #[error("Invalid temporal extent: {0}")]
    InvalidTemporalExtent(String),
    #[error("Incompatible temporal types: {left} and {right}")]
    IncompatibleTemporalType { left: String, right: String },
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl StrataError {
    pub fn not_found(table: &str, ident: impl ToString) -> Self {
        Self::NotFound { table: table.to_string(), ident: ident.to_string() }
    }
    pub fn duplicate(table: &str, ident: impl ToString) -> Self {
        Self::DuplicateEntity { table: table.to_string(), ident: ident.to_string() }
    }
    pub fn incompatible(left: impl ToString, right: impl ToString) -> Self {
        Self::IncompatibleTemporalType { left: left.to_string(), right: right.to_string() }
    }
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, StrataError>;

// Helper conversions
impl From<rusqlite::Error> for StrataError {
    fn from(e: rusqlite::Error) -> Self { Self::Persistence(e.to_string()) }
}
impl From<config::ConfigError> for StrataError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
