use async_trait::async_trait;

use crate::{QueryResult, SqlbindError, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SqlDialect {
    #[default]
    Sqlite,
    Generic,
}

/// A statement in the form the backend accepts: canonical `?N` SQL plus one
/// value per positional slot.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendStatement<'a> {
    pub sql: &'a str,
    pub params: &'a [Value],
}

/// The execution backend only understands numbered `?N` markers. Errors it
/// returns are forwarded to callers unchanged.
#[async_trait(?Send)]
pub trait SqlBackend {
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, SqlbindError>;

    /// Runs every statement inside one transaction. Either all statements
    /// take effect or none do.
    async fn batch(
        &self,
        statements: &[BackendStatement<'_>],
    ) -> Result<Vec<QueryResult>, SqlbindError>;
}
