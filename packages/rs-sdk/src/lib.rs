mod backend;

use std::path::PathBuf;
use std::sync::Arc;

use sqlbind_engine::sql::SqlParser;

pub use backend::SqliteBackend;
pub use sqlbind_engine::sql;
pub use sqlbind_engine::{
    BindMetadata, BindStyle, BindValues, CompiledStatement, Database, ErrorCode, ExecutionMeta,
    QueryFile, QueryResult, RunResult, SequenceItem, SqlBackend, SqlDialect, SqlbindError,
    StatementInstance, StatementSet, Value,
};

/// Without a backend, a SQLite database is opened at `path`, or in memory
/// when no path is given.
#[derive(Default)]
pub struct OpenDatabaseConfig {
    pub backend: Option<Box<dyn SqlBackend + Send + Sync>>,
    pub path: Option<PathBuf>,
    pub dialect: SqlDialect,
}

pub fn open_database(config: OpenDatabaseConfig) -> Result<Database, SqlbindError> {
    let backend: Box<dyn SqlBackend + Send + Sync> = match (config.backend, config.path) {
        (Some(backend), _) => backend,
        (None, Some(path)) => Box::new(SqliteBackend::from_path(&path)?),
        (None, None) => Box::new(SqliteBackend::in_memory()?),
    };
    Ok(Database::new(backend, Arc::new(SqlParser::new(config.dialect))))
}
