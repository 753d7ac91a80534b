mod backend;
mod cache;
mod database;
mod error;
pub mod errors;
mod reconcile;
mod sequence;
pub mod sql;
mod statement;
mod types;

pub use backend::{BackendStatement, SqlBackend, SqlDialect};
pub use cache::{SourceKey, StatementCache};
pub use database::{open_database, Database, OpenDatabaseConfig, RunResult};
pub use error::SqlbindError;
pub use errors::ErrorCode;
pub use reconcile::{bindable_indices, reconcile, QueryFile};
pub use sequence::{parse_sequence, SequenceItem};
pub use sql::{map_binds, normalize, BindMetadata, BindStyle, NamedPrefix, NormalizedStatement};
pub use statement::{BoundStatement, CompiledStatement, StatementInstance, StatementSet};
pub use types::{BindValues, ExecutionMeta, QueryResult, Value};
