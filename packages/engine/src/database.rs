use std::sync::Arc;

use crate::cache::{SourceKey, StatementCache};
use crate::errors;
use crate::reconcile::{bindable_indices, reconcile, QueryFile};
use crate::sequence::{parse_sequence, SequenceItem};
use crate::sql::{normalize, SqlParser};
use crate::statement::{CompiledStatement, StatementInstance, StatementSet};
use crate::{BindValues, QueryResult, SqlBackend, SqlDialect, SqlbindError};

pub struct OpenDatabaseConfig {
    pub backend: Box<dyn SqlBackend + Send + Sync>,
    pub dialect: SqlDialect,
}

impl OpenDatabaseConfig {
    pub fn new(backend: Box<dyn SqlBackend + Send + Sync>) -> Self {
        Self {
            backend,
            dialect: SqlDialect::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunResult {
    Single(QueryResult),
    Batch(Vec<QueryResult>),
}

impl RunResult {
    pub fn results(&self) -> &[QueryResult] {
        match self {
            Self::Single(result) => std::slice::from_ref(result),
            Self::Batch(results) => results,
        }
    }
}

/// A backend connection plus the statements compiled for it.
pub struct Database {
    backend: Box<dyn SqlBackend + Send + Sync>,
    parser: Arc<SqlParser>,
    cache: StatementCache,
}

pub fn open_database(config: OpenDatabaseConfig) -> Database {
    Database::new(config.backend, Arc::new(SqlParser::new(config.dialect)))
}

impl Database {
    pub fn new(backend: Box<dyn SqlBackend + Send + Sync>, parser: Arc<SqlParser>) -> Self {
        Self {
            backend,
            parser,
            cache: StatementCache::new(),
        }
    }

    pub fn parser(&self) -> &Arc<SqlParser> {
        &self.parser
    }

    pub fn cache(&self) -> &StatementCache {
        &self.cache
    }

    /// Compiles one statement, reusing the cached statement for text seen
    /// before on this database.
    pub fn compile(&self, sql: &str) -> Result<Arc<CompiledStatement>, SqlbindError> {
        let mut compiled = self.cache.get_or_create(SourceKey::Sql(sql.to_string()), || {
            let normalized = normalize(&self.parser, sql)?;
            Ok(vec![CompiledStatement::new(sql, normalized)])
        })?;
        compiled
            .pop()
            .ok_or_else(|| errors::empty_sequence_error("compile"))
    }

    pub fn compile_file(
        &self,
        file: &QueryFile,
    ) -> Result<Vec<Arc<CompiledStatement>>, SqlbindError> {
        self.cache
            .get_or_create(
                SourceKey::File {
                    name: file.name().to_string(),
                    sql: file.sql().to_string(),
                },
                || file.compile(&self.parser),
            )
    }

    /// Builds statements from a sequence of SQL text, compiled statements and
    /// bind value sets. See [`parse_sequence`] for how binds attach.
    pub fn prepare(&self, items: Vec<SequenceItem>) -> Result<StatementSet, SqlbindError> {
        let instances = parse_sequence(items, "prepare", |sql| self.compile(sql))?;
        StatementSet::from_instances(instances)
            .ok_or_else(|| errors::empty_sequence_error("prepare"))
    }

    /// Binds a query file's statements against `binds`; see [`reconcile`].
    pub fn prepare_file(
        &self,
        file: &QueryFile,
        binds: &[BindValues],
    ) -> Result<StatementSet, SqlbindError> {
        let statements = self.compile_file(file)?;
        let bindable = bindable_indices(&statements);
        let instances = reconcile(&statements, &bindable, binds)?;
        StatementSet::from_instances(instances)
            .ok_or_else(|| errors::empty_sequence_error(file.name()))
    }

    /// Sends a prepared set to the backend: a single statement is executed on
    /// its own, a batch runs in one transaction.
    pub async fn run(&self, set: &StatementSet) -> Result<RunResult, SqlbindError> {
        for instance in set.instances() {
            ensure_executable(instance)?;
        }

        match set {
            StatementSet::Single(instance) => {
                let result = self.execute_instance(instance).await?;
                Ok(RunResult::Single(result))
            }
            StatementSet::Batch(instances) => {
                log::debug!("executing batch of {} statements", instances.len());
                let statements = instances
                    .iter()
                    .map(StatementInstance::as_backend_statement)
                    .collect::<Vec<_>>();
                let results = self.backend.batch(&statements).await?;
                Ok(RunResult::Batch(results))
            }
        }
    }

    /// Compiles `sql`, applies one set of bind values and executes it. Empty
    /// bind values leave the statement unbound.
    pub async fn execute(
        &self,
        sql: &str,
        binds: BindValues,
    ) -> Result<QueryResult, SqlbindError> {
        let statement = self.compile(sql)?;
        let instance = if binds.is_empty() {
            StatementInstance::Unbound(statement)
        } else {
            StatementInstance::Bound(statement.bind(&binds)?)
        };
        ensure_executable(&instance)?;
        self.execute_instance(&instance).await
    }

    async fn execute_instance(
        &self,
        instance: &StatementInstance,
    ) -> Result<QueryResult, SqlbindError> {
        log::debug!("executing statement: {}", instance.sql());
        self.backend.execute(instance.sql(), instance.params()).await
    }
}

fn ensure_executable(instance: &StatementInstance) -> Result<(), SqlbindError> {
    let metadata = instance.statement().bind_metadata();
    if !instance.is_bound() && metadata.accepts_binds() {
        return Err(errors::bind_arity_error(metadata.arg_count, 0));
    }
    Ok(())
}
