use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlbind_engine::{
    open_database, BackendStatement, Database, OpenDatabaseConfig, QueryResult, SqlBackend,
    SqlbindError, Value,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Execute { sql: String, params: Vec<Value> },
    Batch(Vec<(String, Vec<Value>)>),
}

/// Records every call and answers with empty results, or with the configured
/// failure. Clones share one call log.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    calls: Arc<Mutex<Vec<Call>>>,
    failure: Option<String>,
}

impl RecordingBackend {
    pub fn failing(message: &str) -> Self {
        Self {
            calls: Arc::default(),
            failure: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn open(&self) -> Database {
        open_database(OpenDatabaseConfig::new(Box::new(self.clone())))
    }

    fn record(&self, call: Call) -> Result<(), SqlbindError> {
        self.calls.lock().expect("calls lock").push(call);
        match &self.failure {
            Some(message) => Err(SqlbindError::backend(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl SqlBackend for RecordingBackend {
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, SqlbindError> {
        self.record(Call::Execute {
            sql: sql.to_string(),
            params: params.to_vec(),
        })?;
        Ok(QueryResult::default())
    }

    async fn batch(
        &self,
        statements: &[BackendStatement<'_>],
    ) -> Result<Vec<QueryResult>, SqlbindError> {
        self.record(Call::Batch(
            statements
                .iter()
                .map(|statement| (statement.sql.to_string(), statement.params.to_vec()))
                .collect(),
        ))?;
        Ok(vec![QueryResult::default(); statements.len()])
    }
}
