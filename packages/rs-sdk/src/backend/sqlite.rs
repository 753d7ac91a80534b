use async_trait::async_trait;
use rusqlite::{params_from_iter, Connection, Row};
use sqlbind_engine::{BackendStatement, ExecutionMeta, QueryResult, SqlBackend, SqlbindError, Value};
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    pub fn in_memory() -> Result<Self, SqlbindError> {
        let conn = Connection::open_in_memory().map_err(backend_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, SqlbindError> {
        let conn = Connection::open(path).map_err(backend_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait(?Send)]
impl SqlBackend for SqliteBackend {
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, SqlbindError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| SqlbindError::backend("sqlite mutex poisoned"))?;
        run_statement(&conn, sql, params)
    }

    async fn batch(
        &self,
        statements: &[BackendStatement<'_>],
    ) -> Result<Vec<QueryResult>, SqlbindError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| SqlbindError::backend("sqlite mutex poisoned"))?;

        // Dropping the transaction without commit rolls it back.
        let tx = conn.transaction().map_err(backend_error)?;
        let mut results = Vec::with_capacity(statements.len());
        for statement in statements {
            results.push(run_statement(&tx, statement.sql, statement.params)?);
        }
        tx.commit().map_err(backend_error)?;
        log::debug!("sqlite batch committed {} statements", results.len());
        Ok(results)
    }
}

fn run_statement(conn: &Connection, sql: &str, params: &[Value]) -> Result<QueryResult, SqlbindError> {
    let started = Instant::now();
    let mut stmt = conn.prepare_cached(sql).map_err(backend_error)?;
    let columns = stmt
        .column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect::<Vec<_>>();
    let bound_params = params.iter().cloned().map(to_sql_value);

    let mut rows = stmt.query(params_from_iter(bound_params)).map_err(backend_error)?;
    let mut result_rows = Vec::new();
    while let Some(row) = rows.next().map_err(backend_error)? {
        result_rows.push(map_row(row)?);
    }
    drop(rows);
    drop(stmt);

    let meta = if columns.is_empty() {
        ExecutionMeta {
            changes: conn.changes() as u64,
            last_insert_rowid: Some(conn.last_insert_rowid()),
            duration: started.elapsed(),
        }
    } else {
        ExecutionMeta {
            changes: 0,
            last_insert_rowid: None,
            duration: started.elapsed(),
        }
    };

    Ok(QueryResult {
        columns,
        rows: result_rows,
        meta,
    })
}

fn map_row(row: &Row<'_>) -> Result<Vec<Value>, SqlbindError> {
    let mut values = Vec::new();
    for idx in 0..row.as_ref().column_count() {
        let value = row.get_ref(idx).map_err(backend_error)?;
        values.push(match value {
            rusqlite::types::ValueRef::Null => Value::Null,
            rusqlite::types::ValueRef::Integer(value) => Value::Integer(value),
            rusqlite::types::ValueRef::Real(value) => Value::Real(value),
            rusqlite::types::ValueRef::Text(value) => {
                Value::Text(String::from_utf8_lossy(value).to_string())
            }
            rusqlite::types::ValueRef::Blob(value) => Value::Blob(value.to_vec()),
        });
    }
    Ok(values)
}

fn to_sql_value(value: Value) -> rusqlite::types::Value {
    match value {
        Value::Null => rusqlite::types::Value::Null,
        Value::Boolean(value) => rusqlite::types::Value::Integer(i64::from(value)),
        Value::Integer(value) => rusqlite::types::Value::Integer(value),
        Value::Real(value) => rusqlite::types::Value::Real(value),
        Value::Text(value) => rusqlite::types::Value::Text(value),
        Value::Blob(value) => rusqlite::types::Value::Blob(value),
    }
}

fn backend_error(err: rusqlite::Error) -> SqlbindError {
    SqlbindError::backend(err.to_string()).with_source(err)
}
