use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::statement::CompiledStatement;
use crate::SqlbindError;

/// What a cache entry was compiled from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
    /// A single statement given as SQL text.
    Sql(String),
    /// A named multi-statement unit, keyed by its text as well as its name.
    File { name: String, sql: String },
}

/// Compiled statements for one connection. Owned by the connection wrapper,
/// so entries live exactly as long as the connection does. Entries are never
/// replaced: a hit returns the same `Arc`s the first compilation produced.
#[derive(Debug, Default)]
pub struct StatementCache {
    inner: RwLock<HashMap<SourceKey, Vec<Arc<CompiledStatement>>>>,
}

impl StatementCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// `compile` runs at most once per key. It must not block on I/O; it is
    /// called while the cache is write-locked so concurrent callers observe
    /// a single compilation.
    pub fn get_or_create<F>(
        &self,
        key: SourceKey,
        compile: F,
    ) -> Result<Vec<Arc<CompiledStatement>>, SqlbindError>
    where
        F: FnOnce() -> Result<Vec<CompiledStatement>, SqlbindError>,
    {
        {
            let guard = self.inner.read().unwrap_or_else(|poison| poison.into_inner());
            if let Some(hit) = guard.get(&key) {
                return Ok(hit.clone());
            }
        }

        let mut guard = self.inner.write().unwrap_or_else(|poison| poison.into_inner());
        if let Some(hit) = guard.get(&key) {
            return Ok(hit.clone());
        }

        log::debug!("statement cache miss for {key:?}; compiling");
        let compiled = compile()?
            .into_iter()
            .map(Arc::new)
            .collect::<Vec<_>>();
        guard.insert(key, compiled.clone());
        Ok(compiled)
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Arc;

    use super::{SourceKey, StatementCache};
    use crate::sql::{normalize, SqlParser};
    use crate::statement::CompiledStatement;
    use crate::ErrorCode;

    fn compile_once(sql: &str) -> Vec<CompiledStatement> {
        let normalized = normalize(&SqlParser::default(), sql).expect("normalize");
        vec![CompiledStatement::new(sql, normalized)]
    }

    #[test]
    fn repeated_lookups_return_identical_statements() {
        let cache = StatementCache::new();
        let calls = Cell::new(0);
        let key = SourceKey::Sql("SELECT ?".to_string());

        let first = cache
            .get_or_create(key.clone(), || {
                calls.set(calls.get() + 1);
                Ok(compile_once("SELECT ?"))
            })
            .expect("first lookup");
        let second = cache
            .get_or_create(key, || {
                calls.set(calls.get() + 1);
                Ok(compile_once("SELECT ?"))
            })
            .expect("second lookup");

        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first[0], &second[0]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn sql_and_file_keys_are_separate_entries() {
        let cache = StatementCache::new();
        let text = "SELECT 1".to_string();

        let sql = cache
            .get_or_create(SourceKey::Sql(text.clone()), || Ok(compile_once("SELECT 1")))
            .expect("sql entry");
        let file = cache
            .get_or_create(
                SourceKey::File {
                    name: "one.sql".to_string(),
                    sql: text,
                },
                || Ok(compile_once("SELECT 1")),
            )
            .expect("file entry");

        assert!(!Arc::ptr_eq(&sql[0], &file[0]));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_compilation_is_not_cached() {
        let cache = StatementCache::new();
        let key = SourceKey::Sql("SELEC".to_string());

        let error = cache
            .get_or_create(key.clone(), || {
                normalize(&SqlParser::default(), "SELEC").map(|_| Vec::new())
            })
            .expect_err("compile should fail");
        assert_eq!(error.code, ErrorCode::Syntax);
        assert!(cache.is_empty());

        let retried = cache
            .get_or_create(key, || Ok(compile_once("SELECT 1")))
            .expect("retry should compile");
        assert_eq!(retried.len(), 1);
    }
}
