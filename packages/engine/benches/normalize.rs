use criterion::{criterion_group, criterion_main, Criterion};
use sqlbind_engine::sql::{normalize, SqlParser};
use sqlbind_engine::{
    open_database, BackendStatement, OpenDatabaseConfig, QueryResult, SqlBackend, SqlbindError,
    Value,
};
use std::hint::black_box;

const NAMED_UPDATE_SQL: &str = "UPDATE accounts SET name = :name, email = :email, \
     updated_at = :updated_at WHERE id = :id AND tenant_id = :tenant_id";
const ANONYMOUS_INSERT_SQL: &str =
    "INSERT INTO events (id, kind, payload, created_at) VALUES (?, ?, ?, ?)";

struct NullBackend;

#[async_trait::async_trait(?Send)]
impl SqlBackend for NullBackend {
    async fn execute(&self, _sql: &str, _params: &[Value]) -> Result<QueryResult, SqlbindError> {
        Ok(QueryResult::default())
    }

    async fn batch(
        &self,
        statements: &[BackendStatement<'_>],
    ) -> Result<Vec<QueryResult>, SqlbindError> {
        Ok(vec![QueryResult::default(); statements.len()])
    }
}

fn bench_normalize_named(c: &mut Criterion) {
    let parser = SqlParser::default();
    c.bench_function("normalize_named_update", |b| {
        b.iter(|| {
            let normalized = normalize(&parser, black_box(NAMED_UPDATE_SQL))
                .expect("normalize should succeed");
            black_box(normalized.bind_metadata.arg_count);
        });
    });
}

fn bench_normalize_anonymous(c: &mut Criterion) {
    let parser = SqlParser::default();
    c.bench_function("normalize_anonymous_insert", |b| {
        b.iter(|| {
            let normalized = normalize(&parser, black_box(ANONYMOUS_INSERT_SQL))
                .expect("normalize should succeed");
            black_box(normalized.sql.len());
        });
    });
}

fn bench_cached_compile(c: &mut Criterion) {
    let database = open_database(OpenDatabaseConfig::new(Box::new(NullBackend)));
    database
        .compile(NAMED_UPDATE_SQL)
        .expect("warm-up compile should succeed");

    c.bench_function("compile_cache_hit", |b| {
        b.iter(|| {
            let statement = database
                .compile(black_box(NAMED_UPDATE_SQL))
                .expect("cached compile should succeed");
            black_box(statement.bind_metadata().arg_count);
        });
    });
}

criterion_group!(
    benches,
    bench_normalize_named,
    bench_normalize_anonymous,
    bench_cached_compile
);
criterion_main!(benches);
