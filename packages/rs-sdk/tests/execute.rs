use std::collections::BTreeMap;

use sqlbind_rs_sdk::{
    open_database, BindValues, Database, ErrorCode, OpenDatabaseConfig, QueryFile, RunResult,
    SequenceItem, Value,
};

fn named(entries: &[(&str, Value)]) -> BindValues {
    BindValues::Named(
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect::<BTreeMap<_, _>>(),
    )
}

async fn database_with_users() -> Database {
    let database =
        open_database(OpenDatabaseConfig::default()).expect("open_database should succeed");
    database
        .execute(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, active INTEGER)",
            BindValues::Positional(Vec::new()),
        )
        .await
        .expect("schema setup should succeed");
    database
}

#[tokio::test]
async fn select_works_with_default_in_memory_sqlite() {
    let database =
        open_database(OpenDatabaseConfig::default()).expect("open_database should succeed");

    let result = database
        .execute("SELECT 1 + 1", BindValues::Positional(Vec::new()))
        .await
        .expect("select should succeed");

    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0][0], Value::Integer(2));
}

#[tokio::test]
async fn named_binds_are_reordered_for_sqlite() {
    let database = database_with_users().await;

    database
        .execute(
            "INSERT INTO users (id, name, active) VALUES (:id, :name, :active)",
            named(&[
                ("name", Value::from("ada")),
                ("active", Value::Boolean(true)),
                ("id", Value::Integer(7)),
            ]),
        )
        .await
        .expect("insert should succeed");

    let result = database
        .execute(
            "SELECT name, active FROM users WHERE id = $id",
            named(&[("id", Value::Integer(7))]),
        )
        .await
        .expect("select should succeed");

    assert_eq!(
        result.rows,
        vec![vec![Value::Text("ada".to_string()), Value::Integer(1)]]
    );
}

#[tokio::test]
async fn one_insert_bound_many_times_runs_as_a_batch() {
    let database = database_with_users().await;

    let set = database
        .prepare(vec![
            SequenceItem::from("INSERT INTO users (name) VALUES (?)"),
            SequenceItem::binds(vec![Value::from("a")]),
            SequenceItem::binds(vec![Value::from("b")]),
            SequenceItem::binds(vec![Value::from("c")]),
            SequenceItem::from("SELECT COUNT(*) FROM users"),
        ])
        .expect("prepare should succeed");
    let result = database.run(&set).await.expect("batch should succeed");

    let RunResult::Batch(results) = result else {
        panic!("expected a batch result");
    };
    assert_eq!(results.len(), 4);
    assert_eq!(results[3].rows[0][0], Value::Integer(3));
}

#[tokio::test]
async fn numbered_gaps_take_a_value_for_every_slot() {
    let database = database_with_users().await;

    let result = database
        .execute(
            "SELECT ?1 + ?3",
            BindValues::Positional(vec![Value::Integer(1), Value::Null, Value::Integer(2)]),
        )
        .await
        .expect("select should succeed");
    assert_eq!(result.rows[0][0], Value::Integer(3));

    let error = database
        .execute(
            "SELECT ?1 + ?3",
            BindValues::Positional(vec![Value::Integer(1), Value::Integer(2)]),
        )
        .await
        .expect_err("two values for three slots should fail");
    assert_eq!(
        error.to_string(),
        "incorrect number of bind parameters; expected 3, got 2"
    );
}

#[tokio::test]
async fn query_file_fans_out_and_persists_rows() {
    let database = database_with_users().await;
    let file = QueryFile::new("insert_user.sql", "INSERT INTO users (name) VALUES (@name)");

    let set = database
        .prepare_file(
            &file,
            &[
                named(&[("name", Value::from("admin"))]),
                named(&[("name", Value::from("editor"))]),
            ],
        )
        .expect("prepare_file should succeed");
    database.run(&set).await.expect("run should succeed");

    let result = database
        .execute(
            "SELECT name FROM users ORDER BY id",
            BindValues::Positional(Vec::new()),
        )
        .await
        .expect("select should succeed");
    assert_eq!(
        result.rows,
        vec![
            vec![Value::Text("admin".to_string())],
            vec![Value::Text("editor".to_string())],
        ]
    );
}

#[tokio::test]
async fn failing_batch_leaves_no_partial_writes() {
    let database = database_with_users().await;

    let set = database
        .prepare(vec![
            SequenceItem::from("INSERT INTO users (id, name) VALUES (?, ?)"),
            SequenceItem::binds(vec![Value::Integer(1), Value::from("a")]),
            SequenceItem::binds(vec![Value::Integer(1), Value::from("duplicate")]),
        ])
        .expect("prepare should succeed");
    let error = database.run(&set).await.expect_err("duplicate id should fail");
    assert_eq!(error.code, ErrorCode::Backend);

    let result = database
        .execute("SELECT COUNT(*) FROM users", BindValues::Positional(Vec::new()))
        .await
        .expect("count should succeed");
    assert_eq!(result.rows[0][0], Value::Integer(0));
}

#[tokio::test]
async fn file_backed_database_persists_between_opens() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("app.sqlite");

    {
        let database = open_database(OpenDatabaseConfig {
            path: Some(path.clone()),
            ..Default::default()
        })
        .expect("open_database should succeed");
        database
            .execute("CREATE TABLE notes (body TEXT)", BindValues::Positional(Vec::new()))
            .await
            .expect("create should succeed");
        database
            .execute(
                "INSERT INTO notes (body) VALUES (?)",
                BindValues::Positional(vec![Value::from("kept")]),
            )
            .await
            .expect("insert should succeed");
    }

    let reopened = open_database(OpenDatabaseConfig {
        path: Some(path),
        ..Default::default()
    })
    .expect("reopen should succeed");
    let result = reopened
        .execute("SELECT body FROM notes", BindValues::Positional(Vec::new()))
        .await
        .expect("select should succeed");
    assert_eq!(result.rows, vec![vec![Value::Text("kept".to_string())]]);
}
