use crate::cli::sql::SqlOutputFormat;
use comfy_table::{presets::UTF8_BORDERS_ONLY, Cell, ContentArrangement, Row, Table};
use sqlbind_rs_sdk::sql::NormalizedStatement;
use sqlbind_rs_sdk::{QueryResult, RunResult, Value};
use serde_json::Value as JsonValue;

pub fn print_run_result(result: &RunResult, format: SqlOutputFormat) {
    match (result, format) {
        (RunResult::Single(result), SqlOutputFormat::Table) => print_query_result_table(result),
        (RunResult::Single(result), SqlOutputFormat::Json) => {
            print_json(&query_result_to_json(result))
        }
        (RunResult::Batch(results), SqlOutputFormat::Table) => {
            for (index, result) in results.iter().enumerate() {
                println!("-- statement {}", index + 1);
                print_query_result_table(result);
            }
        }
        (RunResult::Batch(results), SqlOutputFormat::Json) => print_json(&JsonValue::Array(
            results.iter().map(query_result_to_json).collect(),
        )),
    }
}

pub fn print_query_result_table(result: &QueryResult) {
    if result.columns.is_empty() && result.rows.is_empty() {
        println!("OK ({} changes)", result.meta.changes);
        return;
    }

    let mut table = new_table();
    if !result.columns.is_empty() {
        let header = Row::from(result.columns.iter().map(Cell::new).collect::<Vec<_>>());
        table.set_header(header);
    }

    for row in &result.rows {
        let rendered = Row::from(
            row.iter()
                .map(|value| Cell::new(value_to_text(value)))
                .collect::<Vec<_>>(),
        );
        table.add_row(rendered);
    }

    println!("{table}");
    println!("({} rows)", result.rows.len());
}

pub fn print_normalized_table(statements: &[NormalizedStatement]) {
    let mut table = new_table();
    table.set_header(vec!["#", "sql", "style", "args", "params"]);
    for (index, statement) in statements.iter().enumerate() {
        let metadata = &statement.bind_metadata;
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&statement.sql),
            Cell::new(metadata.style.tag()),
            Cell::new(metadata.arg_count),
            Cell::new(params_to_text(statement)),
        ]);
    }
    println!("{table}");
}

pub fn print_normalized_json(statements: &[NormalizedStatement]) {
    let payload = statements
        .iter()
        .map(|statement| {
            let metadata = &statement.bind_metadata;
            serde_json::json!({
                "sql": statement.sql,
                "style": metadata.style.tag(),
                "argCount": metadata.arg_count,
                "params": metadata.params.as_ref().map(|params| {
                    params
                        .iter()
                        .map(|(name, slot)| serde_json::json!({ "name": name, "slot": slot }))
                        .collect::<Vec<_>>()
                }),
            })
        })
        .collect::<Vec<_>>();
    print_json(&JsonValue::Array(payload));
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn print_json(payload: &JsonValue) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).unwrap_or_else(|_| "null".to_string())
    );
}

fn query_result_to_json(result: &QueryResult) -> JsonValue {
    serde_json::json!({
        "columns": result.columns,
        "rows": result
            .rows
            .iter()
            .map(|row| row.iter().map(value_to_json).collect::<Vec<_>>())
            .collect::<Vec<_>>(),
        "changes": result.meta.changes,
        "lastInsertRowid": result.meta.last_insert_rowid,
    })
}

fn params_to_text(statement: &NormalizedStatement) -> String {
    match &statement.bind_metadata.params {
        Some(params) => params
            .iter()
            .map(|(name, slot)| format!("{name}=?{}", slot + 1))
            .collect::<Vec<_>>()
            .join(", "),
        None => String::new(),
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Boolean(v) => v.to_string(),
        Value::Integer(v) => v.to_string(),
        Value::Real(v) => v.to_string(),
        Value::Text(v) => v.clone(),
        Value::Blob(bytes) => bytes_to_hex(bytes),
    }
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Boolean(v) => JsonValue::from(*v),
        Value::Integer(v) => JsonValue::from(*v),
        Value::Real(v) => serde_json::Number::from_f64(*v)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Text(v) => JsonValue::from(v.clone()),
        Value::Blob(bytes) => JsonValue::from(bytes_to_hex(bytes)),
    }
}

fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2 + 2);
    out.push_str("0x");
    for byte in bytes {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
