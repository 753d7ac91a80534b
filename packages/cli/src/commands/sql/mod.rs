mod execute;
mod file;
mod normalize;

use crate::app::AppContext;
use crate::cli::sql::{SqlCommand, SqlSubcommand};
use crate::error::CliError;
use sqlbind_rs_sdk::BindValues;
use std::io::Read;

pub fn run(context: &AppContext, command: SqlCommand) -> Result<(), CliError> {
    match command.command {
        SqlSubcommand::Normalize(args) => normalize::run(context, args),
        SqlSubcommand::Execute(args) => execute::run(context, args),
        SqlSubcommand::File(args) => file::run(context, args),
    }
}

fn resolve_sql(sql: &str) -> Result<String, CliError> {
    if sql == "-" {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .map_err(|source| CliError::io("failed to read SQL from stdin", source))?;
        if input.trim().is_empty() {
            return Err(CliError::InvalidArgs("stdin SQL input is empty"));
        }
        return Ok(input);
    }

    Ok(sql.to_string())
}

pub(crate) fn parse_binds(raw: &[String]) -> Result<Vec<BindValues>, CliError> {
    raw.iter()
        .map(|text| {
            let json = serde_json::from_str::<serde_json::Value>(text)
                .map_err(|err| CliError::msg(format!("invalid --bind JSON '{text}': {err}")))?;
            BindValues::from_json(&json).map_err(|err| CliError::sql("invalid --bind value", err))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_binds;
    use sqlbind_rs_sdk::{BindValues, Value};

    #[test]
    fn parses_positional_and_named_binds() {
        let binds = parse_binds(&[
            "[1, \"a\", null, true]".to_string(),
            "{\"id\": 2.5}".to_string(),
        ])
        .expect("binds should parse");

        assert_eq!(
            binds[0],
            BindValues::Positional(vec![
                Value::Integer(1),
                Value::Text("a".to_string()),
                Value::Null,
                Value::Boolean(true),
            ])
        );
        let BindValues::Named(map) = &binds[1] else {
            panic!("expected named binds");
        };
        assert_eq!(map.get("id"), Some(&Value::Real(2.5)));
    }

    #[test]
    fn rejects_scalar_and_malformed_binds() {
        assert!(parse_binds(&["42".to_string()]).is_err());
        assert!(parse_binds(&["[1,".to_string()]).is_err());
    }
}
