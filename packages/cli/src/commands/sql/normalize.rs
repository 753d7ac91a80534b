use super::resolve_sql;
use crate::app::AppContext;
use crate::cli::sql::{SqlNormalizeArgs, SqlOutputFormat};
use crate::error::CliError;
use crate::output;
use sqlbind_rs_sdk::sql::{normalize_statements, SqlParser};

pub fn run(context: &AppContext, args: SqlNormalizeArgs) -> Result<(), CliError> {
    let sql = resolve_sql(&args.sql)?;
    let parser = SqlParser::new(context.dialect);
    let statements = normalize_statements(&parser, &sql, args.multiple)
        .map_err(|err| CliError::sql("sql normalization failed", err))?;

    match args.format {
        SqlOutputFormat::Json => output::print_normalized_json(&statements),
        SqlOutputFormat::Table => output::print_normalized_table(&statements),
    }

    Ok(())
}
