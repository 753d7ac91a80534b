use super::{parse_binds, resolve_sql};
use crate::app::AppContext;
use crate::cli::sql::SqlExecuteArgs;
use crate::db;
use crate::error::CliError;
use crate::output;
use sqlbind_rs_sdk::SequenceItem;

pub fn run(context: &AppContext, args: SqlExecuteArgs) -> Result<(), CliError> {
    let sql = resolve_sql(&args.sql)?;
    let binds = parse_binds(&args.binds)?;
    let database = db::open_database_for(context)?;

    let mut items = Vec::with_capacity(binds.len() + 1);
    items.push(SequenceItem::source(sql));
    items.extend(binds.into_iter().map(SequenceItem::Binds));

    let set = database
        .prepare(items)
        .map_err(|err| CliError::sql("sql preparation failed", err))?;
    let result = pollster::block_on(database.run(&set))
        .map_err(|err| CliError::sql("sql execution failed", err))?;

    output::print_run_result(&result, args.format);
    Ok(())
}
