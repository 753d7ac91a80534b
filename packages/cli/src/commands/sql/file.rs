use super::parse_binds;
use crate::app::AppContext;
use crate::cli::sql::SqlFileArgs;
use crate::db;
use crate::error::CliError;
use crate::output;
use sqlbind_rs_sdk::QueryFile;

pub fn run(context: &AppContext, args: SqlFileArgs) -> Result<(), CliError> {
    let file = QueryFile::read(&args.path)
        .map_err(|source| CliError::io("failed to read query file", source))?;
    let binds = parse_binds(&args.binds)?;
    let database = db::open_database_for(context)?;

    let set = database
        .prepare_file(&file, &binds)
        .map_err(|err| CliError::sql("query file preparation failed", err))?;
    log::debug!("{}: prepared {} statement(s)", file.name(), set.len());
    let result = pollster::block_on(database.run(&set))
        .map_err(|err| CliError::sql("query file execution failed", err))?;

    output::print_run_result(&result, args.format);
    Ok(())
}
