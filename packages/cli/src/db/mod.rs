use crate::app::AppContext;
use crate::error::CliError;
use sqlbind_rs_sdk::{open_database, Database, OpenDatabaseConfig};

pub fn open_database_for(context: &AppContext) -> Result<Database, CliError> {
    if let Some(path) = &context.db_path {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            if !parent.exists() {
                return Err(CliError::msg(format!(
                    "database directory does not exist: {}",
                    parent.display()
                )));
            }
        }
    }

    let config = OpenDatabaseConfig {
        path: context.db_path.clone(),
        dialect: context.dialect,
        ..Default::default()
    };
    open_database(config).map_err(|err| match &context.db_path {
        Some(path) => CliError::msg(format!(
            "failed to open sqlite database at {}: {err}",
            path.display()
        )),
        None => CliError::msg(format!("failed to open in-memory sqlite database: {err}")),
    })
}
