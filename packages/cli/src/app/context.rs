use sqlbind_rs_sdk::SqlDialect;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppContext {
    pub db_path: Option<PathBuf>,
    pub dialect: SqlDialect,
}
