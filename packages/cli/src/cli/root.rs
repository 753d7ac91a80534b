use super::sql::SqlCommand;
use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use sqlbind_rs_sdk::SqlDialect;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sqlbind")]
#[command(about = "Normalize, bind and run parameterized SQL")]
pub struct Cli {
    /// Path to a SQLite database file. An in-memory database is used when omitted.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub path: Option<PathBuf>,

    /// SQL dialect used to parse statements.
    #[arg(long, global = true, value_enum, default_value_t = DialectArg::Sqlite)]
    pub dialect: DialectArg,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Work with SQL text and query files.
    Sql(SqlCommand),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum DialectArg {
    Sqlite,
    Generic,
}

impl From<DialectArg> for SqlDialect {
    fn from(value: DialectArg) -> Self {
        match value {
            DialectArg::Sqlite => SqlDialect::Sqlite,
            DialectArg::Generic => SqlDialect::Generic,
        }
    }
}
