use clap::{Args, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SqlCommand {
    #[command(subcommand)]
    pub command: SqlSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum SqlSubcommand {
    /// Print the canonical form of SQL text. Use '-' to read SQL from stdin.
    Normalize(SqlNormalizeArgs),
    /// Execute SQL text. Use '-' to read SQL from stdin.
    Execute(SqlExecuteArgs),
    /// Execute the statements of a query file.
    File(SqlFileArgs),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SqlOutputFormat {
    Table,
    Json,
}

#[derive(Debug, Args)]
pub struct SqlNormalizeArgs {
    /// Output format for normalized statements.
    #[arg(long, value_enum, default_value_t = SqlOutputFormat::Table)]
    pub format: SqlOutputFormat,

    /// Accept SQL text containing more than one statement.
    #[arg(long)]
    pub multiple: bool,

    /// SQL text to normalize. Use '-' to read from stdin.
    pub sql: String,
}

#[derive(Debug, Args)]
pub struct SqlExecuteArgs {
    /// Output format for query results.
    #[arg(long, value_enum, default_value_t = SqlOutputFormat::Table)]
    pub format: SqlOutputFormat,

    /// Bind values as a JSON array or object. Repeat to run the statement once per set.
    #[arg(long = "bind", value_name = "JSON")]
    pub binds: Vec<String>,

    /// SQL query text to execute. Use '-' to read from stdin.
    pub sql: String,
}

#[derive(Debug, Args)]
pub struct SqlFileArgs {
    /// Output format for query results.
    #[arg(long, value_enum, default_value_t = SqlOutputFormat::Table)]
    pub format: SqlOutputFormat,

    /// Bind values as a JSON array or object, one per bindable statement or
    /// one per run of a single-statement file.
    #[arg(long = "bind", value_name = "JSON")]
    pub binds: Vec<String>,

    /// Path to the query file.
    #[arg(value_hint = ValueHint::FilePath)]
    pub path: PathBuf,
}
