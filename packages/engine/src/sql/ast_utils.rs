use sqlparser::ast::Statement;
use sqlparser::dialect::{Dialect, GenericDialect, SQLiteDialect};
use sqlparser::parser::Parser;

use crate::errors;
use crate::{SqlDialect, SqlbindError};

/// Text to AST and back. Holds no state besides the dialect, so a single
/// instance is shared by everything that parses on behalf of a database.
#[derive(Debug)]
pub struct SqlParser {
    dialect: SqlDialect,
}

impl SqlParser {
    pub fn new(dialect: SqlDialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    pub fn parse(&self, sql: &str) -> Result<Vec<Statement>, SqlbindError> {
        Parser::parse_sql(self.sqlparser_dialect(), sql).map_err(errors::syntax_error)
    }

    pub fn render(&self, statement: &Statement) -> String {
        statement.to_string()
    }

    fn sqlparser_dialect(&self) -> &'static dyn Dialect {
        match self.dialect {
            SqlDialect::Sqlite => &SQLiteDialect {},
            SqlDialect::Generic => &GenericDialect {},
        }
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::new(SqlDialect::default())
    }
}
