use std::path::Path;
use std::sync::Arc;

use crate::errors;
use crate::sql::{normalize_statement, SqlParser};
use crate::statement::{CompiledStatement, StatementInstance};
use crate::{BindValues, SqlbindError};

/// Spreads caller supplied bind sets over a fixed group of statements.
///
/// - no bind sets: every statement is returned unbound
/// - one bind set per bindable statement: applied in order, statements
///   without parameters pass through
/// - a single bindable statement: one bound copy per bind set
pub fn reconcile(
    statements: &[Arc<CompiledStatement>],
    bindable_indices: &[usize],
    supplied_binds: &[BindValues],
) -> Result<Vec<StatementInstance>, SqlbindError> {
    if supplied_binds.is_empty() {
        return Ok(statements
            .iter()
            .cloned()
            .map(StatementInstance::Unbound)
            .collect());
    }

    if supplied_binds.len() == bindable_indices.len() {
        let mut binds = supplied_binds.iter();
        let mut instances = Vec::with_capacity(statements.len());
        for (index, statement) in statements.iter().enumerate() {
            if !bindable_indices.contains(&index) {
                instances.push(StatementInstance::Unbound(Arc::clone(statement)));
                continue;
            }
            let Some(values) = binds.next() else {
                return Err(errors::bind_count_mismatch_error(
                    bindable_indices.len(),
                    supplied_binds.len(),
                ));
            };
            instances.push(StatementInstance::Bound(statement.bind(values)?));
        }
        return Ok(instances);
    }

    if let [statement] = statements {
        if bindable_indices == [0] {
            return supplied_binds
                .iter()
                .map(|values| statement.bind(values).map(StatementInstance::Bound))
                .collect();
        }
    }

    Err(errors::bind_count_mismatch_error(
        bindable_indices.len(),
        supplied_binds.len(),
    ))
}

/// A named unit of one or more statements, such as the contents of a `.sql`
/// file, normalized up front.
#[derive(Debug, Clone)]
pub struct QueryFile {
    name: String,
    sql: String,
}

impl QueryFile {
    pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
        }
    }

    pub fn read(path: &Path) -> Result<Self, std::io::Error> {
        let sql = std::fs::read_to_string(path)?;
        Ok(Self::new(path.display().to_string(), sql))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn compile(&self, parser: &SqlParser) -> Result<Vec<CompiledStatement>, SqlbindError> {
        let statements = parser.parse(&self.sql)?;
        if statements.is_empty() {
            return Err(errors::empty_sequence_error(&self.name));
        }
        statements
            .into_iter()
            .map(|statement| {
                let source = parser.render(&statement);
                let normalized = normalize_statement(parser, statement)?;
                Ok(CompiledStatement::new(source, normalized))
            })
            .collect()
    }
}

pub fn bindable_indices(statements: &[Arc<CompiledStatement>]) -> Vec<usize> {
    statements
        .iter()
        .enumerate()
        .filter(|(_, statement)| statement.bind_metadata().accepts_binds())
        .map(|(index, _)| index)
        .collect()
}
