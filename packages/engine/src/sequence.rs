use std::sync::Arc;

use crate::errors;
use crate::statement::{CompiledStatement, StatementInstance};
use crate::{BindValues, SqlbindError};

/// One element of a statement sequence: SQL text, a statement compiled
/// earlier, or a set of values binding the statement before it.
#[derive(Debug, Clone, PartialEq)]
pub enum SequenceItem {
    Source(String),
    Prepared(Arc<CompiledStatement>),
    Binds(BindValues),
}

impl SequenceItem {
    pub fn source(sql: impl Into<String>) -> Self {
        Self::Source(sql.into())
    }

    pub fn binds(values: impl Into<BindValues>) -> Self {
        Self::Binds(values.into())
    }
}

impl From<&str> for SequenceItem {
    fn from(sql: &str) -> Self {
        Self::Source(sql.to_string())
    }
}

impl From<Arc<CompiledStatement>> for SequenceItem {
    fn from(statement: Arc<CompiledStatement>) -> Self {
        Self::Prepared(statement)
    }
}

impl From<BindValues> for SequenceItem {
    fn from(values: BindValues) -> Self {
        Self::Binds(values)
    }
}

struct Pending {
    statement: Arc<CompiledStatement>,
    emitted: bool,
}

/// Walks `items` left to right. Bind values attach to the closest statement
/// before them; consecutive bind sets all bind that same statement. A
/// statement never followed by binds is emitted once, unbound.
///
/// `compile` turns a `Source` item into a statement; `Prepared` items are
/// used as they are.
pub fn parse_sequence<F>(
    items: Vec<SequenceItem>,
    entry_point: &str,
    mut compile: F,
) -> Result<Vec<StatementInstance>, SqlbindError>
where
    F: FnMut(&str) -> Result<Arc<CompiledStatement>, SqlbindError>,
{
    if items.is_empty() {
        return Err(errors::empty_sequence_error(entry_point));
    }

    let mut instances = Vec::with_capacity(items.len());
    let mut pending: Option<Pending> = None;

    for item in items {
        let statement = match item {
            SequenceItem::Binds(values) => {
                let Some(current) = pending.as_mut() else {
                    return Err(errors::binds_before_statement_error());
                };
                instances.push(StatementInstance::Bound(current.statement.bind(&values)?));
                current.emitted = true;
                continue;
            }
            SequenceItem::Source(sql) => compile(&sql)?,
            SequenceItem::Prepared(statement) => statement,
        };

        if let Some(previous) = pending.take() {
            if !previous.emitted {
                instances.push(StatementInstance::Unbound(previous.statement));
            }
        }
        pending = Some(Pending {
            statement,
            emitted: false,
        });
    }

    if let Some(last) = pending {
        if !last.emitted {
            instances.push(StatementInstance::Unbound(last.statement));
        }
    }

    log::trace!("{entry_point}: sequence produced {} statement(s)", instances.len());
    Ok(instances)
}
