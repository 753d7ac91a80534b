use std::sync::Arc;

use crate::backend::BackendStatement;
use crate::sql::{map_binds, BindMetadata, NormalizedStatement};
use crate::{BindValues, SqlbindError, Value};

/// A statement ready for the backend. Shared through `Arc`: the statement
/// cache hands out the same allocation on every hit.
#[derive(Debug, PartialEq, Eq)]
pub struct CompiledStatement {
    source: String,
    sql: String,
    bind_metadata: BindMetadata,
}

impl CompiledStatement {
    pub fn new(source: impl Into<String>, normalized: NormalizedStatement) -> Self {
        Self {
            source: source.into(),
            sql: normalized.sql,
            bind_metadata: normalized.bind_metadata,
        }
    }

    /// The text this statement was compiled from, before normalization.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn bind_metadata(&self) -> &BindMetadata {
        &self.bind_metadata
    }

    pub fn bind(self: &Arc<Self>, values: &BindValues) -> Result<BoundStatement, SqlbindError> {
        let params = map_binds(&self.bind_metadata, values)?;
        Ok(BoundStatement {
            statement: Arc::clone(self),
            params,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    statement: Arc<CompiledStatement>,
    params: Vec<Value>,
}

impl BoundStatement {
    pub fn statement(&self) -> &Arc<CompiledStatement> {
        &self.statement
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementInstance {
    Unbound(Arc<CompiledStatement>),
    Bound(BoundStatement),
}

impl StatementInstance {
    pub fn statement(&self) -> &Arc<CompiledStatement> {
        match self {
            Self::Unbound(statement) => statement,
            Self::Bound(bound) => bound.statement(),
        }
    }

    pub fn sql(&self) -> &str {
        self.statement().sql()
    }

    pub fn params(&self) -> &[Value] {
        match self {
            Self::Unbound(_) => &[],
            Self::Bound(bound) => bound.params(),
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }

    pub(crate) fn as_backend_statement(&self) -> BackendStatement<'_> {
        BackendStatement {
            sql: self.sql(),
            params: self.params(),
        }
    }
}

impl From<BoundStatement> for StatementInstance {
    fn from(bound: BoundStatement) -> Self {
        Self::Bound(bound)
    }
}

impl From<Arc<CompiledStatement>> for StatementInstance {
    fn from(statement: Arc<CompiledStatement>) -> Self {
        Self::Unbound(statement)
    }
}

/// Result shape used at every public entry point: one instance stays a
/// single statement, two or more become a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementSet {
    Single(StatementInstance),
    Batch(Vec<StatementInstance>),
}

impl StatementSet {
    /// `None` for an empty list.
    pub fn from_instances(mut instances: Vec<StatementInstance>) -> Option<Self> {
        match instances.len() {
            0 => None,
            1 => instances.pop().map(Self::Single),
            _ => Some(Self::Batch(instances)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Batch(instances) => instances.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn instances(&self) -> &[StatementInstance] {
        match self {
            Self::Single(instance) => std::slice::from_ref(instance),
            Self::Batch(instances) => instances,
        }
    }
}
