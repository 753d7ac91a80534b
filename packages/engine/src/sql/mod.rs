mod ast_utils;
mod params;
mod placeholders;

pub use ast_utils::SqlParser;
pub use params::map_binds;
pub use placeholders::{
    normalize, normalize_statement, normalize_statements, BindMetadata, BindStyle, NamedPrefix,
    NormalizedStatement,
};
