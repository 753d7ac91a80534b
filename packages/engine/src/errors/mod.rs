use crate::sql::BindStyle;
use crate::SqlbindError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Syntax,
    BindStyle,
    MultiStatement,
    EmptySequence,
    SequenceOrder,
    BindShape,
    BindUnknownParam,
    BindArity,
    BindCountMismatch,
    Backend,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Syntax => "SQLBIND_ERROR_SYNTAX",
            Self::BindStyle => "SQLBIND_ERROR_BIND_STYLE",
            Self::MultiStatement => "SQLBIND_ERROR_MULTI_STATEMENT",
            Self::EmptySequence => "SQLBIND_ERROR_EMPTY_SEQUENCE",
            Self::SequenceOrder => "SQLBIND_ERROR_SEQUENCE_ORDER",
            Self::BindShape => "SQLBIND_ERROR_BIND_SHAPE",
            Self::BindUnknownParam => "SQLBIND_ERROR_BIND_UNKNOWN_PARAM",
            Self::BindArity => "SQLBIND_ERROR_BIND_ARITY",
            Self::BindCountMismatch => "SQLBIND_ERROR_BIND_COUNT_MISMATCH",
            Self::Backend => "SQLBIND_ERROR_BACKEND",
        }
    }

    pub const fn all() -> &'static [Self] {
        &[
            Self::Syntax,
            Self::BindStyle,
            Self::MultiStatement,
            Self::EmptySequence,
            Self::SequenceOrder,
            Self::BindShape,
            Self::BindUnknownParam,
            Self::BindArity,
            Self::BindCountMismatch,
            Self::Backend,
        ]
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn syntax_error(source: sqlparser::parser::ParserError) -> SqlbindError {
    SqlbindError::new(ErrorCode::Syntax, source.to_string()).with_source(source)
}

pub(crate) fn invalid_placeholder_error(token: &str) -> SqlbindError {
    SqlbindError::new(
        ErrorCode::Syntax,
        format!("invalid SQL placeholder '{token}'"),
    )
}

pub(crate) fn mixed_bind_style_error(expected: BindStyle, found: BindStyle) -> SqlbindError {
    SqlbindError::new(
        ErrorCode::BindStyle,
        format!(
            "cannot mix bind parameter styles; expected '{}' but found '{}'",
            expected.token(),
            found.token()
        ),
    )
}

pub(crate) fn multiple_statements_error() -> SqlbindError {
    SqlbindError::new(
        ErrorCode::MultiStatement,
        "multiple statements found, but allowMultiple is false",
    )
}

pub(crate) fn empty_sequence_error(entry_point: &str) -> SqlbindError {
    SqlbindError::new(
        ErrorCode::EmptySequence,
        format!("no statements provided to {entry_point}"),
    )
}

pub(crate) fn binds_before_statement_error() -> SqlbindError {
    SqlbindError::new(
        ErrorCode::SequenceOrder,
        "bind arguments given before statement in input list",
    )
}

pub(crate) fn no_parameters_accepted_error() -> SqlbindError {
    SqlbindError::new(
        ErrorCode::BindArity,
        "statement does not accept any bind parameters",
    )
}

pub(crate) fn positional_with_named_error() -> SqlbindError {
    SqlbindError::new(
        ErrorCode::BindShape,
        "an array of bind values cannot be used with named parameters",
    )
}

pub(crate) fn named_without_named_error() -> SqlbindError {
    SqlbindError::new(
        ErrorCode::BindShape,
        "an object of bind values can only be used with named parameters",
    )
}

pub(crate) fn scalar_bind_values_error(json: &serde_json::Value) -> SqlbindError {
    SqlbindError::new(
        ErrorCode::BindShape,
        format!("bind values must be a JSON array or object, got {json}"),
    )
}

pub(crate) fn unknown_bind_parameter_error(key: &str) -> SqlbindError {
    SqlbindError::new(
        ErrorCode::BindUnknownParam,
        format!("'{key}' is not a valid bind parameter for this query"),
    )
}

pub(crate) fn bind_arity_error(expected: usize, got: usize) -> SqlbindError {
    SqlbindError::new(
        ErrorCode::BindArity,
        format!("incorrect number of bind parameters; expected {expected}, got {got}"),
    )
}

pub(crate) fn bind_count_mismatch_error(bindable: usize, provided: usize) -> SqlbindError {
    SqlbindError::new(
        ErrorCode::BindCountMismatch,
        format!(
            "query file contains {bindable} bindable statements, but {provided} bind(s) provided"
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::{
        bind_arity_error, bind_count_mismatch_error, mixed_bind_style_error, ErrorCode,
    };
    use crate::sql::{BindStyle, NamedPrefix};
    use std::collections::HashSet;

    #[test]
    fn error_code_strings_are_unique() {
        let mut seen = HashSet::new();
        for code in ErrorCode::all() {
            let inserted = seen.insert(code.as_str());
            assert!(inserted, "duplicate error code string: {}", code.as_str());
        }
    }

    #[test]
    fn constructors_include_code() {
        assert_eq!(bind_arity_error(2, 1).code, ErrorCode::BindArity);
        assert_eq!(
            bind_count_mismatch_error(2, 1).code,
            ErrorCode::BindCountMismatch
        );
    }

    #[test]
    fn style_error_names_both_tokens() {
        let error = mixed_bind_style_error(
            BindStyle::Numbered,
            BindStyle::Named(NamedPrefix::Dollar),
        );
        assert_eq!(
            error.to_string(),
            "cannot mix bind parameter styles; expected '?#' but found '$'"
        );
    }

    #[test]
    fn count_mismatch_message_reports_exact_counts() {
        assert_eq!(
            bind_count_mismatch_error(2, 1).to_string(),
            "query file contains 2 bindable statements, but 1 bind(s) provided"
        );
    }
}
