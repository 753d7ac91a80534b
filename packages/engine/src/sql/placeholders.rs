use std::collections::HashMap;
use std::ops::ControlFlow;

use sqlparser::ast::{Expr, Statement, Value as SqlValue, VisitMut, VisitorMut};

use super::SqlParser;
use crate::errors;
use crate::SqlbindError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum NamedPrefix {
    Colon,
    Dollar,
    At,
}

impl NamedPrefix {
    pub const fn as_char(self) -> char {
        match self {
            Self::Colon => ':',
            Self::Dollar => '$',
            Self::At => '@',
        }
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            ':' => Some(Self::Colon),
            '$' => Some(Self::Dollar),
            '@' => Some(Self::At),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BindStyle {
    #[default]
    Anonymous,
    Numbered,
    Named(NamedPrefix),
}

impl BindStyle {
    /// The token used for this style in bind style error messages.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Anonymous => "?",
            Self::Numbered => "?#",
            Self::Named(NamedPrefix::Colon) => ":",
            Self::Named(NamedPrefix::Dollar) => "$",
            Self::Named(NamedPrefix::At) => "@",
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Numbered => "numbered",
            Self::Named(_) => "named",
        }
    }

    pub const fn is_named(self) -> bool {
        matches!(self, Self::Named(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BindMetadata {
    pub style: BindStyle,
    pub arg_count: usize,
    /// Named parameters and their zero-based slots, in first-seen order.
    /// `None` unless the style is named.
    pub params: Option<Vec<(String, usize)>>,
}

impl BindMetadata {
    pub fn anonymous(arg_count: usize) -> Self {
        Self {
            style: BindStyle::Anonymous,
            arg_count,
            params: None,
        }
    }

    pub fn numbered(arg_count: usize) -> Self {
        Self {
            style: BindStyle::Numbered,
            arg_count,
            params: None,
        }
    }

    pub fn named(prefix: NamedPrefix, params: Vec<(String, usize)>) -> Self {
        Self {
            style: BindStyle::Named(prefix),
            arg_count: params.len(),
            params: Some(params),
        }
    }

    pub fn slot(&self, name: &str) -> Option<usize> {
        self.params
            .as_ref()?
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, slot)| *slot)
    }

    pub fn accepts_binds(&self) -> bool {
        self.arg_count > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedStatement {
    pub sql: String,
    pub bind_metadata: BindMetadata,
}

/// Normalizes text that must hold exactly one statement.
pub fn normalize(parser: &SqlParser, sql: &str) -> Result<NormalizedStatement, SqlbindError> {
    let mut statements = normalize_statements(parser, sql, false)?;
    Ok(statements.remove(0))
}

/// Each statement is normalized on its own; slots are never shared between
/// statements of the same text.
pub fn normalize_statements(
    parser: &SqlParser,
    sql: &str,
    allow_multiple: bool,
) -> Result<Vec<NormalizedStatement>, SqlbindError> {
    let statements = parser.parse(sql)?;
    if statements.is_empty() {
        return Err(errors::empty_sequence_error("normalize"));
    }
    if statements.len() > 1 && !allow_multiple {
        return Err(errors::multiple_statements_error());
    }

    statements
        .into_iter()
        .map(|statement| normalize_statement(parser, statement))
        .collect()
}

pub fn normalize_statement(
    parser: &SqlParser,
    mut statement: Statement,
) -> Result<NormalizedStatement, SqlbindError> {
    let mut normalizer = PlaceholderNormalizer::default();
    if let ControlFlow::Break(error) = statement.visit(&mut normalizer) {
        return Err(error);
    }

    let normalized = NormalizedStatement {
        sql: parser.render(&statement),
        bind_metadata: normalizer.into_metadata(),
    };
    log::trace!(
        "normalized statement: style={} arg_count={} sql={}",
        normalized.bind_metadata.style.tag(),
        normalized.bind_metadata.arg_count,
        normalized.sql
    );
    Ok(normalized)
}

#[derive(Debug, Default)]
struct PlaceholderNormalizer {
    style: Option<BindStyle>,
    arg_count: usize,
    slots: HashMap<String, usize>,
    names: Vec<String>,
}

impl PlaceholderNormalizer {
    fn expect_style(&mut self, found: BindStyle) -> Result<(), SqlbindError> {
        match self.style {
            Some(expected) if expected != found => {
                Err(errors::mixed_bind_style_error(expected, found))
            }
            Some(_) => Ok(()),
            None => {
                self.style = Some(found);
                Ok(())
            }
        }
    }

    /// Returns the 1-based number the marker is rewritten to.
    fn classify_placeholder(&mut self, token: &str) -> Result<usize, SqlbindError> {
        let trimmed = token.trim();

        if trimmed.is_empty() || trimmed == "?" {
            self.expect_style(BindStyle::Anonymous)?;
            self.arg_count += 1;
            return Ok(self.arg_count);
        }

        if let Some(numeric) = trimmed.strip_prefix('?') {
            let position = parse_1_based_placeholder(trimmed, numeric)?;
            self.expect_style(BindStyle::Numbered)?;
            self.arg_count = self.arg_count.max(position);
            return Ok(position);
        }

        let mut chars = trimmed.chars();
        let prefix = chars.next().and_then(NamedPrefix::from_char);
        match prefix {
            Some(prefix) if !chars.as_str().is_empty() => {
                self.classify_named(prefix, chars.as_str())
            }
            _ => Err(errors::invalid_placeholder_error(trimmed)),
        }
    }

    fn classify_named(&mut self, prefix: NamedPrefix, name: &str) -> Result<usize, SqlbindError> {
        self.expect_style(BindStyle::Named(prefix))?;
        if let Some(slot) = self.slots.get(name) {
            return Ok(slot + 1);
        }

        let slot = self.names.len();
        self.slots.insert(name.to_string(), slot);
        self.names.push(name.to_string());
        self.arg_count += 1;
        Ok(slot + 1)
    }

    fn into_metadata(self) -> BindMetadata {
        match self.style {
            Some(BindStyle::Named(prefix)) => BindMetadata::named(
                prefix,
                self.names
                    .into_iter()
                    .enumerate()
                    .map(|(slot, name)| (name, slot))
                    .collect(),
            ),
            Some(BindStyle::Numbered) => BindMetadata::numbered(self.arg_count),
            Some(BindStyle::Anonymous) | None => BindMetadata::anonymous(self.arg_count),
        }
    }
}

impl VisitorMut for PlaceholderNormalizer {
    type Break = SqlbindError;

    fn pre_visit_value(&mut self, value: &mut SqlValue) -> ControlFlow<Self::Break> {
        let SqlValue::Placeholder(token) = value else {
            return ControlFlow::Continue(());
        };

        match self.classify_placeholder(token) {
            Ok(position) => {
                *value = SqlValue::Placeholder(format!("?{position}"));
                ControlFlow::Continue(())
            }
            Err(error) => ControlFlow::Break(error),
        }
    }

    // Some dialects lex `@name` as a plain identifier rather than a placeholder.
    fn post_visit_expr(&mut self, expr: &mut Expr) -> ControlFlow<Self::Break> {
        let Expr::Identifier(ident) = expr else {
            return ControlFlow::Continue(());
        };
        if ident.quote_style.is_some() {
            return ControlFlow::Continue(());
        }

        let mut chars = ident.value.chars();
        let Some(prefix) = chars.next().and_then(NamedPrefix::from_char) else {
            return ControlFlow::Continue(());
        };
        let name = chars.as_str();
        if name.is_empty() {
            return ControlFlow::Continue(());
        }

        match self.classify_named(prefix, name) {
            Ok(position) => {
                *expr = Expr::Value(SqlValue::Placeholder(format!("?{position}")).into());
                ControlFlow::Continue(())
            }
            Err(error) => ControlFlow::Break(error),
        }
    }
}

fn parse_1_based_placeholder(token: &str, numeric: &str) -> Result<usize, SqlbindError> {
    let parsed = numeric
        .parse::<usize>()
        .map_err(|_| errors::invalid_placeholder_error(token))?;
    if parsed == 0 {
        return Err(errors::invalid_placeholder_error(token));
    }
    Ok(parsed)
}
