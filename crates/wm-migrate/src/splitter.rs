//! Splitting a script into individual statements.
//!
//! Splitting runs on sqlparser's tokenizer, so a `;` inside a string literal,
//! an escape string, a quoted identifier, a comment or a dollar-quoted body
//! is not a boundary. Statements are slices of the original script; their
//! text is never rebuilt from tokens.

use sqlparser::dialect::{Dialect as ParserDialect, GenericDialect, PostgreSqlDialect};
use sqlparser::tokenizer::{Location, Token, Tokenizer, TokenizerError};
use wm_core::Dialect;

/// Splits scripts on top-level `;` for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct StatementSplitter {
    dialect: Dialect,
}

impl StatementSplitter {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Statements of `script`, without their trailing `;`.
    ///
    /// Fragments holding only whitespace or comments are dropped. If the
    /// tokenizer rejects the script it is split on every `;` instead.
    pub fn split(&self, script: &str) -> Vec<String> {
        // DuckDB shares PostgreSQL's lexical rules for E'' escape strings and
        // $$ bodies, which sqlparser's DuckDB dialect does not tokenize.
        let result = match self.dialect {
            Dialect::DuckDb => split_tokens(&PostgreSqlDialect {}, script),
            Dialect::Generic => split_tokens(&GenericDialect {}, script),
        };

        match result {
            Ok(statements) => statements,
            Err(e) => {
                log::warn!("SQL tokenizing failed, using naive semicolon splitting: {e}");
                split_naive(script)
            }
        }
    }
}

/// Convenience wrapper around [`StatementSplitter::split`].
pub fn split_statements(script: &str, dialect: Dialect) -> Vec<String> {
    StatementSplitter::new(dialect).split(script)
}

fn split_tokens(dialect: &dyn ParserDialect, script: &str) -> Result<Vec<String>, TokenizerError> {
    let tokens = Tokenizer::new(dialect, script)
        .with_unescape(false)
        .tokenize_with_location()?;
    let lines = LineIndex::new(script);

    let mut statements = Vec::new();
    let mut start = 0;
    let mut has_content = false;

    for token in tokens {
        match token.token {
            Token::SemiColon => {
                let end = lines.offset(script, token.span.start);
                push_statement(&mut statements, &script[start..end], has_content);
                start = lines.offset(script, token.span.end);
                has_content = false;
            }
            Token::EOF | Token::Whitespace(_) => {}
            _ => has_content = true,
        }
    }
    push_statement(&mut statements, &script[start..], has_content);

    Ok(statements)
}

/// Maps tokenizer locations (1-based line, 1-based char column) to byte
/// offsets in the script.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(script: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(script.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn offset(&self, script: &str, location: Location) -> usize {
        let line = (location.line.max(1) - 1) as usize;
        let Some(&line_start) = self.starts.get(line) else {
            return script.len();
        };
        let column = (location.column.max(1) - 1) as usize;
        script[line_start..]
            .char_indices()
            .nth(column)
            .map_or(script.len(), |(i, _)| line_start + i)
    }
}

fn push_statement(statements: &mut Vec<String>, text: &str, has_content: bool) {
    if has_content {
        statements.push(text.trim().to_string());
    }
}

fn split_naive(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
