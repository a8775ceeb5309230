use log::debug;
use sqlparser::{
    dialect::{Dialect, GenericDialect, dialect_from_str},
    tokenizer::{Location, Token, Tokenizer},
};

use crate::Error;

/// Split a SQL script into its individual statements.
///
/// The script is lexed with the tokenizer of `dialect` (e.g. `"snowflake"`), or a generic SQL
/// tokenizer if `None`, so semicolons within string literals, quoted identifiers, dollar quoted
/// strings or comments do not terminate a statement. Statements are returned as they appear in the
/// script, with surrounding whitespace and the terminating semicolon removed. Pieces of the script
/// consisting only of whitespace and comments are dropped.
///
/// ```
/// use adbc_validation_quirks::split_statement;
///
/// let statements = split_statement("CREATE TABLE t (a STRING);\nINSERT INTO t VALUES (';');", None)?;
/// assert_eq!(
///     vec!["CREATE TABLE t (a STRING)", "INSERT INTO t VALUES (';')"],
///     statements
/// );
/// # Ok::<(), adbc_validation_quirks::Error>(())
/// ```
pub fn split_statement(sql: &str, dialect: Option<&str>) -> Result<Vec<String>, Error> {
    let dialect: Box<dyn Dialect> = match dialect {
        Some(name) => dialect_from_str(name).ok_or_else(|| Error::UnknownDialect {
            name: name.to_owned(),
        })?,
        None => Box::new(GenericDialect {}),
    };

    let tokens = Tokenizer::new(dialect.as_ref(), sql)
        .tokenize_with_location()
        .map_err(|source| Error::Tokenize { source })?;

    let lines = LineOffsets::new(sql);
    let mut statements = Vec::new();
    // Byte offset at which the current statement starts.
    let mut start = 0;
    // Whitespace and comments alone do not make a statement.
    let mut has_content = false;
    for token in tokens {
        match token.token {
            Token::SemiColon => {
                let end = lines.byte_offset(sql, token.span.start);
                if has_content {
                    statements.push(sql[start..end].trim().to_owned());
                }
                start = end + ';'.len_utf8();
                has_content = false;
            }
            Token::Whitespace(_) | Token::EOF => (),
            _ => has_content = true,
        }
    }
    if has_content {
        statements.push(sql[start..].trim().to_owned());
    }

    debug!("Split SQL script into {} statements.", statements.len());
    Ok(statements)
}

/// Translates the line/column locations reported by the tokenizer back into byte offsets of the
/// source text.
struct LineOffsets {
    /// Byte offset of the first character of each line.
    starts: Vec<usize>,
}

impl LineOffsets {
    fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(index, _)| index + 1))
            .collect();
        Self { starts }
    }

    /// Lines and columns are one based. Columns count characters, not bytes.
    fn byte_offset(&self, source: &str, location: Location) -> usize {
        let line_start = self.starts[(location.line - 1) as usize];
        let column_offset: usize = source[line_start..]
            .chars()
            .take((location.column - 1) as usize)
            .map(char::len_utf8)
            .sum();
        line_start + column_offset
    }
}
