use std::{io, path::PathBuf};

use thiserror::Error;

/// A variation of things which can go wrong then using driver quirks to set up or run the
/// validation suite.
#[derive(Error, Debug)]
pub enum Error {
    /// The driver has no way to express the requested operation. Raised explicitly rather than
    /// silently emitting SQL which has never been tested against the vendor.
    #[error("Operation is not implemented for this driver: {operation}")]
    NotImplemented { operation: &'static str },
    /// A configuration value should be taken from the environment, yet the variable is not set.
    #[error(
        "Environment variable '{name}' is required to configure the driver under test, but it is \
        not set."
    )]
    MissingEnvironmentVariable { name: String },
    /// Feature keys are a fixed vocabulary defined by the validation suite.
    #[error("'{key}' is not a known driver feature.")]
    UnknownFeature { key: String },
    /// Xdbc fields are a fixed vocabulary defined by the ADBC column schema.
    #[error("'{name}' is not a known xdbc column field.")]
    UnknownXdbcField { name: String },
    /// The statement splitter has no tokenizer for the requested dialect.
    #[error("Unknown SQL dialect '{name}'.")]
    UnknownDialect { name: String },
    /// The SQL script could not be lexed, e.g. due to an unterminated string literal.
    #[error("Unable to split SQL script into statements.\n{source}")]
    Tokenize {
        source: sqlparser::tokenizer::TokenizerError,
    },
    /// Reading a query fixture failed.
    #[error("Unable to read query fixture '{}':\n{source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}
