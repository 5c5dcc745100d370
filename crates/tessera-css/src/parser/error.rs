use std::path::PathBuf;

use serde::Serialize;
use strum_macros::Display;
use thiserror::Error;

use crate::scanner::TokenType;

/// Hard failure of a stylesheet parse.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Allocation failed while building the rule model.
    #[error("out of memory while parsing stylesheet")]
    OutOfMemory,

    /// A structural syntax error the parser could not recover from.
    #[error("syntax error at symbol {index} ({token}): {lexeme:?}")]
    Syntax {
        /// Index of the offending symbol.
        index: usize,
        /// Its token type, [`TokenType::None`] past the end of input.
        token: TokenType,
        /// Its lexeme.
        lexeme: String,
    },

    /// The stylesheet file could not be read.
    #[error("failed to read stylesheet {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Diagnostic code of the last parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
pub enum ErrorCode {
    /// The parse succeeded.
    NoError,
    /// Allocation failed.
    OutOfMemoryError,
    /// Any other failure, or no parse has run yet.
    #[default]
    UnknownError,
}

/// Internal failure signal threaded through the recursive descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Failure {
    /// Recoverable mismatch; callers may resynchronize.
    Syntax,
    /// Allocation failure; always aborts the parse.
    OutOfMemory,
}

pub(crate) type Step<T = ()> = Result<T, Failure>;

/// Append to `vec`, reporting allocation failure instead of aborting.
pub(crate) fn push<T>(vec: &mut Vec<T>, item: T) -> Step {
    vec.try_reserve(1).map_err(|_| Failure::OutOfMemory)?;
    vec.push(item);
    Ok(())
}
