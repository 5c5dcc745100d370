//! Stylesheet scanner.
//!
//! Turns raw stylesheet text into a flat list of [`Symbol`]s. Scanning never
//! fails: unrecognized input becomes [`TokenType::Invalid`] symbols and error
//! detection is left to the parser.

/// Token types and symbols.
pub mod token;
/// Escape preprocessing and the lexical state machine.
pub mod lexer;

pub use lexer::{Scanner, preprocess, scan};
pub use token::{Symbol, TokenType};
