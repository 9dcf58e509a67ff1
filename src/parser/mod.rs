//! Source parser
//!
//! This module transforms program text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), extended by `declarations`,
//!   `statements` and `expressions`
//! - [`ast`]: AST node definitions
//!
//! # Supported Language
//!
//! - Types: `int`, `char`, `void` (return type only), one-dimensional arrays
//! - Declarations: variables and `const` constants, with scalar, list or
//!   string initializers
//! - Statements: assignment, `if`/`else`, `for`, `break`, `continue`, `return`
//! - Expressions: arithmetic, comparison, short-circuit logic, calls, indexing
//! - No preprocessor (`#include` lines are skipped)
//!
//! Hand-written recursive descent parser, no parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use parse::{parse_source, ParseError, Parser};
