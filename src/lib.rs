//! # Introduction
//!
//! `sysy-run` is a tree-walking evaluator for a restricted C-like teaching
//! language: `int`/`char` scalars, one-dimensional arrays, constants, global
//! variables, functions with array-by-reference parameters, `if`/`for`
//! control flow and `printf`/`getint`/`getchar` I/O.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Interpreter ⇄ Console
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST.
//! 2. [`interpreter`]: initialises globals, calls `main` and walks the AST.
//! 3. [`memory`]: tagged [`memory::value::Value`]s stored in the
//!    [`memory::stack::Stack`] environment.
//! 4. [`runtime`]: the [`runtime::Console`] seam behind the I/O built-ins,
//!    with a stream implementation and an in-memory
//!    [`runtime::MockTerminal`].
//!
//! ## Example
//!
//! ```
//! use sysy_run::interpreter::Interpreter;
//! use sysy_run::parser::parse_source;
//! use sysy_run::runtime::MockTerminal;
//!
//! let program = parse_source(r#"int main() { printf("%d\n", getint() * 2); return 0; }"#).unwrap();
//! let mut interp = Interpreter::new(program, MockTerminal::new("21"));
//! assert_eq!(interp.run().unwrap(), 0);
//! assert_eq!(interp.console().get_output(), "42\n");
//! ```

pub mod interpreter;
pub mod memory;
pub mod parser;
mod recursion;
pub mod runtime;
