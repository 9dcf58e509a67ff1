//! Evaluator execution engine
//!
//! - [`engine`]: the [`Interpreter`](engine::Interpreter), its configuration and control signals
//! - [`errors`]: Runtime error types
//! - `statements`, `loops`: statement executor
//! - `expressions`, `ops`: expression evaluator
//! - `calls`, `builtins`: user and built-in function calls
//!
//! # Execution Model
//!
//! Global declarations run first, in source order, in the global scope. Then
//! `main` is called; its return value is the program's result. Statements
//! return a [`ControlFlow`](engine::ControlFlow) signal that unwinds to the
//! nearest loop (`break`, `continue`) or call (`return`).

mod builtins;
mod calls;
pub mod constants;
pub mod engine;
pub mod errors;
mod expressions;
mod loops;
mod ops;
mod statements;

pub use engine::{exit_status, ControlFlow, Interpreter, InterpreterConfig};
pub use errors::RuntimeError;
