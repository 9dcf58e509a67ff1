//! Memory model for the evaluator
//!
//! - [`value`]: Runtime value representation (`Int`, `Char`) and coercions
//! - [`stack`]: Global scope, call frames, block scopes and bindings
//!
//! Every storage location is zero-initialised when declared. Arrays keep the
//! length evaluated at declaration time; indexing is bounds-checked by the
//! interpreter.

pub mod stack;
pub mod value;

pub use stack::{ArrayRef, Binding, Stack, Storage};
pub use value::Value;
