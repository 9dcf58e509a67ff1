//! Runtime error types for the evaluator
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to lex or parse errors).
//!
//! All runtime errors are fatal: they halt execution and carry the location of
//! the offending node where one exists.

use crate::parser::ast::SourceLocation;
use crate::runtime::ConsoleError;
use thiserror::Error;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, Error)]
pub enum RuntimeError {
    /// Division or modulo by zero
    #[error("{operation} by zero at {location}")]
    DivisionByZero {
        operation: &'static str,
        location: SourceLocation,
    },

    /// `getint`/`getchar` ran out of input
    #[error("End of input in {function} at {location}")]
    EndOfInput {
        function: &'static str,
        location: SourceLocation,
    },

    /// `getint` found something that is not an integer
    #[error("Invalid input: {message} at {location}")]
    InvalidInput {
        message: String,
        location: SourceLocation,
    },

    /// Undefined function call
    #[error("Undefined function '{name}' at {location}")]
    UndefinedFunction {
        name: String,
        location: SourceLocation,
    },

    /// Undefined variable reference
    #[error("Undefined variable '{name}' at {location}")]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// Array index outside `0..len`
    #[error("Index {index} out of bounds for array '{name}' of length {len} at {location}")]
    IndexOutOfBounds {
        name: String,
        index: i32,
        len: usize,
        location: SourceLocation,
    },

    /// Attempted to modify a const binding
    #[error("Attempted to modify const '{var}' at {location}")]
    ConstModification {
        var: String,
        location: SourceLocation,
    },

    /// Function argument count mismatch
    #[error("Function '{function}' expects {expected} argument(s), got {got} at {location}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        got: usize,
        location: SourceLocation,
    },

    /// Scalar/array confusion, misplaced string literal, and similar
    #[error("Type error: expected {expected}, got {got} at {location}")]
    TypeError {
        expected: String,
        got: String,
        location: SourceLocation,
    },

    /// Invalid printf format string or argument mismatch
    #[error("Invalid printf format: {message} at {location}")]
    InvalidPrintfFormat {
        message: String,
        location: SourceLocation,
    },

    /// Negative array length
    #[error("Invalid size {size} for array '{name}' at {location}")]
    InvalidArraySize {
        name: String,
        size: i32,
        location: SourceLocation,
    },

    /// More initialisers than array elements
    #[error("Initializer for '{name}' has {count} element(s) but the array holds {len} at {location}")]
    InitializerTooLong {
        name: String,
        count: usize,
        len: usize,
        location: SourceLocation,
    },

    /// Name declared twice in the same scope
    #[error("Redeclaration of '{name}' at {location}")]
    Redeclaration {
        name: String,
        location: SourceLocation,
    },

    /// `break`/`continue` outside any loop
    #[error("'{keyword}' outside of a loop at {location}")]
    MisplacedJump {
        keyword: &'static str,
        location: SourceLocation,
    },

    /// Call nesting exceeded the configured limit
    #[error("Stack overflow: call depth exceeded {limit} in '{function}' at {location}")]
    StackOverflow {
        function: String,
        limit: usize,
        location: SourceLocation,
    },

    /// Main function not found
    #[error("No 'main' function found")]
    NoMainFunction,

    /// Console read/write failure
    #[error("I/O error: {message} at {location}")]
    Io {
        message: String,
        location: SourceLocation,
    },
}

impl RuntimeError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            RuntimeError::DivisionByZero { location, .. }
            | RuntimeError::EndOfInput { location, .. }
            | RuntimeError::InvalidInput { location, .. }
            | RuntimeError::UndefinedFunction { location, .. }
            | RuntimeError::UndefinedVariable { location, .. }
            | RuntimeError::IndexOutOfBounds { location, .. }
            | RuntimeError::ConstModification { location, .. }
            | RuntimeError::ArgumentCountMismatch { location, .. }
            | RuntimeError::TypeError { location, .. }
            | RuntimeError::InvalidPrintfFormat { location, .. }
            | RuntimeError::InvalidArraySize { location, .. }
            | RuntimeError::InitializerTooLong { location, .. }
            | RuntimeError::Redeclaration { location, .. }
            | RuntimeError::MisplacedJump { location, .. }
            | RuntimeError::StackOverflow { location, .. }
            | RuntimeError::Io { location, .. } => Some(location),
            RuntimeError::NoMainFunction => None,
        }
    }

    /// Attach a call site to a console failure
    pub fn from_console(err: ConsoleError, function: &'static str, location: SourceLocation) -> Self {
        match err {
            ConsoleError::EndOfInput => RuntimeError::EndOfInput { function, location },
            ConsoleError::InvalidInteger(found) => RuntimeError::InvalidInput {
                message: format!("{function} expected an integer, found {found}"),
                location,
            },
            ConsoleError::Io(e) => RuntimeError::Io {
                message: e.to_string(),
                location,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_location() {
        let err = RuntimeError::DivisionByZero {
            operation: "Division",
            location: SourceLocation::new(3, 7),
        };
        assert_eq!(err.to_string(), "Division by zero at line 3, column 7");
        assert_eq!(err.location(), Some(&SourceLocation::new(3, 7)));
    }

    #[test]
    fn test_console_error_mapping() {
        let loc = SourceLocation::new(1, 1);
        assert!(matches!(
            RuntimeError::from_console(ConsoleError::EndOfInput, "getint", loc),
            RuntimeError::EndOfInput {
                function: "getint",
                ..
            }
        ));
        assert!(matches!(
            RuntimeError::from_console(ConsoleError::InvalidInteger("'x'".into()), "getint", loc),
            RuntimeError::InvalidInput { .. }
        ));
        assert!(RuntimeError::NoMainFunction.location().is_none());
    }
}
