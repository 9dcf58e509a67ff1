//! Built-in function implementations
//!
//! - `getint()`: read a decimal integer from the console
//! - `getchar()`: read one byte from the console
//! - `printf(format, ...)`: formatted output; `format` must be a string literal
//!
//! Built-ins are dispatched before user functions. Console failures are
//! reported as runtime errors at the call site.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{Expr, SourceLocation};
use crate::runtime::{format_printf, Console};

impl<C: Console> Interpreter<C> {
    fn expect_no_args(
        name: &str,
        args: &[Expr],
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(RuntimeError::ArgumentCountMismatch {
                function: name.to_string(),
                expected: 0,
                got: args.len(),
                location,
            })
        }
    }

    pub(crate) fn builtin_getint(
        &mut self,
        args: &[Expr],
        location: SourceLocation,
    ) -> Result<Option<Value>, RuntimeError> {
        Self::expect_no_args("getint", args, location)?;
        let n = self
            .console
            .get_int()
            .map_err(|e| RuntimeError::from_console(e, "getint", location))?;
        Ok(Some(Value::Int(n)))
    }

    pub(crate) fn builtin_getchar(
        &mut self,
        args: &[Expr],
        location: SourceLocation,
    ) -> Result<Option<Value>, RuntimeError> {
        Self::expect_no_args("getchar", args, location)?;
        let c = self
            .console
            .get_char()
            .map_err(|e| RuntimeError::from_console(e, "getchar", location))?;
        Ok(Some(Value::Char(c)))
    }

    pub(crate) fn builtin_printf(
        &mut self,
        args: &[Expr],
        location: SourceLocation,
    ) -> Result<Option<Value>, RuntimeError> {
        let (format, rest) = match args.split_first() {
            Some((Expr::StringLiteral(s, _), rest)) => (s, rest),
            Some(_) => {
                return Err(RuntimeError::InvalidPrintfFormat {
                    message: "printf format must be a string literal".to_string(),
                    location,
                });
            }
            None => {
                return Err(RuntimeError::InvalidPrintfFormat {
                    message: "printf requires at least one argument".to_string(),
                    location,
                });
            }
        };

        let mut arg_values = Vec::with_capacity(rest.len());
        for arg in rest {
            arg_values.push(self.evaluate_expr(arg)?);
        }

        let output = format_printf(format, &arg_values).map_err(|e| {
            RuntimeError::InvalidPrintfFormat {
                message: e.to_string(),
                location,
            }
        })?;

        self.console
            .put_bytes(&output)
            .map_err(|e| RuntimeError::from_console(e, "printf", location))?;

        Ok(None)
    }
}
