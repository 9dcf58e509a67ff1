//! Expression evaluation implementation
//!
//! Evaluates expressions to a [`Value`]:
//!
//! - Literals, variables and array element reads
//! - Binary operators (left operand first) and unary operators
//! - Short-circuit `&&` / `||`
//! - Function calls, via `calls` and `builtins`
//!
//! String literals have no value of their own; they only appear as the
//! `printf` format and as `char` array initialisers.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::stack::{ArrayRef, Storage};
use crate::memory::value::Value;
use crate::parser::ast::*;
use crate::recursion::ensure_sufficient_stack;
use crate::runtime::Console;

impl<C: Console> Interpreter<C> {
    pub(crate) fn evaluate_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        ensure_sufficient_stack(|| self.evaluate_expr_inner(expr))
    }

    fn evaluate_expr_inner(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::IntLiteral(n, _) => Ok(Value::Int(*n)),
            Expr::CharLiteral(c, _) => Ok(Value::Char(*c)),
            Expr::StringLiteral(_, location) => Err(RuntimeError::TypeError {
                expected: "int or char value".to_string(),
                got: "string literal".to_string(),
                location: *location,
            }),
            Expr::Variable(name, location) => self.read_variable(name, *location),
            Expr::ArrayAccess {
                name,
                index,
                location,
            } => {
                let index = self.evaluate_expr(index)?.as_int();
                self.read_element(name, index, *location)
            }
            Expr::Logical {
                op: LogicalOp::And,
                left,
                right,
                ..
            } => {
                if !self.evaluate_expr(left)?.is_truthy() {
                    return Ok(Value::Int(0));
                }
                Ok(Value::from_bool(self.evaluate_expr(right)?.is_truthy()))
            }
            Expr::Logical {
                op: LogicalOp::Or,
                left,
                right,
                ..
            } => {
                if self.evaluate_expr(left)?.is_truthy() {
                    return Ok(Value::Int(1));
                }
                Ok(Value::from_bool(self.evaluate_expr(right)?.is_truthy()))
            }
            Expr::BinaryOp {
                op,
                left,
                right,
                location,
            } => {
                let left_val = self.evaluate_expr(left)?;
                let right_val = self.evaluate_expr(right)?;
                Self::evaluate_binary_op(*op, left_val, right_val, *location)
            }
            Expr::UnaryOp { op, operand, .. } => {
                let val = self.evaluate_expr(operand)?;
                Ok(Self::evaluate_unary_op(*op, val))
            }
            Expr::FunctionCall {
                name,
                args,
                location,
            } => Ok(self
                .execute_function_call(name, args, *location)?
                .unwrap_or(Value::Int(0))),
        }
    }

    fn read_variable(&self, name: &str, location: SourceLocation) -> Result<Value, RuntimeError> {
        let binding = self
            .stack
            .lookup(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
                location,
            })?;

        match binding.storage {
            Storage::Scalar(v) => Ok(v),
            Storage::Array(_) => Err(RuntimeError::TypeError {
                expected: "scalar value".to_string(),
                got: format!("array '{}'", name),
                location,
            }),
        }
    }

    /// Resolve `name` to its array storage, element type and const flag
    pub(crate) fn array_handle(
        &self,
        name: &str,
        location: SourceLocation,
    ) -> Result<(ArrayRef, BaseType, bool), RuntimeError> {
        let binding = self
            .stack
            .lookup(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
                location,
            })?;

        match &binding.storage {
            Storage::Array(arr) => Ok((arr.clone(), binding.elem_type, binding.is_const)),
            Storage::Scalar(_) => Err(RuntimeError::TypeError {
                expected: "array".to_string(),
                got: format!("scalar '{}'", name),
                location,
            }),
        }
    }

    fn read_element(
        &self,
        name: &str,
        index: i32,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let (arr, _, _) = self.array_handle(name, location)?;
        let elems = arr.borrow();
        usize::try_from(index)
            .ok()
            .and_then(|i| elems.get(i).copied())
            .ok_or_else(|| RuntimeError::IndexOutOfBounds {
                name: name.to_string(),
                index,
                len: elems.len(),
                location,
            })
    }
}
