//! Binary operator evaluation
//!
//! Operands are widened to `i32` and combined with two's-complement wrapping.
//! Division and modulo truncate toward zero; a zero divisor is fatal.
//! `&&` and `||` are `Expr::Logical` and short-circuit in the evaluator.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{BinOp, SourceLocation};
use crate::runtime::Console;

impl<C: Console> Interpreter<C> {
    pub(crate) fn evaluate_binary_op(
        op: BinOp,
        left: Value,
        right: Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let (a, b) = (left.as_int(), right.as_int());

        let result = match op {
            BinOp::Add => a.wrapping_add(b),
            BinOp::Sub => a.wrapping_sub(b),
            BinOp::Mul => a.wrapping_mul(b),
            BinOp::Div => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero {
                        operation: "Division",
                        location,
                    });
                }
                a.wrapping_div(b)
            }
            BinOp::Mod => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero {
                        operation: "Modulo",
                        location,
                    });
                }
                a.wrapping_rem(b)
            }
            BinOp::Eq => i32::from(a == b),
            BinOp::Ne => i32::from(a != b),
            BinOp::Lt => i32::from(a < b),
            BinOp::Le => i32::from(a <= b),
            BinOp::Gt => i32::from(a > b),
            BinOp::Ge => i32::from(a >= b),
        };

        Ok(Value::Int(result))
    }
}
