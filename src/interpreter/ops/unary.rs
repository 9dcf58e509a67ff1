//! Unary operator evaluation

use crate::interpreter::engine::Interpreter;
use crate::memory::value::Value;
use crate::parser::ast::UnOp;
use crate::runtime::Console;

impl<C: Console> Interpreter<C> {
    /// `+x` widens, `-x` wraps, `!x` is `1` iff `x == 0`
    pub(crate) fn evaluate_unary_op(op: UnOp, val: Value) -> Value {
        let n = val.as_int();
        match op {
            UnOp::Plus => Value::Int(n),
            UnOp::Neg => Value::Int(n.wrapping_neg()),
            UnOp::Not => Value::from_bool(n == 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::engine::Interpreter;
    use crate::memory::value::Value;
    use crate::parser::ast::UnOp;
    use crate::runtime::MockTerminal;

    type Interp = Interpreter<MockTerminal>;

    #[test]
    fn test_unary_ops() {
        assert_eq!(Interp::evaluate_unary_op(UnOp::Plus, Value::Char(b'a')), Value::Int(97));
        assert_eq!(Interp::evaluate_unary_op(UnOp::Neg, Value::Int(5)), Value::Int(-5));
        assert_eq!(
            Interp::evaluate_unary_op(UnOp::Neg, Value::Int(i32::MIN)),
            Value::Int(i32::MIN)
        );
        assert_eq!(Interp::evaluate_unary_op(UnOp::Not, Value::Int(0)), Value::Int(1));
        assert_eq!(Interp::evaluate_unary_op(UnOp::Not, Value::Char(3)), Value::Int(0));
    }
}
