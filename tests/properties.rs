// Property tests for evaluation semantics

use proptest::prelude::*;
use sysy_run::interpreter::Interpreter;
use sysy_run::memory::Value;
use sysy_run::parser::Parser;
use sysy_run::runtime::MockTerminal;

fn run_source(source: &str) -> Interpreter<MockTerminal> {
    let mut parser = Parser::new(source).expect("Parser creation failed");
    let program = parser.parse_program().expect("Parsing failed");
    let mut interpreter = Interpreter::new(program, MockTerminal::new(""));
    interpreter.run().expect("Execution failed");
    interpreter
}

/// Literal for `n` that also works for `i32::MIN`
fn literal(n: i32) -> String {
    if n == i32::MIN {
        format!("(0 - {} - 1)", i32::MAX)
    } else if n < 0 {
        format!("(0 - {})", -(n as i64))
    } else {
        n.to_string()
    }
}

proptest! {
    #[test]
    fn addition_wraps(a in any::<i32>(), b in any::<i32>()) {
        let source = format!(
            "int r; int main() {{ r = {} + {}; return 0; }}",
            literal(a),
            literal(b)
        );
        let interpreter = run_source(&source);
        prop_assert_eq!(interpreter.global_value("r"), Some(Value::Int(a.wrapping_add(b))));
    }

    #[test]
    fn multiplication_wraps(a in any::<i32>(), b in any::<i32>()) {
        let source = format!(
            "int r; int main() {{ r = {} * {}; return 0; }}",
            literal(a),
            literal(b)
        );
        let interpreter = run_source(&source);
        prop_assert_eq!(interpreter.global_value("r"), Some(Value::Int(a.wrapping_mul(b))));
    }

    #[test]
    fn char_storage_keeps_low_byte(v in any::<i32>()) {
        let source = format!(
            "char c; int n; int main() {{ c = {}; n = c; return 0; }}",
            literal(v)
        );
        let interpreter = run_source(&source);
        prop_assert_eq!(interpreter.global_value("n"), Some(Value::Int(v & 0xFF)));
    }

    #[test]
    fn logical_operators_short_circuit(left in 0..3i32, right in 0..3i32) {
        let source = format!(
            r#"
            int calls = 0;
            int a; int b;
            int touch(int v) {{ calls = calls + 1; return v; }}
            int main() {{
                a = {left} && touch({right});
                b = {left} || touch({right});
                return 0;
            }}
            "#
        );
        let interpreter = run_source(&source);

        // Exactly one of the two right operands runs
        prop_assert_eq!(interpreter.global_value("calls"), Some(Value::Int(1)));
        prop_assert_eq!(
            interpreter.global_value("a"),
            Some(Value::from_bool(left != 0 && right != 0))
        );
        prop_assert_eq!(
            interpreter.global_value("b"),
            Some(Value::from_bool(left != 0 || right != 0))
        );
    }
}
