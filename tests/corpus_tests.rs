// Integration tests running the sample programs under testdata/

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use sysy_run::interpreter::{exit_status, Interpreter};
use sysy_run::parser::Parser;
use sysy_run::runtime::MockTerminal;

fn run_file_on(name: &str, input: &str) -> (i32, MockTerminal) {
    let path = Path::new("testdata").join(name);
    let source = fs::read_to_string(&path).expect("Failed to read test program");

    let mut parser = Parser::new(&source).expect("Parser creation failed");
    let program = parser.parse_program().expect("Parsing failed");

    let mut interpreter = Interpreter::new(program, MockTerminal::new(input));
    let code = interpreter.run().expect("Execution failed");
    (code, interpreter.console().clone())
}

fn run_file(name: &str, input: &str) -> (i32, String) {
    let (code, terminal) = run_file_on(name, input);
    (code, terminal.get_output())
}

fn countdown(from: i32, to: i32) -> String {
    (to..=from).rev().map(|i| format!("{i}\n")).collect()
}

#[test]
fn test_short_circuit_program() {
    let (code, output) = run_file("sourcecode1.c", "");
    assert_eq!(code, 0);
    assert_eq!(output, "22371345");
}

#[test]
fn test_array_parameter_program() {
    let (code, output) = run_file("sourcecode2.c", "10 20 30");
    assert_eq!(code, 0);
    assert_eq!(output, "22371345\n4 30\n9 0");
}

#[test]
fn test_array_parameter_program_lines() {
    let (_, terminal) = run_file_on("sourcecode2.c", "10 20 30");
    assert_eq!(terminal.get_lines(), vec!["22371345", "4 30", "9 0"]);
}

#[test]
fn test_void_and_const_program() {
    let (code, output) = run_file("sourcecode4.c", "");
    assert_eq!(exit_status(code), 0);
    assert_eq!(output, "22371345");
}

#[test]
fn test_loop_program() {
    let (code, output) = run_file("sourcecode5.c", "5 6 7xyz");

    let mut expected = String::from("22371345\n1 2 0 97 98 0\n5 2 6 7 120 98 121 122\n");
    expected.extend((0..=10).map(|i| format!("{i}\n")));
    expected.push_str(&countdown(10, 1));
    expected.push_str(&countdown(20, 9));
    expected.push_str(&countdown(30, 21));
    expected.push_str(&countdown(40, 29));
    expected.push_str(&countdown(50, 41));
    expected.push_str(&countdown(60, 49));

    assert_eq!(code, 0);
    assert_eq!(output, expected);
}

#[test]
fn test_exit_status_keeps_low_byte() {
    let source = "int main() { return 258; }";
    let program = Parser::new(source)
        .expect("Parser creation failed")
        .parse_program()
        .expect("Parsing failed");
    let code = Interpreter::new(program, MockTerminal::new(""))
        .run()
        .expect("Execution failed");

    assert_eq!(exit_status(code), 2);
    assert_eq!(exit_status(-1), 255);
}
