//! In-memory console for tests and embedding
//!
//! [`MockTerminal`] feeds a fixed input buffer to `getint`/`getchar` and
//! captures everything `printf` writes.

use super::{read_byte, read_int, Console, ConsoleError};
use std::io::Cursor;

/// Mock terminal with scripted input and captured output
#[derive(Debug, Clone, Default)]
pub struct MockTerminal {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
}

impl MockTerminal {
    /// Terminal whose input is `input`
    pub fn new(input: &str) -> Self {
        MockTerminal {
            input: Cursor::new(input.as_bytes().to_vec()),
            output: Vec::new(),
        }
    }

    /// Captured output, lossily decoded as UTF-8
    pub fn get_output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Captured output split into lines, without a trailing empty line
    pub fn get_lines(&self) -> Vec<String> {
        let text = self.get_output();
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if lines.last().is_some_and(|s| s.is_empty()) {
            lines.pop();
        }
        lines
    }
}

impl Console for MockTerminal {
    fn get_int(&mut self) -> Result<i32, ConsoleError> {
        read_int(&mut self.input)
    }

    fn get_char(&mut self) -> Result<u8, ConsoleError> {
        read_byte(&mut self.input)
    }

    fn put_bytes(&mut self, bytes: &[u8]) -> Result<(), ConsoleError> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ConsoleError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_output() {
        let mut term = MockTerminal::new("");
        term.put_bytes(b"a\nb").unwrap();
        term.put_bytes(b"c\n").unwrap();

        assert_eq!(term.get_output(), "a\nbc\n");
        assert_eq!(term.get_lines(), vec!["a".to_string(), "bc".to_string()]);
    }

    #[test]
    fn test_scripted_input() {
        let mut term = MockTerminal::new("-3\nq");

        assert_eq!(term.get_int().unwrap(), -3);
        assert_eq!(term.get_char().unwrap(), b'\n');
        assert_eq!(term.get_char().unwrap(), b'q');
        assert!(matches!(term.get_char(), Err(ConsoleError::EndOfInput)));
    }
}
