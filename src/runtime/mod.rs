//! Runtime I/O library
//!
//! The built-ins `getint`, `getchar` and `printf` talk to the outside world
//! through the [`Console`] trait:
//! - [`stream::StreamConsole`]: any `BufRead` for input, any `Write` for output
//! - [`terminal::MockTerminal`]: in-memory input, captured output (tests)
//! - [`format`]: `printf` format string expansion
//!
//! # Input Semantics
//!
//! `getint` skips ASCII whitespace, reads an optional sign and decimal digits
//! and leaves the byte after the number unread. Values outside `i32` wrap.
//! `getchar` reads exactly one byte with no skipping.

pub mod format;
pub mod stream;
pub mod terminal;

use std::io::{self, BufRead};
use thiserror::Error;

pub use format::{format_printf, FormatError};
pub use stream::StreamConsole;
pub use terminal::MockTerminal;

/// Console failure, mapped to a runtime error at the call site
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("end of input")]
    EndOfInput,

    #[error("expected an integer, found {0}")]
    InvalidInteger(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Input and output channel of a running program
pub trait Console {
    /// Read a decimal integer (`getint`)
    fn get_int(&mut self) -> Result<i32, ConsoleError>;

    /// Read one byte (`getchar`)
    fn get_char(&mut self) -> Result<u8, ConsoleError>;

    /// Write raw output bytes (`printf`)
    fn put_bytes(&mut self, bytes: &[u8]) -> Result<(), ConsoleError>;

    fn flush(&mut self) -> Result<(), ConsoleError>;
}

fn peek_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    Ok(reader.fill_buf()?.first().copied())
}

/// Shared `getint` implementation over any buffered reader
pub(crate) fn read_int<R: BufRead>(reader: &mut R) -> Result<i32, ConsoleError> {
    while let Some(b) = peek_byte(reader)? {
        if !b.is_ascii_whitespace() {
            break;
        }
        reader.consume(1);
    }

    let mut negative = false;
    match peek_byte(reader)? {
        None => return Err(ConsoleError::EndOfInput),
        Some(sign @ (b'+' | b'-')) => {
            negative = sign == b'-';
            reader.consume(1);
        }
        Some(_) => {}
    }

    let mut value: i32 = 0;
    let mut digits = 0usize;
    while let Some(b) = peek_byte(reader)? {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.wrapping_mul(10).wrapping_add(i32::from(b - b'0'));
        digits += 1;
        reader.consume(1);
    }

    if digits == 0 {
        return Err(match peek_byte(reader)? {
            None => ConsoleError::InvalidInteger("a lone sign".to_string()),
            Some(b) => ConsoleError::InvalidInteger(format!("'{}'", b.escape_ascii())),
        });
    }

    Ok(if negative { value.wrapping_neg() } else { value })
}

/// Shared `getchar` implementation over any buffered reader
pub(crate) fn read_byte<R: BufRead>(reader: &mut R) -> Result<u8, ConsoleError> {
    match peek_byte(reader)? {
        Some(b) => {
            reader.consume(1);
            Ok(b)
        }
        None => Err(ConsoleError::EndOfInput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_int_skips_whitespace_and_leaves_next_byte() {
        let mut input = Cursor::new(b"  \n 42x".to_vec());
        assert_eq!(read_int(&mut input).unwrap(), 42);
        assert_eq!(read_byte(&mut input).unwrap(), b'x');
    }

    #[test]
    fn test_read_int_signs() {
        let mut input = Cursor::new(b"-7 +3".to_vec());
        assert_eq!(read_int(&mut input).unwrap(), -7);
        assert_eq!(read_int(&mut input).unwrap(), 3);
    }

    #[test]
    fn test_read_int_wraps() {
        let mut input = Cursor::new(b"4294967297".to_vec());
        assert_eq!(read_int(&mut input).unwrap(), 1);
    }

    #[test]
    fn test_read_int_end_of_input() {
        let mut input = Cursor::new(b"   ".to_vec());
        assert!(matches!(read_int(&mut input), Err(ConsoleError::EndOfInput)));
    }

    #[test]
    fn test_read_int_invalid() {
        let mut input = Cursor::new(b"abc".to_vec());
        assert!(matches!(
            read_int(&mut input),
            Err(ConsoleError::InvalidInteger(_))
        ));
    }

    #[test]
    fn test_read_byte_does_not_skip() {
        let mut input = Cursor::new(b" a".to_vec());
        assert_eq!(read_byte(&mut input).unwrap(), b' ');
        assert_eq!(read_byte(&mut input).unwrap(), b'a');
        assert!(matches!(read_byte(&mut input), Err(ConsoleError::EndOfInput)));
    }
}
