//! `printf` format expansion
//!
//! Supported conversions are `%d` (decimal integer), `%c` (low byte of the
//! argument) and `%%`. Escapes are decoded while expanding, so `\%` is a
//! literal percent sign rather than the start of a conversion. The argument
//! count must match the number of conversions exactly.

use crate::memory::value::Value;
use crate::parser::lexer::{decode_escapes, DecodedByte};
use thiserror::Error;

/// Malformed format string or argument mismatch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("not enough arguments for format string (conversion {index})")]
    NotEnoughArguments { index: usize },

    #[error("format string uses {used} argument(s) but {given} were given")]
    TooManyArguments { used: usize, given: usize },

    #[error("unsupported conversion '%{0}'")]
    UnsupportedConversion(char),

    #[error("format string ends with a lone '%'")]
    TrailingPercent,
}

/// Expand the raw (undecoded) format string `format` with `args`
pub fn format_printf(format: &str, args: &[Value]) -> Result<Vec<u8>, FormatError> {
    let decoded = decode_escapes(format);
    let mut out = Vec::with_capacity(decoded.len());
    let mut bytes = decoded.into_iter();
    let mut next_arg = args.iter();
    let mut used = 0usize;

    while let Some(DecodedByte { byte, escaped }) = bytes.next() {
        // An escaped `\%` is plain text
        if byte != b'%' || escaped {
            out.push(byte);
            continue;
        }

        let conv = bytes.next().ok_or(FormatError::TrailingPercent)?.byte;
        match conv {
            b'%' => out.push(b'%'),
            b'd' | b'c' => {
                used += 1;
                let value = next_arg
                    .next()
                    .ok_or(FormatError::NotEnoughArguments { index: used })?;
                if conv == b'd' {
                    out.extend_from_slice(value.as_int().to_string().as_bytes());
                } else {
                    out.push(value.as_char());
                }
            }
            other => return Err(FormatError::UnsupportedConversion(char::from(other))),
        }
    }

    if used != args.len() {
        return Err(FormatError::TooManyArguments {
            used,
            given: args.len(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fmt(format: &str, args: &[Value]) -> String {
        String::from_utf8(format_printf(format, args).unwrap()).unwrap()
    }

    #[test]
    fn test_plain_text_and_escapes() {
        assert_eq!(fmt(r"hello\n", &[]), "hello\n");
        assert_eq!(fmt(r"a\tb\\c\%", &[]), "a\tb\\c%");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(
            fmt("%d %c %d%%", &[Value::Int(-12), Value::Int(97 + 256), Value::Char(200)]),
            "-12 a 200%"
        );
    }

    #[test]
    fn test_escaped_percent_is_not_a_conversion() {
        assert_eq!(fmt(r"\%d", &[]), "%d");
    }

    #[test]
    fn test_argument_count_mismatch() {
        assert_eq!(
            format_printf("%d %d", &[Value::Int(1)]),
            Err(FormatError::NotEnoughArguments { index: 2 })
        );
        assert_eq!(
            format_printf("%d", &[Value::Int(1), Value::Int(2)]),
            Err(FormatError::TooManyArguments { used: 1, given: 2 })
        );
    }

    #[test]
    fn test_bad_conversions() {
        assert_eq!(
            format_printf("%s", &[Value::Int(1)]),
            Err(FormatError::UnsupportedConversion('s'))
        );
        assert_eq!(format_printf("50%", &[]), Err(FormatError::TrailingPercent));
    }
}
