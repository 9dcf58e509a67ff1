//! Runtime value representation
//!
//! This module defines the [`Value`] enum, the tagged union of the two scalar
//! types the language knows about.
//!
//! # Coercion
//!
//! - [`Value::as_int`]: a `Char` widens by zero extension, so it is always `0..=255`
//! - [`Value::as_char`]: an `Int` keeps its low 8 bits
//! - [`Value::coerce_to`]: converts for storage into an `int` or `char` location
//!
//! Both conversions are total; there is no failing coercion.

use crate::parser::ast::BaseType;
use std::fmt;

/// Runtime values in the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Int(i32),
    Char(u8),
}

impl Default for Value {
    fn default() -> Self {
        Value::Int(0)
    }
}

impl Value {
    /// Integer view of the value
    pub fn as_int(self) -> i32 {
        match self {
            Value::Int(n) => n,
            Value::Char(c) => i32::from(c),
        }
    }

    /// Character view of the value (low 8 bits)
    pub fn as_char(self) -> u8 {
        match self {
            Value::Int(n) => n as u8,
            Value::Char(c) => c,
        }
    }

    /// Convert for storage into a location of element type `ty`.
    ///
    /// `void` never names a storage location; it is treated like `int`.
    pub fn coerce_to(self, ty: BaseType) -> Value {
        match ty {
            BaseType::Char => Value::Char(self.as_char()),
            BaseType::Int | BaseType::Void => Value::Int(self.as_int()),
        }
    }

    /// Zero value of element type `ty`
    pub fn zero(ty: BaseType) -> Value {
        Value::Int(0).coerce_to(ty)
    }

    pub fn is_truthy(self) -> bool {
        self.as_int() != 0
    }

    /// `1` or `0` as an `Int`
    pub fn from_bool(b: bool) -> Value {
        Value::Int(i32::from(b))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Char(c) => write!(f, "'{}'", c.escape_ascii()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_widens_unsigned() {
        assert_eq!(Value::Char(b'a').as_int(), 97);
        assert_eq!(Value::Char(200).as_int(), 200);
    }

    #[test]
    fn test_int_truncates_to_low_byte() {
        assert_eq!(Value::Int(256 + 98).as_char(), b'b');
        assert_eq!(Value::Int(-1).as_char(), 255);
        assert_eq!(Value::Int(-1).coerce_to(BaseType::Char), Value::Char(255));
    }

    #[test]
    fn test_coerce_to_int_keeps_value() {
        assert_eq!(Value::Char(7).coerce_to(BaseType::Int), Value::Int(7));
        assert_eq!(Value::Int(-5).coerce_to(BaseType::Int), Value::Int(-5));
    }

    #[test]
    fn test_zero_and_truthiness() {
        assert_eq!(Value::zero(BaseType::Char), Value::Char(0));
        assert!(!Value::zero(BaseType::Int).is_truthy());
        assert!(Value::Char(1).is_truthy());
        assert_eq!(Value::from_bool(true), Value::Int(1));
    }
}
