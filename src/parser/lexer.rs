//! Lexer (tokenizer) for source programs
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! `#include` and other preprocessor lines are skipped rather than parsed; the
//! language has no preprocessor.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntLiteral(i32, SourceLocation),
    CharLiteral(u8, SourceLocation),
    /// Raw string contents, escapes left in place
    StringLiteral(String, SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // Keywords
    Int(SourceLocation),
    Char(SourceLocation),
    Void(SourceLocation),
    Const(SourceLocation),
    If(SourceLocation),
    Else(SourceLocation),
    For(SourceLocation),
    Break(SourceLocation),
    Continue(SourceLocation),
    Return(SourceLocation),

    // Arithmetic
    Plus(SourceLocation),    // +
    Minus(SourceLocation),   // -
    Star(SourceLocation),    // *
    Slash(SourceLocation),   // /
    Percent(SourceLocation), // %

    // Comparison
    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=
    Lt(SourceLocation),    // <
    Le(SourceLocation),    // <=
    Gt(SourceLocation),    // >
    Ge(SourceLocation),    // >=

    // Logical
    AndAnd(SourceLocation), // &&
    OrOr(SourceLocation),   // ||
    Bang(SourceLocation),   // !

    // Assignment
    Eq(SourceLocation), // =

    // Punctuation
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    LBrace(SourceLocation),    // {
    RBrace(SourceLocation),    // }
    LBracket(SourceLocation),  // [
    RBracket(SourceLocation),  // ]
    Semicolon(SourceLocation), // ;
    Comma(SourceLocation),     // ,

    // End of file
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::IntLiteral(_, loc)
            | Token::CharLiteral(_, loc)
            | Token::StringLiteral(_, loc)
            | Token::Ident(_, loc)
            | Token::Int(loc)
            | Token::Char(loc)
            | Token::Void(loc)
            | Token::Const(loc)
            | Token::If(loc)
            | Token::Else(loc)
            | Token::For(loc)
            | Token::Break(loc)
            | Token::Continue(loc)
            | Token::Return(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::Percent(loc)
            | Token::EqEq(loc)
            | Token::NotEq(loc)
            | Token::Lt(loc)
            | Token::Le(loc)
            | Token::Gt(loc)
            | Token::Ge(loc)
            | Token::AndAnd(loc)
            | Token::OrOr(loc)
            | Token::Bang(loc)
            | Token::Eq(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::LBracket(loc)
            | Token::RBracket(loc)
            | Token::Semicolon(loc)
            | Token::Comma(loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(n, _) => write!(f, "int literal {}", n),
            Token::CharLiteral(c, _) => {
                if c.is_ascii_graphic() || *c == b' ' {
                    write!(f, "char literal '{}'", *c as char)
                } else {
                    write!(f, "char literal '\\x{:02x}'", c)
                }
            }
            Token::StringLiteral(s, _) => write!(f, "string literal \"{}\"", s),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Int(_) => write!(f, "'int'"),
            Token::Char(_) => write!(f, "'char'"),
            Token::Void(_) => write!(f, "'void'"),
            Token::Const(_) => write!(f, "'const'"),
            Token::If(_) => write!(f, "'if'"),
            Token::Else(_) => write!(f, "'else'"),
            Token::For(_) => write!(f, "'for'"),
            Token::Break(_) => write!(f, "'break'"),
            Token::Continue(_) => write!(f, "'continue'"),
            Token::Return(_) => write!(f, "'return'"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::Percent(_) => write!(f, "'%'"),
            Token::EqEq(_) => write!(f, "'=='"),
            Token::NotEq(_) => write!(f, "'!='"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Le(_) => write!(f, "'<='"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Ge(_) => write!(f, "'>='"),
            Token::AndAnd(_) => write!(f, "'&&'"),
            Token::OrOr(_) => write!(f, "'||'"),
            Token::Bang(_) => write!(f, "'!'"),
            Token::Eq(_) => write!(f, "'='"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::LBrace(_) => write!(f, "'{{'"),
            Token::RBrace(_) => write!(f, "'}}'"),
            Token::LBracket(_) => write!(f, "'['"),
            Token::RBracket(_) => write!(f, "']'"),
            Token::Semicolon(_) => write!(f, "';'"),
            Token::Comma(_) => write!(f, "','"),
            Token::Eof(_) => write!(f, "end of file"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, Error)]
#[error("Lexer error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Byte value of the escape `\c`, or `None` if `c` is not a known escape.
///
/// `\%` is accepted so that format strings can spell a literal percent sign.
pub fn escape_value(c: char) -> Option<u8> {
    match c {
        'a' => Some(7),
        'b' => Some(8),
        't' => Some(b'\t'),
        'n' => Some(b'\n'),
        'v' => Some(11),
        'f' => Some(12),
        '"' => Some(b'"'),
        '\'' => Some(b'\''),
        '\\' => Some(b'\\'),
        '%' => Some(b'%'),
        '0' => Some(0),
        _ => None,
    }
}

/// One byte of a decoded string literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedByte {
    pub byte: u8,
    /// Produced by a backslash escape rather than written literally
    pub escaped: bool,
}

/// Decode the raw contents of a string literal, remembering which bytes came
/// from escapes.
///
/// The lexer has already rejected unknown escapes, so any stray backslash is
/// kept literally.
pub fn decode_escapes(raw: &str) -> Vec<DecodedByte> {
    let mut out = Vec::with_capacity(raw.len());
    let mut chars = raw.chars();
    let mut buf = [0u8; 4];
    let mut push_literal = |out: &mut Vec<DecodedByte>, ch: char| {
        out.extend(ch.encode_utf8(&mut buf).bytes().map(|byte| DecodedByte {
            byte,
            escaped: false,
        }));
    };

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            push_literal(&mut out, ch);
            continue;
        }
        match chars.next() {
            Some(next) => match escape_value(next) {
                Some(byte) => out.push(DecodedByte {
                    byte,
                    escaped: true,
                }),
                None => {
                    push_literal(&mut out, '\\');
                    push_literal(&mut out, next);
                }
            },
            None => push_literal(&mut out, '\\'),
        }
    }

    out
}

/// Decode the raw contents of a string literal into bytes
pub fn unescape(raw: &str) -> Vec<u8> {
    decode_escapes(raw).into_iter().map(|d| d.byte).collect()
}

/// Lexer for source programs
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            if self.peek() == Some('#') {
                self.skip_preprocessor_directive();
                continue;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        match ch {
            '"' => self.string_literal(loc),
            '\'' => self.char_literal(loc),
            '0'..='9' => self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),

            '+' => Ok(Token::Plus(loc)),
            '-' => Ok(Token::Minus(loc)),
            '*' => Ok(Token::Star(loc)),
            '/' => Ok(Token::Slash(loc)),
            '%' => Ok(Token::Percent(loc)),
            '=' => Ok(self.pair('=', Token::EqEq(loc), Token::Eq(loc))),
            '!' => Ok(self.pair('=', Token::NotEq(loc), Token::Bang(loc))),
            '<' => Ok(self.pair('=', Token::Le(loc), Token::Lt(loc))),
            '>' => Ok(self.pair('=', Token::Ge(loc), Token::Gt(loc))),
            '&' if self.peek() == Some('&') => {
                self.advance();
                Ok(Token::AndAnd(loc))
            }
            '|' if self.peek() == Some('|') => {
                self.advance();
                Ok(Token::OrOr(loc))
            }
            '(' => Ok(Token::LParen(loc)),
            ')' => Ok(Token::RParen(loc)),
            '{' => Ok(Token::LBrace(loc)),
            '}' => Ok(Token::RBrace(loc)),
            '[' => Ok(Token::LBracket(loc)),
            ']' => Ok(Token::RBracket(loc)),
            ';' => Ok(Token::Semicolon(loc)),
            ',' => Ok(Token::Comma(loc)),

            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Two-character operator if the next char is `second`, otherwise the single form
    fn pair(&mut self, second: char, double: Token, single: Token) -> Token {
        if self.peek() == Some(second) {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Parse string literal; the contents are kept raw
    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(Token::StringLiteral(string, loc));
                }
                '\n' => break,
                '\\' => {
                    let escape_loc = self.current_location();
                    self.advance();
                    let escaped = self.advance().ok_or_else(|| LexError {
                        message: "Unexpected end of file in string literal".to_string(),
                        location: escape_loc,
                    })?;
                    if escape_value(escaped).is_none() {
                        return Err(LexError {
                            message: format!("Unknown escape sequence: \\{}", escaped),
                            location: escape_loc,
                        });
                    }
                    string.push('\\');
                    string.push(escaped);
                }
                _ => {
                    string.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: loc,
        })
    }

    /// Parse character literal
    fn char_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file in character literal".to_string(),
            location: loc,
        })?;

        let value = if ch == '\\' {
            let escaped = self.advance().ok_or_else(|| LexError {
                message: "Unexpected end of file in character literal".to_string(),
                location: loc,
            })?;
            escape_value(escaped).ok_or_else(|| LexError {
                message: format!("Unknown escape sequence: \\{}", escaped),
                location: loc,
            })?
        } else {
            u8::try_from(u32::from(ch)).map_err(|_| LexError {
                message: format!("Character '{}' does not fit in a char", ch),
                location: loc,
            })?
        };

        if self.advance() != Some('\'') {
            return Err(LexError {
                message: "Expected closing quote in character literal".to_string(),
                location: loc,
            });
        }

        Ok(Token::CharLiteral(value, loc))
    }

    /// Parse numeric literal (decimal integers only)
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let value = num_str.parse::<i32>().map_err(|_| LexError {
            message: format!("Invalid integer literal: {}", num_str),
            location: loc,
        })?;

        Ok(Token::IntLiteral(value, loc))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "int" => Token::Int(loc),
            "char" => Token::Char(loc),
            "void" => Token::Void(loc),
            "const" => Token::Const(loc),
            "if" => Token::If(loc),
            "else" => Token::Else(loc),
            "for" => Token::For(loc),
            "break" => Token::Break(loc),
            "continue" => Token::Continue(loc),
            "return" => Token::Return(loc),
            _ => Token::Ident(ident, loc),
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') => match self.peek_ahead(1) {
                    Some('/') => self.skip_line_comment(),
                    Some('*') => self.skip_block_comment()?,
                    _ => break,
                },
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(LexError {
            message: "Unterminated block comment".to_string(),
            location: start_loc,
        })
    }

    /// Skip a preprocessor line (#include, etc.)
    fn skip_preprocessor_directive(&mut self) {
        self.skip_line_comment();
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("int main() { return 0; }");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Int(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "main"));
        assert!(matches!(tokens[2], Token::LParen(_)));
        assert!(matches!(tokens[3], Token::RParen(_)));
        assert!(matches!(tokens[4], Token::LBrace(_)));
        assert!(matches!(tokens[5], Token::Return(_)));
        assert!(matches!(tokens[6], Token::IntLiteral(0, _)));
        assert!(matches!(tokens[7], Token::Semicolon(_)));
        assert!(matches!(tokens[8], Token::RBrace(_)));
        assert!(matches!(tokens[9], Token::Eof(_)));
    }

    #[test]
    fn test_operators() {
        let mut lexer = Lexer::new("== != && || <= >= ! = < >");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::EqEq(_)));
        assert!(matches!(tokens[1], Token::NotEq(_)));
        assert!(matches!(tokens[2], Token::AndAnd(_)));
        assert!(matches!(tokens[3], Token::OrOr(_)));
        assert!(matches!(tokens[4], Token::Le(_)));
        assert!(matches!(tokens[5], Token::Ge(_)));
        assert!(matches!(tokens[6], Token::Bang(_)));
        assert!(matches!(tokens[7], Token::Eq(_)));
        assert!(matches!(tokens[8], Token::Lt(_)));
        assert!(matches!(tokens[9], Token::Gt(_)));
    }

    #[test]
    fn test_lone_ampersand_is_rejected() {
        let err = Lexer::new("a & b").tokenize().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 3));
    }

    #[test]
    fn test_comments() {
        let mut lexer = Lexer::new("int x; // comment\nint y; /* block\ncomment */ int z;");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Int(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[2], Token::Semicolon(_)));
        assert!(matches!(tokens[3], Token::Int(_)));
        assert!(matches!(tokens[4], Token::Ident(ref s, _) if s == "y"));
        assert!(matches!(tokens[5], Token::Semicolon(_)));
        assert!(matches!(tokens[6], Token::Int(_)));
        assert!(matches!(tokens[7], Token::Ident(ref s, _) if s == "z"));
        assert_eq!(tokens[7].location(), SourceLocation::new(3, 16));
    }

    #[test]
    fn test_comment_banner_lines() {
        let source = "///*///****////**/*///****\n/*///****///*///****////****/\nconst";
        let tokens = Lexer::new(source).tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Const(_)));
        assert!(matches!(tokens[1], Token::Eof(_)));
    }

    #[test]
    fn test_string_literal_is_kept_raw() {
        let mut lexer = Lexer::new(r#""hello\n%d \"q\"""#);
        let tokens = lexer.tokenize().unwrap();

        match &tokens[0] {
            Token::StringLiteral(s, _) => assert_eq!(s, r#"hello\n%d \"q\""#),
            other => panic!("Expected string literal, got {other}"),
        }
    }

    #[test]
    fn test_unknown_string_escape() {
        let err = Lexer::new(r#""bad \q""#).tokenize().unwrap_err();
        assert!(err.message.contains("\\q"));
    }

    #[test]
    fn test_char_literals() {
        let tokens = Lexer::new(r"'a' '\n' '\0' '\\'").tokenize().unwrap();

        assert!(matches!(tokens[0], Token::CharLiteral(97, _)));
        assert!(matches!(tokens[1], Token::CharLiteral(10, _)));
        assert!(matches!(tokens[2], Token::CharLiteral(0, _)));
        assert!(matches!(tokens[3], Token::CharLiteral(92, _)));
    }

    #[test]
    fn test_integer_literal_overflow() {
        assert!(Lexer::new("2147483648").tokenize().is_err());
        assert!(matches!(
            Lexer::new("2147483647").tokenize().unwrap()[0],
            Token::IntLiteral(i32::MAX, _)
        ));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"Hello\n"), b"Hello\n".to_vec());
        assert_eq!(unescape(r"a\tb\\c\0"), vec![b'a', b'\t', b'b', b'\\', b'c', 0]);
        assert_eq!(unescape(r"100\%"), b"100%".to_vec());
    }

    #[test]
    fn test_decode_escapes_marks_escaped_bytes() {
        let decoded = decode_escapes(r"%\%");
        assert_eq!(
            decoded,
            vec![
                DecodedByte {
                    byte: b'%',
                    escaped: false
                },
                DecodedByte {
                    byte: b'%',
                    escaped: true
                },
            ]
        );
    }

    #[test]
    fn test_preprocessor_skip() {
        let mut lexer = Lexer::new("#include \"libsysy.h\"\nint x;");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Int(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "x"));
    }
}
