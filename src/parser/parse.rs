//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: variable/constant declarations and function definitions
//! - `statements`: blocks, `if`, `for`, jumps, assignments
//! - `expressions`: one method per precedence level
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, Error)]
#[error("Parse error at {location}: {message}")]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Build a parser over an already-lexed token stream
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(Token::Eof(_))) {
            let loc = tokens
                .last()
                .map(Token::location)
                .unwrap_or_else(|| SourceLocation::new(1, 1));
            tokens.push(Token::Eof(loc));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse the entire program: global declarations and function definitions
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            if self.is_function_definition() {
                let function = self.parse_function_definition()?;
                if program.function(&function.name).is_some() {
                    return Err(ParseError {
                        message: format!("Redefinition of function '{}'", function.name),
                        location: function.location,
                    });
                }
                program.functions.push(function);
            } else {
                program.globals.push(self.parse_declaration()?);
            }
        }

        Ok(program)
    }

    // ===== Helper methods =====

    /// `int`, `char` or `void` at the current position
    pub(crate) fn is_type_keyword(&self) -> bool {
        matches!(
            self.peek(),
            Token::Int(_) | Token::Char(_) | Token::Void(_)
        )
    }

    /// Start of a local or global declaration
    pub(crate) fn is_declaration_start(&self) -> bool {
        matches!(self.peek(), Token::Const(_) | Token::Int(_) | Token::Char(_))
    }

    /// `type ident (` marks a function definition
    fn is_function_definition(&self) -> bool {
        self.is_type_keyword()
            && matches!(self.peek_ahead(1), Some(Token::Ident(_, _)))
            && matches!(self.peek_ahead(2), Some(Token::LParen(_)))
    }

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_token(&self) -> Token {
        self.tokens[self.position].clone()
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn previous_location(&self) -> SourceLocation {
        self.previous().location()
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    pub(crate) fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect_token(&mut self, token: &Token, message: &str) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(format!("{}, found {}", message, self.peek())))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LParen(self.current_location()),
            &format!("Expected '(' {ctx}"),
        )
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RParen(self.current_location()),
            &format!("Expected ')' {ctx}"),
        )
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LBrace(self.current_location()),
            &format!("Expected '{{' {ctx}"),
        )
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RBrace(self.current_location()),
            &format!("Expected '}}' {ctx}"),
        )
    }

    pub(crate) fn expect_rbracket(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RBracket(self.current_location()),
            &format!("Expected ']' {ctx}"),
        )
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            &format!("Expected ';' {ctx}"),
        )
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let Token::Ident(name, _) = self.peek_token() {
            self.advance();
            Ok(name)
        } else {
            Err(self.error_here(format!("Expected identifier, found {}", self.peek())))
        }
    }
}

/// Lex and parse `source` into a [`Program`]
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    Parser::new(source)?.parse_program()
}
