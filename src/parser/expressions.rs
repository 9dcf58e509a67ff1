//! Expression parsing implementation
//!
//! One method per precedence level, lowest first:
//!
//! ```text
//! ||  >  &&  >  == !=  >  < <= > >=  >  + -  >  * / %  >  unary + - !  >  postfix [] ()  >  primary
//! ```
//!
//! All binary levels are left-associative. Unary operators nest to the right.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};
use crate::recursion::ensure_sufficient_stack;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_logical_or())
    }

    /// Build a left-associative binary node
    fn binary(op: BinOp, left: Expr, right: Expr, location: SourceLocation) -> Expr {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            location,
        }
    }

    fn logical(op: LogicalOp, left: Expr, right: Expr, location: SourceLocation) -> Expr {
        Expr::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
            location,
        }
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_and()?;

        while self.match_token(&Token::OrOr(self.current_location())) {
            let loc = self.previous_location();
            let right = self.parse_logical_and()?;
            left = Self::logical(LogicalOp::Or, left, right, loc);
        }

        Ok(left)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;

        while self.match_token(&Token::AndAnd(self.current_location())) {
            let loc = self.previous_location();
            let right = self.parse_equality()?;
            left = Self::logical(LogicalOp::And, left, right, loc);
        }

        Ok(left)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_relational()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::EqEq(loc)) {
                BinOp::Eq
            } else if self.match_token(&Token::NotEq(loc)) {
                BinOp::Ne
            } else {
                break;
            };

            let right = self.parse_relational()?;
            left = Self::binary(op, left, right, loc);
        }

        Ok(left)
    }

    /// Parse relational (< <= > >=)
    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Lt(loc)) {
                BinOp::Lt
            } else if self.match_token(&Token::Le(loc)) {
                BinOp::Le
            } else if self.match_token(&Token::Gt(loc)) {
                BinOp::Gt
            } else if self.match_token(&Token::Ge(loc)) {
                BinOp::Ge
            } else {
                break;
            };

            let right = self.parse_additive()?;
            left = Self::binary(op, left, right, loc);
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Plus(loc)) {
                BinOp::Add
            } else if self.match_token(&Token::Minus(loc)) {
                BinOp::Sub
            } else {
                break;
            };

            let right = self.parse_multiplicative()?;
            left = Self::binary(op, left, right, loc);
        }

        Ok(left)
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Star(loc)) {
                BinOp::Mul
            } else if self.match_token(&Token::Slash(loc)) {
                BinOp::Div
            } else if self.match_token(&Token::Percent(loc)) {
                BinOp::Mod
            } else {
                break;
            };

            let right = self.parse_unary()?;
            left = Self::binary(op, left, right, loc);
        }

        Ok(left)
    }

    /// Parse unary (+ - !)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        let op = if self.match_token(&Token::Bang(loc)) {
            UnOp::Not
        } else if self.match_token(&Token::Minus(loc)) {
            UnOp::Neg
        } else if self.match_token(&Token::Plus(loc)) {
            UnOp::Plus
        } else {
            return self.parse_postfix();
        };

        let operand = Box::new(ensure_sufficient_stack(|| self.parse_unary())?);
        Ok(Expr::UnaryOp {
            op,
            operand,
            location: loc,
        })
    }

    /// Parse postfix: `name[index]` and `name(args)`
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let Token::Ident(name, loc) = self.peek_token() else {
            return self.parse_primary();
        };
        self.advance();

        if self.match_token(&Token::LBracket(self.current_location())) {
            let index = Box::new(self.parse_expression()?);
            self.expect_rbracket("after array index")?;
            return Ok(Expr::ArrayAccess {
                name,
                index,
                location: loc,
            });
        }

        if self.match_token(&Token::LParen(self.current_location())) {
            let args = self.parse_argument_list()?;
            self.expect_rparen("after function arguments")?;
            return Ok(Expr::FunctionCall {
                name,
                args,
                location: loc,
            });
        }

        Ok(Expr::Variable(name, loc))
    }

    /// Parse argument list: (expr, expr, ...)
    fn parse_argument_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        Ok(args)
    }

    /// Parse primary (literals, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        match self.peek_token() {
            Token::IntLiteral(n, loc) => {
                self.advance();
                Ok(Expr::IntLiteral(n, loc))
            }
            Token::CharLiteral(c, loc) => {
                self.advance();
                Ok(Expr::CharLiteral(c, loc))
            }
            Token::StringLiteral(s, loc) => {
                self.advance();
                Ok(Expr::StringLiteral(s, loc))
            }
            Token::LParen(_) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("after expression")?;
                Ok(expr)
            }
            other => Err(ParseError {
                message: format!("Unexpected token: {}", other),
                location: loc,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::Parser;

    fn expr(source: &str) -> Expr {
        let mut parser = Parser::new(source).unwrap();
        parser.parse_expression().unwrap()
    }

    fn op_of(e: &Expr) -> BinOp {
        match e {
            Expr::BinaryOp { op, .. } => *op,
            other => panic!("Expected binary op, got {:?}", other),
        }
    }

    #[test]
    fn test_multiplicative_binds_tighter_than_additive() {
        let e = expr("1 + 2 * 3");
        assert_eq!(op_of(&e), BinOp::Add);
        if let Expr::BinaryOp { right, .. } = e {
            assert_eq!(op_of(&right), BinOp::Mul);
        }
    }

    #[test]
    fn test_left_associativity() {
        // (((1 * 2) / 3) % 4)
        let e = expr("1 * 2 / 3 % 4");
        assert_eq!(op_of(&e), BinOp::Mod);
        if let Expr::BinaryOp { left, .. } = e {
            assert_eq!(op_of(&left), BinOp::Div);
        }
    }

    #[test]
    fn test_logical_precedence() {
        // a || (b && (c == d))
        match expr("a || b && c == d") {
            Expr::Logical {
                op: LogicalOp::Or,
                right,
                ..
            } => match *right {
                Expr::Logical {
                    op: LogicalOp::And,
                    right: inner,
                    ..
                } => assert_eq!(op_of(&inner), BinOp::Eq),
                other => panic!("Expected &&, got {:?}", other),
            },
            other => panic!("Expected ||, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_unary() {
        match expr("!-+x") {
            Expr::UnaryOp {
                op: UnOp::Not,
                operand,
                ..
            } => assert!(matches!(*operand, Expr::UnaryOp { op: UnOp::Neg, .. })),
            other => panic!("Expected unary not, got {:?}", other),
        }
    }

    #[test]
    fn test_call_and_index() {
        match expr("f(a[1], 'c', \"s\")") {
            Expr::FunctionCall { name, args, .. } => {
                assert_eq!(name, "f");
                assert_eq!(args.len(), 3);
                assert!(matches!(args[0], Expr::ArrayAccess { .. }));
                assert!(matches!(args[1], Expr::CharLiteral(b'c', _)));
                assert!(matches!(args[2], Expr::StringLiteral(_, _)));
            }
            other => panic!("Expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let e = expr("(1 + 2) * 3");
        assert_eq!(op_of(&e), BinOp::Mul);
    }
}
