//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statement ::= declaration | if_stmt | for_stmt | return_stmt
//!             | "break" ";" | "continue" ";" | block | ";"
//!             | lvalue "=" expr ";" | expr ";"
//! for_stmt  ::= "for" "(" [for_init] ";" [expr] ";" [simple] ")" statement
//! for_init  ::= declaration_without_semicolon | simple
//! simple    ::= lvalue "=" expr | expr
//! ```
//!
//! Assignment is a statement, not an expression: the parser reads an
//! expression and, when `=` follows, reinterprets it as an [`LValue`].

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};
use crate::recursion::ensure_sufficient_stack;

impl Parser {
    /// Parse block statements (inside braces, excluding the braces themselves)
    pub(crate) fn parse_block_statements(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(&Token::RBrace(self.current_location())) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();

        if self.match_token(&Token::Return(loc)) {
            return self.parse_return_statement();
        }

        if self.match_token(&Token::If(loc)) {
            return self.parse_if_statement();
        }

        if self.match_token(&Token::For(loc)) {
            return self.parse_for_statement();
        }

        if self.match_token(&Token::Break(loc)) {
            self.expect_semicolon("after 'break'")?;
            return Ok(Stmt::Break { location: loc });
        }

        if self.match_token(&Token::Continue(loc)) {
            self.expect_semicolon("after 'continue'")?;
            return Ok(Stmt::Continue { location: loc });
        }

        if self.match_token(&Token::Semicolon(loc)) {
            return Ok(Stmt::Empty { location: loc });
        }

        if self.match_token(&Token::LBrace(loc)) {
            let statements = self.parse_block_statements()?;
            self.expect_rbrace("after block")?;
            return Ok(Stmt::Block {
                statements,
                location: loc,
            });
        }

        if self.is_declaration_start() {
            return Ok(Stmt::Declaration(self.parse_declaration()?));
        }

        let stmt = self.parse_simple_statement()?;
        self.expect_semicolon("after statement")?;
        Ok(stmt)
    }

    /// Parse `lvalue = expr` or a bare expression, without the trailing `;`
    fn parse_simple_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        let expr = self.parse_expression()?;

        if self.match_token(&Token::Eq(self.current_location())) {
            let eq_loc = self.previous_location();
            let target = Self::expr_to_lvalue(expr, eq_loc)?;
            let value = self.parse_expression()?;
            return Ok(Stmt::Assign {
                target,
                value,
                location: loc,
            });
        }

        Ok(Stmt::Expression {
            expr,
            location: loc,
        })
    }

    fn expr_to_lvalue(expr: Expr, eq_loc: SourceLocation) -> Result<LValue, ParseError> {
        match expr {
            Expr::Variable(name, location) => Ok(LValue {
                name,
                index: None,
                location,
            }),
            Expr::ArrayAccess {
                name,
                index,
                location,
            } => Ok(LValue {
                name,
                index: Some(index),
                location,
            }),
            _ => Err(ParseError {
                message: "Invalid assignment target".to_string(),
                location: eq_loc,
            }),
        }
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.previous_location();

        let expr = if self.check(&Token::Semicolon(self.current_location())) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect_semicolon("after return")?;

        Ok(Stmt::Return {
            expr,
            location: loc,
        })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.previous_location();

        self.expect_lparen("after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after if condition")?;

        let then_branch = Box::new(self.parse_statement()?);

        // Dangling else binds to the nearest if
        let else_branch = if self.match_token(&Token::Else(self.current_location())) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location: loc,
        })
    }

    /// Parse for statement
    fn parse_for_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.previous_location();

        self.expect_lparen("after 'for'")?;

        // Init (optional); a declaration consumes its own ';'
        let init = if self.match_token(&Token::Semicolon(self.current_location())) {
            None
        } else if self.is_declaration_start() {
            Some(Box::new(Stmt::Declaration(self.parse_declaration()?)))
        } else {
            let init = self.parse_simple_statement()?;
            self.expect_semicolon("after for init")?;
            Some(Box::new(init))
        };

        // Condition (optional)
        let condition = if self.check(&Token::Semicolon(self.current_location())) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_semicolon("after for condition")?;

        // Update (optional)
        let update = if self.check(&Token::RParen(self.current_location())) {
            None
        } else {
            Some(Box::new(self.parse_simple_statement()?))
        };
        self.expect_rparen("after for clauses")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::For {
            init,
            condition,
            update,
            body,
            location: loc,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::parse_source;

    fn main_body(source: &str) -> Vec<Stmt> {
        let program = parse_source(source).unwrap();
        program.function("main").unwrap().body.clone()
    }

    #[test]
    fn test_assignment_statement() {
        let body = main_body("int main() { a[i + 1] = 3; x = a[0]; }");

        match &body[0] {
            Stmt::Assign { target, .. } => {
                assert_eq!(target.name, "a");
                assert!(target.index.is_some());
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
        assert!(matches!(&body[1], Stmt::Assign { target, .. } if target.index.is_none()));
    }

    #[test]
    fn test_invalid_assignment_target() {
        let err = parse_source("int main() { f() = 1; }").unwrap_err();
        assert!(err.message.contains("Invalid assignment target"));
    }

    #[test]
    fn test_for_with_empty_clauses() {
        let body = main_body("int main() { for (;;) break; }");

        match &body[0] {
            Stmt::For {
                init,
                condition,
                update,
                body,
                ..
            } => {
                assert!(init.is_none());
                assert!(condition.is_none());
                assert!(update.is_none());
                assert!(matches!(**body, Stmt::Break { .. }));
            }
            other => panic!("Expected for loop, got {:?}", other),
        }
    }

    #[test]
    fn test_for_with_all_clauses() {
        let body = main_body("int main() { for (i = 0; i < 10; i = i + 1) { continue; } }");

        match &body[0] {
            Stmt::For {
                init: Some(init),
                condition: Some(_),
                update: Some(update),
                ..
            } => {
                assert!(matches!(**init, Stmt::Assign { .. }));
                assert!(matches!(**update, Stmt::Assign { .. }));
            }
            other => panic!("Expected full for loop, got {:?}", other),
        }
    }

    #[test]
    fn test_for_init_declaration() {
        let body = main_body("int main() { for (int i = 0; i < 3; i = i + 1) ; }");
        assert!(matches!(
            &body[0],
            Stmt::For { init: Some(init), .. } if matches!(**init, Stmt::Declaration(_))
        ));
    }

    #[test]
    fn test_dangling_else() {
        let body = main_body("int main() { if (a) if (b) x = 1; else x = 2; }");

        match &body[0] {
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                assert!(else_branch.is_none());
                assert!(matches!(
                    **then_branch,
                    Stmt::If {
                        else_branch: Some(_),
                        ..
                    }
                ));
            }
            other => panic!("Expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_and_block_statements() {
        let body = main_body("int main() { ; { int x; x = 1; } return; }");

        assert!(matches!(body[0], Stmt::Empty { .. }));
        assert!(matches!(&body[1], Stmt::Block { statements, .. } if statements.len() == 2));
        assert!(matches!(body[2], Stmt::Return { expr: None, .. }));
    }
}
