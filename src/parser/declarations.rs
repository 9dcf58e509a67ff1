//! Declaration parsing implementation
//!
//! - Variable and constant declarations: `const int N = 10, M[2] = {1, 2};`
//! - Function definitions: `type name(params) { ... }`
//! - Function parameters, including `T name[]` array reference parameters
//!
//! # Grammar
//!
//! ```text
//! declaration  ::= ["const"] base_type var_def ("," var_def)* ";"
//! var_def      ::= identifier ["[" expr "]"] ["=" initializer]
//! initializer  ::= expr | "{" [expr ("," expr)*] "}" | string_literal
//! function_def ::= ret_type identifier "(" [param ("," param)*] ")" "{" statements "}"
//! param        ::= base_type identifier ["[" "]"]
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a variable or constant declaration, including the trailing `;`
    pub(crate) fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let location = self.current_location();
        let is_const = self.match_token(&Token::Const(location));

        let base = self.parse_base_type()?;
        if base == BaseType::Void {
            return Err(ParseError {
                message: "Variables cannot have type 'void'".to_string(),
                location: self.previous_location(),
            });
        }

        let mut defs = Vec::new();
        loop {
            defs.push(self.parse_var_def(is_const)?);
            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        self.expect_semicolon("after declaration")?;

        Ok(Declaration {
            is_const,
            base,
            defs,
            location,
        })
    }

    fn parse_var_def(&mut self, is_const: bool) -> Result<VarDef, ParseError> {
        let location = self.current_location();
        let name = self.expect_identifier()?;

        let array_len = if self.match_token(&Token::LBracket(self.current_location())) {
            let len = self.parse_expression()?;
            self.expect_rbracket("after array size")?;
            Some(len)
        } else {
            None
        };

        let init = if self.match_token(&Token::Eq(self.current_location())) {
            Some(self.parse_initializer(array_len.is_some())?)
        } else {
            None
        };

        if is_const && init.is_none() {
            return Err(ParseError {
                message: format!("Constant '{}' requires an initializer", name),
                location,
            });
        }

        Ok(VarDef {
            name,
            array_len,
            init,
            location,
        })
    }

    fn parse_initializer(&mut self, is_array: bool) -> Result<Initializer, ParseError> {
        let loc = self.current_location();

        if self.match_token(&Token::LBrace(loc)) {
            if !is_array {
                return Err(ParseError {
                    message: "Brace initializer on a scalar".to_string(),
                    location: loc,
                });
            }
            let mut elems = Vec::new();
            if !self.check(&Token::RBrace(self.current_location())) {
                loop {
                    elems.push(self.parse_expression()?);
                    if !self.match_token(&Token::Comma(self.current_location())) {
                        break;
                    }
                }
            }
            self.expect_rbrace("after initializer list")?;
            return Ok(Initializer::List(elems));
        }

        if is_array {
            if let Token::StringLiteral(raw, loc) = self.peek_token() {
                self.advance();
                return Ok(Initializer::Str(raw, loc));
            }
            return Err(self.error_here(format!(
                "Expected '{{' or string literal for array initializer, found {}",
                self.peek()
            )));
        }

        Ok(Initializer::Expr(self.parse_expression()?))
    }

    /// Parse function definition: type name(params) { body }
    pub(crate) fn parse_function_definition(&mut self) -> Result<FunctionDef, ParseError> {
        let return_type = self.parse_base_type()?;
        let name = self.expect_identifier()?;
        let loc = self.previous_location();

        self.expect_lparen("after function name")?;
        let params = self.parse_parameter_list()?;
        self.expect_rparen("after parameters")?;

        self.expect_lbrace("before function body")?;
        let body = self.parse_block_statements()?;
        self.expect_rbrace("after function body")?;

        Ok(FunctionDef {
            name,
            params,
            body,
            return_type,
            location: loc,
        })
    }

    /// Parse parameter list: (type name, type name[], ...)
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(params);
        }

        // (void) means no parameters
        if self.check(&Token::Void(self.current_location()))
            && matches!(self.peek_ahead(1), Some(Token::RParen(_)))
        {
            self.advance();
            return Ok(params);
        }

        loop {
            let base = self.parse_base_type()?;
            if base == BaseType::Void {
                return Err(ParseError {
                    message: "Parameters cannot have type 'void'".to_string(),
                    location: self.previous_location(),
                });
            }
            let name = self.expect_identifier()?;

            let is_array = if self.match_token(&Token::LBracket(self.current_location())) {
                self.expect_rbracket("in array parameter")?;
                true
            } else {
                false
            };

            if params.iter().any(|p: &Param| p.name == name) {
                return Err(ParseError {
                    message: format!("Duplicate parameter '{}'", name),
                    location: self.previous_location(),
                });
            }

            params.push(Param {
                name,
                base,
                is_array,
            });

            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse `int`, `char` or `void`
    pub(crate) fn parse_base_type(&mut self) -> Result<BaseType, ParseError> {
        let loc = self.current_location();
        if self.match_token(&Token::Int(loc)) {
            Ok(BaseType::Int)
        } else if self.match_token(&Token::Char(loc)) {
            Ok(BaseType::Char)
        } else if self.match_token(&Token::Void(loc)) {
            Ok(BaseType::Void)
        } else {
            Err(self.error_here(format!("Expected type, found {}", self.peek())))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::parse_source;

    #[test]
    fn test_multi_definition_declaration() {
        let program = parse_source("int a = 1, b[3] = {1, 2, 3}, c;").unwrap();
        let decl = &program.globals[0];

        assert_eq!(decl.base, BaseType::Int);
        assert_eq!(decl.defs.len(), 3);
        assert!(matches!(decl.defs[0].init, Some(Initializer::Expr(_))));
        assert!(decl.defs[1].array_len.is_some());
        assert!(matches!(decl.defs[1].init, Some(Initializer::List(ref v)) if v.len() == 3));
        assert!(decl.defs[2].init.is_none());
    }

    #[test]
    fn test_string_initializer() {
        let program = parse_source(r#"char s[8] = "hi\n";"#).unwrap();
        match &program.globals[0].defs[0].init {
            Some(Initializer::Str(raw, _)) => assert_eq!(raw, r"hi\n"),
            other => panic!("Expected string initializer, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_brace_initializer() {
        let program = parse_source("int a[4] = {};").unwrap();
        assert!(matches!(
            program.globals[0].defs[0].init,
            Some(Initializer::List(ref v)) if v.is_empty()
        ));
    }

    #[test]
    fn test_const_requires_initializer() {
        assert!(parse_source("const int N;").is_err());
    }

    #[test]
    fn test_void_variable_is_rejected() {
        assert!(parse_source("void x;").is_err());
    }

    #[test]
    fn test_brace_initializer_on_scalar_is_rejected() {
        assert!(parse_source("int x = {1};").is_err());
    }

    #[test]
    fn test_parameters() {
        let program = parse_source("int f(int a, char b[], int c) { return a; }").unwrap();
        let params = &program.functions[0].params;

        assert_eq!(params.len(), 3);
        assert_eq!(params[1].base, BaseType::Char);
        assert!(params[1].is_array);
        assert!(!params[2].is_array);
    }

    #[test]
    fn test_void_parameter_list() {
        let program = parse_source("int f(void) { return 1; }").unwrap();
        assert!(program.functions[0].params.is_empty());
    }
}
