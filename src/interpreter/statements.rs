//! Statement execution implementation
//!
//! - Declarations with scalar, list and string initialisers
//! - Assignments to scalars and array elements
//! - `if`/`else`, blocks, `break`, `continue`, `return`
//!
//! `for` lives in `loops`. Every method returns a [`ControlFlow`] signal;
//! anything other than `Normal` stops the enclosing statement list and is
//! handled by the nearest loop or function call.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::stack::{Binding, Storage};
use crate::memory::value::Value;
use crate::parser::ast::*;
use crate::parser::lexer::unescape;
use crate::recursion::ensure_sufficient_stack;
use crate::runtime::Console;
use tracing::trace;

impl<C: Console> Interpreter<C> {
    pub(crate) fn execute_statement(&mut self, stmt: &Stmt) -> Result<ControlFlow, RuntimeError> {
        ensure_sufficient_stack(|| self.execute_statement_inner(stmt))
    }

    fn execute_statement_inner(&mut self, stmt: &Stmt) -> Result<ControlFlow, RuntimeError> {
        trace!(line = stmt.location().line, "executing statement");

        match stmt {
            Stmt::Expression { expr, .. } => {
                self.evaluate_expr(expr)?;
                Ok(ControlFlow::Normal)
            }
            Stmt::Empty { .. } => Ok(ControlFlow::Normal),
            Stmt::Block { statements, .. } => self.execute_block(statements),
            Stmt::Declaration(decl) => {
                self.execute_declaration(decl)?;
                Ok(ControlFlow::Normal)
            }
            Stmt::Assign { target, value, .. } => {
                self.execute_assignment(target, value)?;
                Ok(ControlFlow::Normal)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => self.execute_if(condition, then_branch, else_branch.as_deref()),
            Stmt::For {
                init,
                condition,
                update,
                body,
                ..
            } => self.execute_for(init.as_deref(), condition.as_ref(), update.as_deref(), body),
            Stmt::Break { location } => Ok(ControlFlow::Break(*location)),
            Stmt::Continue { location } => Ok(ControlFlow::Continue(*location)),
            Stmt::Return { expr, .. } => self.execute_return(expr.as_ref()),
        }
    }

    /// Run `statements` in a fresh scope
    pub(crate) fn execute_block(&mut self, statements: &[Stmt]) -> Result<ControlFlow, RuntimeError> {
        self.stack.push_scope();
        let flow = self.execute_statements(statements);
        self.stack.pop_scope();
        flow
    }

    /// Run `statements` in the current scope, stopping at the first non-normal signal
    pub(crate) fn execute_statements(
        &mut self,
        statements: &[Stmt],
    ) -> Result<ControlFlow, RuntimeError> {
        for stmt in statements {
            let flow = self.execute_statement(stmt)?;
            if flow != ControlFlow::Normal {
                return Ok(flow);
            }
        }
        Ok(ControlFlow::Normal)
    }

    pub(crate) fn execute_declaration(&mut self, decl: &Declaration) -> Result<(), RuntimeError> {
        for def in &decl.defs {
            let binding = match &def.array_len {
                None => self.scalar_binding(decl, def)?,
                Some(len_expr) => self.array_binding(decl, def, len_expr)?,
            };

            self.stack
                .declare(&def.name, binding)
                .map_err(|_| RuntimeError::Redeclaration {
                    name: def.name.clone(),
                    location: def.location,
                })?;
        }
        Ok(())
    }

    fn scalar_binding(&mut self, decl: &Declaration, def: &VarDef) -> Result<Binding, RuntimeError> {
        let value = match &def.init {
            None => Value::zero(decl.base),
            Some(Initializer::Expr(expr)) => self.evaluate_expr(expr)?,
            Some(Initializer::List(_)) | Some(Initializer::Str(..)) => {
                return Err(RuntimeError::TypeError {
                    expected: format!("scalar initializer for '{}'", def.name),
                    got: "array initializer".to_string(),
                    location: def.location,
                });
            }
        };
        Ok(Binding::scalar(value, decl.base, decl.is_const))
    }

    fn array_binding(
        &mut self,
        decl: &Declaration,
        def: &VarDef,
        len_expr: &Expr,
    ) -> Result<Binding, RuntimeError> {
        let size = self.evaluate_expr(len_expr)?.as_int();
        let len = usize::try_from(size).map_err(|_| RuntimeError::InvalidArraySize {
            name: def.name.clone(),
            size,
            location: len_expr.location(),
        })?;

        let mut elems = vec![Value::zero(decl.base); len];
        let too_long = |count: usize| RuntimeError::InitializerTooLong {
            name: def.name.clone(),
            count,
            len,
            location: def.location,
        };

        match &def.init {
            None => {}
            Some(Initializer::List(exprs)) => {
                if exprs.len() > len {
                    return Err(too_long(exprs.len()));
                }
                for (slot, expr) in elems.iter_mut().zip(exprs) {
                    *slot = self.evaluate_expr(expr)?.coerce_to(decl.base);
                }
            }
            Some(Initializer::Str(raw, location)) => {
                if decl.base != BaseType::Char {
                    return Err(RuntimeError::TypeError {
                        expected: format!("char array for string initializer of '{}'", def.name),
                        got: format!("{} array", decl.base),
                        location: *location,
                    });
                }
                let mut bytes = unescape(raw);
                bytes.push(0);
                if bytes.len() > len {
                    return Err(too_long(bytes.len()));
                }
                for (slot, byte) in elems.iter_mut().zip(bytes) {
                    *slot = Value::Char(byte);
                }
            }
            Some(Initializer::Expr(expr)) => {
                return Err(RuntimeError::TypeError {
                    expected: format!("array initializer for '{}'", def.name),
                    got: "scalar expression".to_string(),
                    location: expr.location(),
                });
            }
        }

        Ok(Binding::array(elems, decl.base, decl.is_const))
    }

    /// `target = value`; the index is evaluated before the right-hand side
    pub(crate) fn execute_assignment(
        &mut self,
        target: &LValue,
        value: &Expr,
    ) -> Result<(), RuntimeError> {
        let index = match &target.index {
            Some(index_expr) => Some(self.evaluate_expr(index_expr)?.as_int()),
            None => None,
        };
        let value = self.evaluate_expr(value)?;

        let binding = self
            .stack
            .lookup_mut(&target.name)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: target.name.clone(),
                location: target.location,
            })?;

        if binding.is_const {
            return Err(RuntimeError::ConstModification {
                var: target.name.clone(),
                location: target.location,
            });
        }

        let stored = value.coerce_to(binding.elem_type);
        match (&mut binding.storage, index) {
            (Storage::Scalar(slot), None) => {
                *slot = stored;
                Ok(())
            }
            (Storage::Array(arr), Some(index)) => {
                let mut elems = arr.borrow_mut();
                let len = elems.len();
                match usize::try_from(index) {
                    Ok(i) if i < len => {
                        elems[i] = stored;
                        Ok(())
                    }
                    _ => Err(RuntimeError::IndexOutOfBounds {
                        name: target.name.clone(),
                        index,
                        len,
                        location: target.location,
                    }),
                }
            }
            (Storage::Array(_), None) => Err(RuntimeError::TypeError {
                expected: "scalar assignment target".to_string(),
                got: format!("array '{}'", target.name),
                location: target.location,
            }),
            (Storage::Scalar(_), Some(_)) => Err(RuntimeError::TypeError {
                expected: "array".to_string(),
                got: format!("scalar '{}'", target.name),
                location: target.location,
            }),
        }
    }

    fn execute_if(
        &mut self,
        condition: &Expr,
        then_branch: &Stmt,
        else_branch: Option<&Stmt>,
    ) -> Result<ControlFlow, RuntimeError> {
        if self.evaluate_expr(condition)?.is_truthy() {
            self.execute_statement(then_branch)
        } else if let Some(else_stmt) = else_branch {
            self.execute_statement(else_stmt)
        } else {
            Ok(ControlFlow::Normal)
        }
    }

    fn execute_return(&mut self, expr: Option<&Expr>) -> Result<ControlFlow, RuntimeError> {
        let value = match expr {
            Some(e) => Some(self.evaluate_expr(e)?),
            None => None,
        };
        Ok(ControlFlow::Return(value))
    }
}
