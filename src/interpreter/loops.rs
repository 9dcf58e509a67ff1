//! Loop statement execution (`for`).
//!
//! `break` and `continue` are folded into a [`LoopBodyResult`] so the loop
//! driver can react without matching on every [`ControlFlow`] variant.
//! `return` inside a loop body becomes [`LoopBodyResult::Exit`], which unwinds
//! the loop immediately without running the update clause.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::{Expr, Stmt};
use crate::runtime::Console;

/// How one execution of a loop body ended
pub(crate) enum LoopBodyResult {
    /// Body completed normally or via `continue`; run the update and iterate.
    Continue,
    /// `break` was encountered; the loop exits cleanly.
    Break,
    /// `return` was triggered; the signal is propagated to the caller.
    Exit(ControlFlow),
}

impl<C: Console> Interpreter<C> {
    pub(crate) fn execute_loop_body(&mut self, body: &Stmt) -> Result<LoopBodyResult, RuntimeError> {
        Ok(match self.execute_statement(body)? {
            ControlFlow::Normal | ControlFlow::Continue(_) => LoopBodyResult::Continue,
            ControlFlow::Break(_) => LoopBodyResult::Break,
            flow @ ControlFlow::Return(_) => LoopBodyResult::Exit(flow),
        })
    }

    /// Executes a `for (init; condition; update) body` loop.
    ///
    /// `init`, `condition` and `update` are all optional. A missing condition
    /// is always true. The loop owns a scope, so a declaration in `init` is
    /// local to the loop.
    pub(crate) fn execute_for(
        &mut self,
        init: Option<&Stmt>,
        condition: Option<&Expr>,
        update: Option<&Stmt>,
        body: &Stmt,
    ) -> Result<ControlFlow, RuntimeError> {
        self.stack.push_scope();
        let flow = self.run_for(init, condition, update, body);
        self.stack.pop_scope();
        flow
    }

    fn run_for(
        &mut self,
        init: Option<&Stmt>,
        condition: Option<&Expr>,
        update: Option<&Stmt>,
        body: &Stmt,
    ) -> Result<ControlFlow, RuntimeError> {
        if let Some(init_stmt) = init {
            self.execute_statement(init_stmt)?;
        }

        loop {
            if let Some(cond) = condition {
                if !self.evaluate_expr(cond)?.is_truthy() {
                    break;
                }
            }

            match self.execute_loop_body(body)? {
                LoopBodyResult::Exit(flow) => return Ok(flow),
                LoopBodyResult::Break => break,
                LoopBodyResult::Continue => {}
            }

            if let Some(update_stmt) = update {
                self.execute_statement(update_stmt)?;
            }
        }

        Ok(ControlFlow::Normal)
    }
}
