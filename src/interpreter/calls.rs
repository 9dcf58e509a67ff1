//! Function call execution
//!
//! Arguments are evaluated once, left to right, before the callee's frame is
//! pushed. Scalar parameters receive a copy coerced to the parameter type.
//! Array parameters (`T name[]`) are bound to the caller's storage handle, so
//! writes in the callee are visible to the caller as soon as they happen. A
//! `const` array stays read-only through the parameter.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::stack::Binding;
use crate::memory::value::Value;
use crate::parser::ast::*;
use crate::recursion::ensure_sufficient_stack;
use crate::runtime::Console;
use std::rc::Rc;
use tracing::debug;

impl<C: Console> Interpreter<C> {
    /// Call a built-in or user function. `None` means the callee is `void`.
    pub(crate) fn execute_function_call(
        &mut self,
        name: &str,
        args: &[Expr],
        location: SourceLocation,
    ) -> Result<Option<Value>, RuntimeError> {
        match name {
            "getint" => self.builtin_getint(args, location),
            "getchar" => self.builtin_getchar(args, location),
            "printf" => self.builtin_printf(args, location),
            _ => {
                let func_def = self.function_defs.get(name).cloned().ok_or_else(|| {
                    RuntimeError::UndefinedFunction {
                        name: name.to_string(),
                        location,
                    }
                })?;
                self.call_user_function(&func_def, args, location)
            }
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(function = %func_def.name))]
    pub(crate) fn call_user_function(
        &mut self,
        func_def: &Rc<FunctionDef>,
        args: &[Expr],
        location: SourceLocation,
    ) -> Result<Option<Value>, RuntimeError> {
        if args.len() != func_def.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch {
                function: func_def.name.clone(),
                expected: func_def.params.len(),
                got: args.len(),
                location,
            });
        }

        let mut bindings = Vec::with_capacity(args.len());
        for (param, arg) in func_def.params.iter().zip(args) {
            bindings.push(self.bind_argument(param, arg)?);
        }

        if self.call_depth >= self.config.max_call_depth {
            return Err(RuntimeError::StackOverflow {
                function: func_def.name.clone(),
                limit: self.config.max_call_depth,
                location,
            });
        }

        self.stack.push_frame();
        self.call_depth += 1;
        debug!(depth = self.call_depth, "entering function");

        let result = ensure_sufficient_stack(|| self.run_function_body(func_def, bindings));

        self.call_depth -= 1;
        self.stack.pop_frame();
        debug!(depth = self.call_depth, "leaving function");

        result
    }

    fn bind_argument(&mut self, param: &Param, arg: &Expr) -> Result<Binding, RuntimeError> {
        if !param.is_array {
            let value = self.evaluate_expr(arg)?;
            return Ok(Binding::scalar(value, param.base, false));
        }

        let Expr::Variable(name, location) = arg else {
            return Err(RuntimeError::TypeError {
                expected: format!("array argument for parameter '{}'", param.name),
                got: "expression".to_string(),
                location: arg.location(),
            });
        };

        let (array, elem_type, is_const) = self.array_handle(name, *location)?;
        if elem_type != param.base {
            return Err(RuntimeError::TypeError {
                expected: format!("{} array for parameter '{}'", param.base, param.name),
                got: format!("{} array '{}'", elem_type, name),
                location: *location,
            });
        }
        Ok(Binding::array_ref(array, elem_type, is_const))
    }

    fn run_function_body(
        &mut self,
        func_def: &FunctionDef,
        bindings: Vec<Binding>,
    ) -> Result<Option<Value>, RuntimeError> {
        for (param, binding) in func_def.params.iter().zip(bindings) {
            self.stack
                .declare(&param.name, binding)
                .map_err(|_| RuntimeError::Redeclaration {
                    name: param.name.clone(),
                    location: func_def.location,
                })?;
        }

        // The body shares the parameter scope
        let flow = self.execute_statements(&func_def.body)?;

        let returned = match flow {
            ControlFlow::Normal => None,
            ControlFlow::Return(value) => value,
            ControlFlow::Break(location) => {
                return Err(RuntimeError::MisplacedJump {
                    keyword: "break",
                    location,
                })
            }
            ControlFlow::Continue(location) => {
                return Err(RuntimeError::MisplacedJump {
                    keyword: "continue",
                    location,
                })
            }
        };

        Ok(match func_def.return_type {
            BaseType::Void => None,
            ret => Some(returned.unwrap_or(Value::Int(0)).coerce_to(ret)),
        })
    }
}
