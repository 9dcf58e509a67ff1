// Execution engine for the evaluator

use crate::interpreter::constants::{DEFAULT_MAX_CALL_DEPTH, EXIT_STATUS_MASK};
use crate::interpreter::errors::RuntimeError;
use crate::memory::stack::{Stack, Storage};
use crate::memory::value::Value;
use crate::parser::ast::*;
use crate::runtime::Console;
use rustc_hash::FxHashMap;
use std::rc::Rc;
use tracing::{debug, info};

/// Signal produced by executing a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Normal,
    Break(SourceLocation),
    Continue(SourceLocation),
    Return(Option<Value>),
}

/// Process exit status for a `main` result: its low 8 bits
pub fn exit_status(code: i32) -> u8 {
    (code & EXIT_STATUS_MASK) as u8
}

/// Tunables for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Calls nested deeper than this fail with `StackOverflow`
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// The main interpreter that executes a program
pub struct Interpreter<C: Console> {
    /// Global declarations, executed once before `main`
    globals: Vec<Declaration>,

    /// Function definitions (name -> FunctionDef)
    pub(crate) function_defs: FxHashMap<String, Rc<FunctionDef>>,

    /// Global scope and call stack
    pub(crate) stack: Stack,

    /// Input/output channel for the built-ins
    pub(crate) console: C,

    pub(crate) config: InterpreterConfig,

    /// Number of user-function calls currently active
    pub(crate) call_depth: usize,

    globals_initialized: bool,
}

impl<C: Console> Interpreter<C> {
    /// Create a new interpreter with the parsed program
    pub fn new(program: Program, console: C) -> Self {
        Self::with_config(program, console, InterpreterConfig::default())
    }

    pub fn with_config(program: Program, console: C, config: InterpreterConfig) -> Self {
        let Program { globals, functions } = program;
        let function_defs = functions
            .into_iter()
            .map(|f| (f.name.clone(), Rc::new(f)))
            .collect();

        Interpreter {
            globals,
            function_defs,
            stack: Stack::new(),
            console,
            config,
            call_depth: 0,
            globals_initialized: false,
        }
    }

    /// Run the program: initialise globals, call `main`, return its result.
    ///
    /// Console output is flushed whether or not the run succeeds.
    pub fn run(&mut self) -> Result<i32, RuntimeError> {
        info!(functions = self.function_defs.len(), "starting run");

        let result = self.run_main();
        let flushed = self.console.flush().map_err(|e| {
            RuntimeError::from_console(e, "flush", SourceLocation::new(1, 1))
        });

        let code = result?;
        flushed?;
        info!(code, "run finished");
        Ok(code)
    }

    fn run_main(&mut self) -> Result<i32, RuntimeError> {
        self.initialize_globals()?;

        let main_fn = self
            .function_defs
            .get("main")
            .cloned()
            .ok_or(RuntimeError::NoMainFunction)?;

        let value = self.call_user_function(&main_fn, &[], main_fn.location)?;
        Ok(value.map_or(0, Value::as_int))
    }

    /// Execute global declarations in source order, once
    fn initialize_globals(&mut self) -> Result<(), RuntimeError> {
        if self.globals_initialized {
            return Ok(());
        }
        self.globals_initialized = true;

        let globals = std::mem::take(&mut self.globals);
        for decl in &globals {
            debug!(line = decl.location.line, "initialising global declaration");
            self.execute_declaration(decl)?;
        }
        self.globals = globals;
        Ok(())
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Current value of a global scalar
    pub fn global_value(&self, name: &str) -> Option<Value> {
        match self.stack.globals().get(name)?.storage {
            Storage::Scalar(v) => Some(v),
            Storage::Array(_) => None,
        }
    }

    /// Snapshot of a global array's elements
    pub fn global_array(&self, name: &str) -> Option<Vec<Value>> {
        match &self.stack.globals().get(name)?.storage {
            Storage::Array(arr) => Some(arr.borrow().clone()),
            Storage::Scalar(_) => None,
        }
    }
}
