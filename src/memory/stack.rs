//! Environment: global scope plus the call stack
//!
//! - [`Stack`]: the global scope and the frames of active calls
//! - [`StackFrame`]: one function's activation record, a stack of block scopes
//! - [`Scope`]: name → [`Binding`] map for one block
//! - [`Binding`]: storage (scalar slot or shared array) with element type and const flag
//!
//! # Name Resolution
//!
//! Lookups walk the current frame's scopes innermost-first, then fall back to
//! the global scope. Frames never see the locals of their callers.
//!
//! # Arrays
//!
//! Array storage is an [`ArrayRef`]. Passing an array to a `T name[]`
//! parameter clones the handle, so the callee writes straight into the
//! caller's elements.

use super::value::Value;
use crate::parser::ast::BaseType;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Shared, fixed-length array storage
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Storage behind a name
#[derive(Debug, Clone)]
pub enum Storage {
    Scalar(Value),
    Array(ArrayRef),
}

/// A variable, constant or parameter
#[derive(Debug, Clone)]
pub struct Binding {
    pub storage: Storage,
    pub elem_type: BaseType,
    pub is_const: bool,
}

impl Binding {
    pub fn scalar(value: Value, elem_type: BaseType, is_const: bool) -> Self {
        Binding {
            storage: Storage::Scalar(value.coerce_to(elem_type)),
            elem_type,
            is_const,
        }
    }

    /// New array storage owned by this binding
    pub fn array(elems: Vec<Value>, elem_type: BaseType, is_const: bool) -> Self {
        Binding {
            storage: Storage::Array(Rc::new(RefCell::new(elems))),
            elem_type,
            is_const,
        }
    }

    /// Array parameter aliasing existing storage; a `const` source stays `const`
    pub fn array_ref(array: ArrayRef, elem_type: BaseType, is_const: bool) -> Self {
        Binding {
            storage: Storage::Array(array),
            elem_type,
            is_const,
        }
    }
}

/// Returned when a name is declared twice in the same scope
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is already declared in this scope")]
pub struct AlreadyDeclared(pub String);

/// Bindings of one block
#[derive(Debug, Clone, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Binding>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn declare(&mut self, name: &str, binding: Binding) -> Result<(), AlreadyDeclared> {
        if self.bindings.contains_key(name) {
            return Err(AlreadyDeclared(name.to_string()));
        }
        self.bindings.insert(name.to_string(), binding);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.bindings.get_mut(name)
    }
}

/// Stack frame for a function call
#[derive(Debug, Clone)]
pub struct StackFrame {
    scopes: Vec<Scope>,
}

impl Default for StackFrame {
    fn default() -> Self {
        StackFrame::new()
    }
}

impl StackFrame {
    /// New frame whose first scope will hold the parameters
    pub fn new() -> Self {
        StackFrame {
            scopes: vec![Scope::new()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    pub fn pop_scope(&mut self) {
        // The parameter scope lives as long as the frame
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn declare(&mut self, name: &str, binding: Binding) -> Result<(), AlreadyDeclared> {
        match self.scopes.last_mut() {
            Some(scope) => scope.declare(name, binding),
            None => Err(AlreadyDeclared(name.to_string())),
        }
    }

    pub fn get_var(&self, name: &str) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn get_var_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name))
    }
}

/// The global scope and the call stack
#[derive(Debug, Clone, Default)]
pub struct Stack {
    globals: Scope,
    frames: Vec<StackFrame>,
}

impl Stack {
    pub fn new() -> Self {
        Stack::default()
    }

    /// Push a new stack frame
    pub fn push_frame(&mut self) {
        self.frames.push(StackFrame::new());
    }

    /// Pop the top stack frame
    pub fn pop_frame(&mut self) -> Option<StackFrame> {
        self.frames.pop()
    }

    /// Enter a block scope in the current frame. No-op at global level.
    pub fn push_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push_scope();
        }
    }

    pub fn pop_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.pop_scope();
        }
    }

    /// Declare in the innermost scope: the current frame, or the globals when
    /// no call is active.
    pub fn declare(&mut self, name: &str, binding: Binding) -> Result<(), AlreadyDeclared> {
        match self.frames.last_mut() {
            Some(frame) => frame.declare(name, binding),
            None => self.globals.declare(name, binding),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.frames
            .last()
            .and_then(|frame| frame.get_var(name))
            .or_else(|| self.globals.get(name))
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Binding> {
        let Stack { globals, frames } = self;
        match frames.last_mut().and_then(|frame| frame.get_var_mut(name)) {
            Some(binding) => Some(binding),
            None => globals.get_mut(name),
        }
    }

    pub fn globals(&self) -> &Scope {
        &self.globals
    }
}
