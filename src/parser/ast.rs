// AST (Abstract Syntax Tree) definitions for the evaluator

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Base types supported by the language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Int,
    Char,
    Void,
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::Int => write!(f, "int"),
            BaseType::Char => write!(f, "char"),
            BaseType::Void => write!(f, "void"),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Short-circuit logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And, // &&
    Or,  // ||
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus, // +x
    Neg,  // -x
    Not,  // !x
}

/// Expressions
#[derive(Debug, Clone)]
pub enum Expr {
    IntLiteral(i32, SourceLocation),
    CharLiteral(u8, SourceLocation),
    /// Raw text between the quotes; escapes are decoded by the consumer
    StringLiteral(String, SourceLocation),
    Variable(String, SourceLocation),
    ArrayAccess {
        name: String,
        index: Box<Expr>,
        location: SourceLocation,
    },
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    /// `&&` / `||`; the right operand is evaluated only when needed
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    FunctionCall {
        name: String,
        args: Vec<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this expression
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::IntLiteral(_, loc)
            | Expr::CharLiteral(_, loc)
            | Expr::StringLiteral(_, loc)
            | Expr::Variable(_, loc) => *loc,
            Expr::ArrayAccess { location, .. }
            | Expr::BinaryOp { location, .. }
            | Expr::Logical { location, .. }
            | Expr::UnaryOp { location, .. }
            | Expr::FunctionCall { location, .. } => *location,
        }
    }
}

/// Assignment target: `name` or `name[index]`
#[derive(Debug, Clone)]
pub struct LValue {
    pub name: String,
    pub index: Option<Box<Expr>>,
    pub location: SourceLocation,
}

/// Initializer of a variable or constant definition
#[derive(Debug, Clone)]
pub enum Initializer {
    /// `= expr`
    Expr(Expr),
    /// `= { e0, e1, ... }`
    List(Vec<Expr>),
    /// `= "text"` (char arrays only); raw text, escapes undecoded
    Str(String, SourceLocation),
}

/// One definitor of a declaration: `name [ '[' size ']' ] [ '=' init ]`
#[derive(Debug, Clone)]
pub struct VarDef {
    pub name: String,
    pub array_len: Option<Expr>,
    pub init: Option<Initializer>,
    pub location: SourceLocation,
}

/// `[const] int|char def, def, ... ;`
#[derive(Debug, Clone)]
pub struct Declaration {
    pub is_const: bool,
    pub base: BaseType,
    pub defs: Vec<VarDef>,
    pub location: SourceLocation,
}

/// Statements
#[derive(Debug, Clone)]
pub enum Stmt {
    Expression {
        expr: Expr,
        location: SourceLocation,
    },
    Empty {
        location: SourceLocation,
    },
    Block {
        statements: Vec<Stmt>,
        location: SourceLocation,
    },
    Declaration(Declaration),
    Assign {
        target: LValue,
        value: Expr,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        location: SourceLocation,
    },
    For {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        update: Option<Box<Stmt>>,
        body: Box<Stmt>,
        location: SourceLocation,
    },
    Break {
        location: SourceLocation,
    },
    Continue {
        location: SourceLocation,
    },
    Return {
        expr: Option<Expr>,
        location: SourceLocation,
    },
}

impl Stmt {
    /// Get the source location of this statement
    pub fn location(&self) -> SourceLocation {
        match self {
            Stmt::Expression { location, .. }
            | Stmt::Empty { location }
            | Stmt::Block { location, .. }
            | Stmt::Assign { location, .. }
            | Stmt::If { location, .. }
            | Stmt::For { location, .. }
            | Stmt::Break { location }
            | Stmt::Continue { location }
            | Stmt::Return { location, .. } => *location,
            Stmt::Declaration(decl) => decl.location,
        }
    }
}

/// Function parameter; `is_array` marks `T name[]` reference parameters
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub base: BaseType,
    pub is_array: bool,
}

/// Function definition
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub return_type: BaseType,
    pub location: SourceLocation,
}

/// Top-level program structure
#[derive(Debug, Clone, Default)]
pub struct Program {
    /// Global declarations, in source order
    pub globals: Vec<Declaration>,
    pub functions: Vec<FunctionDef>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Find a function definition by name
    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.iter().find(|f| f.name == name)
    }
}
