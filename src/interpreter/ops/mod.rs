pub mod binary;
pub mod unary;

// Both extend `Interpreter` with associated functions; nothing to re-export
