// Constants for the evaluator

/// Default limit on nested user-function calls
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Only the low 8 bits of `main`'s return value reach the process exit status
pub const EXIT_STATUS_MASK: i32 = 0xFF;

