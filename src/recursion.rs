//! Stack growth for the recursive parser and evaluator
//!
//! Nested expressions, blocks and user-function calls all recurse on the
//! native stack. Entry points wrap themselves in [`ensure_sufficient_stack`],
//! which moves execution onto a freshly allocated segment when the remaining
//! stack runs low. Runaway user recursion is still bounded by
//! `InterpreterConfig::max_call_depth`.

/// Grow when less than this much stack remains (128 KiB)
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (2 MiB)
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if it is close to exhausted
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
