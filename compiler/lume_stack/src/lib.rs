//! Stack growth for recursive tree walks.
//!
//! The resolver, the compiler and the evaluator all recurse over the syntax
//! tree, and script-level recursion (`fib`, `tarai`) recurses through the
//! evaluator. Each of those recursion points goes through
//! [`ensure_sufficient_stack`], which grows the native stack on demand so
//! that deep scripts hit the interpreter's `max_call_depth` limit instead of
//! a native stack overflow.
//!
//! On `wasm32` the call is a passthrough.

/// Grow when less than this much stack remains.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
pub const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first moving to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Remaining native stack in bytes, if the platform can tell.
#[inline]
pub fn remaining_stack() -> Option<usize> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        stacker::remaining_stack()
    }
    #[cfg(target_arch = "wasm32")]
    {
        None
    }
}
