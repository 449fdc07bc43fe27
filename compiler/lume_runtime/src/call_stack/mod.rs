//! Call-stack bookkeeping.
//!
//! Every invocation pushes one [`CallFrame`] before its body runs and pops
//! it on every exit path. The stack enforces the depth limit and supplies
//! the backtrace attached to runtime errors.

use lume_ir::{Name, Span};

use crate::errors::{stack_overflow, BacktraceFrame, EvalBacktrace, EvalError};

/// Function name and call position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    pub name: Name,
    pub line: u32,
    pub column: u32,
}

impl CallFrame {
    pub fn new(name: Name, span: Span) -> Self {
        CallFrame {
            name,
            line: span.line,
            column: span.column,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }
}

#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
    pushes: u64,
    pops: u64,
}

impl CallStack {
    /// `max_depth` of `None` means unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
            pushes: 0,
            pops: 0,
        }
    }

    /// Push a frame. On overflow nothing is pushed, so the caller must not pop.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(stack_overflow(max));
            }
        }
        self.frames.push(frame);
        self.pushes += 1;
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop on empty stack");
        if self.frames.pop().is_some() {
            self.pops += 1;
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn current_frame(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    pub fn frames(&self) -> &[CallFrame] {
        &self.frames
    }

    /// Total pushes since creation.
    pub fn total_pushes(&self) -> u64 {
        self.pushes
    }

    /// Total pops since creation.
    pub fn total_pops(&self) -> u64 {
        self.pops
    }

    /// Snapshot of the stack, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        EvalBacktrace::new(
            self.frames
                .iter()
                .rev()
                .map(|f| BacktraceFrame {
                    name: f.name.clone(),
                    span: f.span(),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests;
