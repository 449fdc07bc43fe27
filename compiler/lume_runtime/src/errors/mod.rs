//! Runtime errors and control-flow signals.
//!
//! Factory functions (`division_by_zero()`, `type_mismatch(..)`, ...) are the
//! public way to build errors. They are `#[cold]`: the interpreter only calls
//! them on failure paths.

use std::fmt;

use indexmap::IndexMap;
use lume_diagnostic::{Diagnostic, ErrorCode};
use lume_ir::{Name, Span};

use crate::Value;

/// Result of evaluating an expression that cannot break out of it.
pub type EvalResult = Result<Value, EvalError>;

/// Result of executing code that may `return`, `break` or `continue`.
pub type ExecResult = Result<Value, ControlAction>;

/// Non-local exits from executing code.
///
/// Only errors leave a function: `return` is absorbed by the call,
/// `break` / `continue` by the enclosing loop.
#[derive(Clone, Debug)]
pub enum ControlAction {
    Error(Box<EvalError>),
    Break,
    Continue,
    Return(Value),
}

impl From<EvalError> for ControlAction {
    #[inline]
    fn from(err: EvalError) -> Self {
        ControlAction::Error(Box::new(err))
    }
}

impl ControlAction {
    /// Convert a signal that escaped its handler into an error.
    ///
    /// The resolver rejects stray `return` / `break` / `continue`, so this
    /// only matters for hand-built code.
    pub fn into_eval_error(self) -> EvalError {
        match self {
            ControlAction::Error(err) => *err,
            ControlAction::Break | ControlAction::Continue => {
                invalid_operation("loop control outside of a loop")
            }
            ControlAction::Return(_) => invalid_operation("return outside of a function"),
        }
    }
}

/// Typed runtime failure.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("division by zero")]
    DivisionByZero,
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: f64, len: usize },
    #[error("key not found: {key}")]
    KeyNotFound { key: String },
    #[error("cannot {operation} null")]
    NullReference { operation: String },
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("{type_name} is not callable")]
    NotCallable { type_name: String },
    #[error("cannot compare {left} with {right}")]
    CannotCompare { left: String, right: String },
    #[error("invalid operation: {message}")]
    InvalidOperation { message: String },
    #[error("unbound variable: {name}")]
    UnboundVariable { name: String },
    #[error("{name} expects {expected} argument(s), got {got}")]
    WrongArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("maximum call depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },
    #[error("no member '{member}' on {type_name}")]
    UndefinedMember { member: String, type_name: String },
    #[error("no match arm accepted {value}")]
    NoMatchingArm { value: String },
    #[error("uncaught throw: {0}")]
    Thrown(Value),
    #[error("cannot assign to read-only binding: {name}")]
    ImmutableAssignment { name: String },
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DivisionByZero => ErrorCode::DivisionByZero,
            Self::IndexOutOfRange { .. } => ErrorCode::IndexOutOfRange,
            Self::KeyNotFound { .. } => ErrorCode::KeyNotFound,
            Self::NullReference { .. } => ErrorCode::NullReference,
            Self::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            Self::NotCallable { .. } => ErrorCode::NotCallable,
            Self::CannotCompare { .. } => ErrorCode::CannotCompare,
            Self::InvalidOperation { .. } => ErrorCode::InvalidOperation,
            Self::UnboundVariable { .. } => ErrorCode::UnboundVariable,
            Self::WrongArgumentCount { .. } => ErrorCode::WrongArgumentCount,
            Self::StackOverflow { .. } => ErrorCode::StackOverflow,
            Self::UndefinedMember { .. } => ErrorCode::UndefinedMember,
            Self::NoMatchingArm { .. } => ErrorCode::NoMatchingArm,
            Self::Thrown(_) => ErrorCode::Thrown,
            Self::ImmutableAssignment { .. } => ErrorCode::ImmutableAssignment,
        }
    }
}

/// One entry of a captured call stack, most recent call first.
#[derive(Clone, Debug, PartialEq)]
pub struct BacktraceFrame {
    pub name: Name,
    pub span: Span,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {} at {}", frame.name, frame.span)?;
        }
        Ok(())
    }
}

/// A runtime failure with where it happened.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
    /// Call stack at the point of failure, captured by the innermost call.
    pub trace: Option<EvalBacktrace>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            span: None,
            trace: None,
        }
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() && !span.is_dummy() {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.trace = Some(backtrace);
        self
    }

    /// The value a `catch` clause binds.
    ///
    /// A thrown value is bound as-is. Built-in failures become
    /// `{ code: <number>, message: <string> }`.
    pub fn to_value(&self) -> Value {
        if let EvalErrorKind::Thrown(value) = &self.kind {
            return value.clone();
        }
        let mut entries = IndexMap::with_capacity(2);
        entries.insert(
            Name::new("code"),
            Value::Number(f64::from(self.code().number())),
        );
        entries.insert(Name::new("message"), Value::string(self.kind.to_string()));
        Value::map(entries)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code(), self.kind.to_string());
        if let Some(span) = self.span {
            diag = diag.with_span(span);
        }
        if let Some(backtrace) = &self.trace {
            for frame in backtrace.frames() {
                diag = diag.with_note(format!("in {} at {}", frame.name, frame.span));
            }
        }
        diag
    }
}

// Factories

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::new(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn index_out_of_range(index: f64, len: usize) -> EvalError {
    EvalError::new(EvalErrorKind::IndexOutOfRange { index, len })
}

#[cold]
pub fn key_not_found(key: &str) -> EvalError {
    EvalError::new(EvalErrorKind::KeyNotFound {
        key: key.to_string(),
    })
}

/// `operation` reads as a verb phrase: "call", "read member `x` of".
#[cold]
pub fn null_reference(operation: &str) -> EvalError {
    EvalError::new(EvalErrorKind::NullReference {
        operation: operation.to_string(),
    })
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::new(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn cannot_compare(left: &str, right: &str) -> EvalError {
    EvalError::new(EvalErrorKind::CannotCompare {
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn invalid_operation(message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidOperation {
        message: message.into(),
    })
}

#[cold]
pub fn unbound_variable(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UnboundVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn wrong_argument_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::new(EvalErrorKind::WrongArgumentCount {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::new(EvalErrorKind::StackOverflow { depth })
}

#[cold]
pub fn undefined_member(member: &str, type_name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedMember {
        member: member.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn no_matching_arm(value: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::NoMatchingArm {
        value: value.to_string(),
    })
}

#[cold]
pub fn thrown(value: Value) -> EvalError {
    EvalError::new(EvalErrorKind::Thrown(value))
}

#[cold]
pub fn immutable_assignment(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::ImmutableAssignment {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests;
