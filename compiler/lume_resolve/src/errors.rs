//! Resolution errors.

use lume_diagnostic::{Diagnostic, ErrorCode};
use lume_ir::{Name, Span};

/// What went wrong. Every kind has a fixed resolve-phase error code.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveErrorKind {
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: Name },

    #[error("`{name}` is already declared in this scope")]
    VariableAlreadyDeclared { name: Name },

    #[error("cannot assign to `{name}`: it was declared with `let`")]
    CannotAssignToLet { name: Name },

    #[error("parent class `{name}` is not defined")]
    ParentClassNotDefined { name: Name },

    #[error("class `{name}` cannot inherit from itself")]
    CircularInheritance { name: Name },

    #[error("`return` outside of a function")]
    ReturnOutsideFunction,

    #[error("`{keyword}` outside of a loop")]
    LoopControlOutsideLoop { keyword: &'static str },

    #[error("`this` outside of a class")]
    ThisOutsideClass,

    #[error("`super` outside of a subclass")]
    SuperOutsideSubclass,
}

impl ResolveErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveErrorKind::UndefinedVariable { .. } => ErrorCode::UndefinedVariable,
            ResolveErrorKind::VariableAlreadyDeclared { .. } => ErrorCode::VariableAlreadyDeclared,
            ResolveErrorKind::CannotAssignToLet { .. } => ErrorCode::CannotAssignToLet,
            ResolveErrorKind::ParentClassNotDefined { .. } => ErrorCode::ParentClassNotDefined,
            ResolveErrorKind::CircularInheritance { .. } => ErrorCode::CircularInheritance,
            ResolveErrorKind::ReturnOutsideFunction => ErrorCode::ReturnOutsideFunction,
            ResolveErrorKind::LoopControlOutsideLoop { .. } => ErrorCode::LoopControlOutsideLoop,
            ResolveErrorKind::ThisOutsideClass => ErrorCode::ThisOutsideClass,
            ResolveErrorKind::SuperOutsideSubclass => ErrorCode::SuperOutsideSubclass,
        }
    }
}

/// A resolution error at a source position.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {span}")]
pub struct ResolveError {
    pub kind: ResolveErrorKind,
    pub span: Span,
}

impl ResolveError {
    pub fn new(kind: ResolveErrorKind, span: Span) -> Self {
        ResolveError { kind, span }
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code(), self.kind.to_string());
        if self.span.is_dummy() {
            diagnostic
        } else {
            diagnostic.with_span(self.span)
        }
    }
}
