//! Syntax tree produced by the external parser.
//!
//! The tree is an owned `Box` tree. The parser leaves every annotation slot
//! empty (`Resolution::Unresolved`, `slot: None`, default `UnitInfo`); the
//! scope resolver fills them in before the tree is compiled.
//!
//! # Module Structure
//!
//! - `expr`: expressions (`Expr`, `ExprKind`) and their parts
//! - `stmt`: statements, function and class declarations, blocks
//! - `patterns`: destructuring and match patterns
//! - `operators`: binary, unary and update operators

mod expr;
mod operators;
mod patterns;
mod stmt;

pub use expr::{
    AssignTarget, CatchClause, Element, Expr, ExprKind, InterpolationPart, MatchArm,
};
pub use operators::{BinaryOp, UnaryOp, UpdateOp};
pub use patterns::{BindingPattern, MatchPattern};
pub use stmt::{Block, ClassDecl, FieldDecl, Function, Param, Program, Stmt, StmtKind};

use crate::{Name, Span};

/// Whether a binding can be reassigned after its declaration.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub enum Mutability {
    /// `var x = ...`
    Mutable,
    /// `let x = ...`
    #[default]
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }

    #[inline]
    pub fn from_mutable(mutable: bool) -> Self {
        if mutable {
            Mutability::Mutable
        } else {
            Mutability::Immutable
        }
    }
}

/// Literal constants. Shared by tokens, expressions, match patterns and code.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(Name),
    Bool(bool),
    Null,
}

/// How a variable reference was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Resolution {
    /// Not yet visited by the resolver.
    #[default]
    Unresolved,
    /// Declared in the same function or top-level unit. `slot` is `None` when
    /// the unit uses the dynamic map.
    Local { slot: Option<u32> },
    /// Declared in an enclosing unit and captured by name.
    Outer,
    /// A field of the enclosing class, read through the receiver.
    Field,
    /// A host-registered prelude binding.
    Global,
}

/// Declaration site of a variable: `let` / `var` names, parameters, loop and
/// catch bindings, function and class names.
#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub name: Name,
    /// Slot index assigned by the resolver. `None` means dynamic-map storage.
    pub slot: Option<u32>,
    pub span: Span,
}

impl VarDecl {
    pub fn new(name: impl Into<Name>, span: Span) -> Self {
        VarDecl {
            name: name.into(),
            slot: None,
            span,
        }
    }
}

/// Use site of a variable.
#[derive(Clone, Debug, PartialEq)]
pub struct VarRef {
    pub name: Name,
    pub resolution: Resolution,
    pub span: Span,
}

impl VarRef {
    pub fn new(name: impl Into<Name>, span: Span) -> Self {
        VarRef {
            name: name.into(),
            resolution: Resolution::Unresolved,
            span,
        }
    }
}

/// Storage facts recorded by the resolver for one function or top-level unit.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct UnitInfo {
    /// The unit's own body declares no nested function, lambda or class.
    pub slot_eligible: bool,
    /// Names of the unit's locals in slot order. Empty unless eligible.
    pub locals: Vec<Name>,
}

impl UnitInfo {
    pub fn slot_count(&self) -> usize {
        self.locals.len()
    }
}

#[cfg(test)]
mod tests;
