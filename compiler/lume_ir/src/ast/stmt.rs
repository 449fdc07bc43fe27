//! Statements, declarations and blocks.

use super::{BindingPattern, Expr, UnitInfo, VarDecl, VarRef};
use crate::{Name, Span, Spanned};

/// A whole program: the top-level unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub body: Block,
    pub unit: UnitInfo,
}

impl Program {
    pub fn new(body: Block) -> Self {
        Program {
            body,
            unit: UnitInfo::default(),
        }
    }
}

/// Statements followed by an optional trailing expression, which is the
/// block's value.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub tail: Option<Box<Expr>>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, tail: Option<Expr>, span: Span) -> Self {
        Block {
            stmts,
            tail: tail.map(Box::new),
            span,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty() && self.tail.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `let pattern = init` or `var pattern = init`.
    Let {
        pattern: BindingPattern,
        mutable: bool,
        init: Expr,
    },
    Expr(Expr),
    /// `fn name(...) { ... }`. The name is hoisted to the top of its block.
    Function { decl: VarDecl, function: Function },
    Class(ClassDecl),
}

/// A function, lambda or method body with its parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    /// Diagnostic name. Lambdas are named `<lambda>`.
    pub name: Name,
    pub params: Vec<Param>,
    /// Trailing `...rest` parameter.
    pub rest: Option<VarDecl>,
    pub body: Block,
    pub is_async: bool,
    pub span: Span,
    pub unit: UnitInfo,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub decl: VarDecl,
    /// Evaluated at call time, only when the argument is absent.
    pub default: Option<Expr>,
}

/// `class Name extends Parent { fields; methods }`
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub decl: VarDecl,
    pub parent: Option<VarRef>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<Function>,
    pub span: Span,
}

/// A field declaration. The initializer is rerun for every instance.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDecl {
    pub name: Name,
    pub init: Option<Expr>,
    pub span: Span,
}
