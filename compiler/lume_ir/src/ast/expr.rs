//! Expressions.

use super::{BinaryOp, Block, Function, Literal, MatchPattern, UnaryOp, UpdateOp, VarDecl, VarRef};
use crate::{Name, Span, Spanned};

/// An expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Replace the span. Used by tree builders to position nodes.
    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.span = Span::new(line, column);
        self
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    /// `"a ${b} c"`
    Interpolation(Vec<InterpolationPart>),
    /// `[a, ...b]`
    List(Vec<Element>),
    /// `{ key: value }`
    Map(Vec<(Name, Expr)>),

    Ident(VarRef),
    This,

    /// `target = value`, or `target op= value` when `op` is set.
    Assign {
        target: AssignTarget,
        op: Option<BinaryOp>,
        value: Box<Expr>,
    },
    /// `++x`, `x--`
    Update {
        op: UpdateOp,
        prefix: bool,
        target: AssignTarget,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        args: Vec<Element>,
    },
    /// `super.method(args)`
    SuperCall {
        method: Name,
        args: Vec<Element>,
    },
    Member {
        object: Box<Expr>,
        name: Name,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },

    If {
        cond: Box<Expr>,
        then_branch: Block,
        /// Either a block expression or a chained `if`.
        else_branch: Option<Box<Expr>>,
    },
    While {
        cond: Box<Expr>,
        body: Block,
    },
    For {
        binding: VarDecl,
        iterable: Box<Expr>,
        body: Block,
    },
    Block(Block),
    Lambda(Box<Function>),

    Try {
        body: Block,
        catch: Option<CatchClause>,
        finally: Option<Block>,
    },
    Throw(Box<Expr>),
    /// `start..end` or `start..=end`
    Range {
        start: Box<Expr>,
        end: Box<Expr>,
        inclusive: bool,
    },
    Match {
        subject: Box<Expr>,
        arms: Vec<MatchArm>,
    },

    Return(Option<Box<Expr>>),
    Break,
    Continue,
    Await(Box<Expr>),
}

/// Element of a list literal or argument list.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Item(Expr),
    /// `...expr`
    Spread(Expr),
}

impl Element {
    pub fn expr(&self) -> &Expr {
        match self {
            Element::Item(e) | Element::Spread(e) => e,
        }
    }

    pub fn expr_mut(&mut self) -> &mut Expr {
        match self {
            Element::Item(e) | Element::Spread(e) => e,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InterpolationPart {
    Text(Name),
    Expr(Expr),
}

/// Left-hand side of an assignment or update.
#[derive(Clone, Debug, PartialEq)]
pub enum AssignTarget {
    Var(VarRef),
    Member { object: Box<Expr>, name: Name },
    Index { object: Box<Expr>, index: Box<Expr> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub binding: Option<VarDecl>,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchArm {
    pub pattern: MatchPattern,
    pub guard: Option<Expr>,
    pub body: Expr,
    pub span: Span,
}
