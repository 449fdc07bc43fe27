//! Tree builders.
//!
//! The parser is an external collaborator. Hosts that generate trees and
//! the engine's own tests build them with these helpers. Every node gets
//! `Span::DUMMY`; use `Expr::at` to position a node.

use crate::ast::{
    AssignTarget, BinaryOp, BindingPattern, Block, CatchClause, ClassDecl, Element, Expr,
    ExprKind, FieldDecl, Function, InterpolationPart, Literal, MatchArm, MatchPattern, Param,
    Program, Stmt, StmtKind, UnaryOp, UnitInfo, UpdateOp, VarDecl, VarRef,
};
use crate::{Name, Span};

fn expr(kind: ExprKind) -> Expr {
    Expr::new(kind, Span::DUMMY)
}

// Programs and blocks

pub fn program(stmts: Vec<Stmt>, tail: Option<Expr>) -> Program {
    Program::new(block(stmts, tail))
}

pub fn block(stmts: Vec<Stmt>, tail: Option<Expr>) -> Block {
    Block::new(stmts, tail, Span::DUMMY)
}

/// A block whose only content is its value.
pub fn value_block(tail: Expr) -> Block {
    block(Vec::new(), Some(tail))
}

pub fn block_expr(stmts: Vec<Stmt>, tail: Option<Expr>) -> Expr {
    expr(ExprKind::Block(block(stmts, tail)))
}

// Statements

pub fn decl(name: &str) -> VarDecl {
    VarDecl::new(name, Span::DUMMY)
}

pub fn let_(name: &str, init: Expr) -> Stmt {
    let_pattern(BindingPattern::Name(decl(name)), false, init)
}

pub fn var(name: &str, init: Expr) -> Stmt {
    let_pattern(BindingPattern::Name(decl(name)), true, init)
}

pub fn let_pattern(pattern: BindingPattern, mutable: bool, init: Expr) -> Stmt {
    Stmt::new(
        StmtKind::Let {
            pattern,
            mutable,
            init,
        },
        Span::DUMMY,
    )
}

pub fn list_pattern(items: &[&str], rest: Option<&str>) -> BindingPattern {
    BindingPattern::List {
        items: items.iter().map(|n| decl(n)).collect(),
        rest: rest.map(decl),
    }
}

pub fn map_pattern(keys: &[&str]) -> BindingPattern {
    BindingPattern::Map {
        entries: keys.iter().map(|k| (Name::new(k), decl(k))).collect(),
    }
}

pub fn expr_stmt(e: Expr) -> Stmt {
    let span = e.span;
    Stmt::new(StmtKind::Expr(e), span)
}

pub fn function(name: &str, params: &[&str], body: Block) -> Function {
    Function {
        name: Name::new(name),
        params: params
            .iter()
            .map(|p| Param {
                decl: decl(p),
                default: None,
            })
            .collect(),
        rest: None,
        body,
        is_async: false,
        span: Span::DUMMY,
        unit: UnitInfo::default(),
    }
}

/// Adds a default to the parameter named `param`.
#[must_use]
pub fn with_default(mut function: Function, param: &str, default: Expr) -> Function {
    if let Some(p) = function.params.iter_mut().find(|p| &*p.decl.name == param) {
        p.default = Some(default);
    }
    function
}

#[must_use]
pub fn with_rest(mut function: Function, rest: &str) -> Function {
    function.rest = Some(decl(rest));
    function
}

#[must_use]
pub fn async_(mut function: Function) -> Function {
    function.is_async = true;
    function
}

pub fn fn_stmt(function: Function) -> Stmt {
    let decl = VarDecl::new(function.name.clone(), function.span);
    Stmt::new(StmtKind::Function { decl, function }, Span::DUMMY)
}

/// `fn name(params) body`
pub fn fn_decl(name: &str, params: &[&str], body: Block) -> Stmt {
    fn_stmt(function(name, params, body))
}

pub fn lambda(params: &[&str], body: Block) -> Expr {
    lambda_fn(function("<lambda>", params, body))
}

pub fn lambda_fn(function: Function) -> Expr {
    expr(ExprKind::Lambda(Box::new(function)))
}

pub fn field(name: &str, init: Option<Expr>) -> FieldDecl {
    FieldDecl {
        name: Name::new(name),
        init,
        span: Span::DUMMY,
    }
}

pub fn class(
    name: &str,
    parent: Option<&str>,
    fields: Vec<FieldDecl>,
    methods: Vec<Function>,
) -> Stmt {
    Stmt::new(
        StmtKind::Class(ClassDecl {
            decl: decl(name),
            parent: parent.map(|p| VarRef::new(p, Span::DUMMY)),
            fields,
            methods,
            span: Span::DUMMY,
        }),
        Span::DUMMY,
    )
}

// Literals

pub fn num(n: f64) -> Expr {
    expr(ExprKind::Literal(Literal::Number(n)))
}

pub fn str_(s: &str) -> Expr {
    expr(ExprKind::Literal(Literal::Str(Name::new(s))))
}

pub fn bool_(b: bool) -> Expr {
    expr(ExprKind::Literal(Literal::Bool(b)))
}

pub fn null() -> Expr {
    expr(ExprKind::Literal(Literal::Null))
}

pub fn list(items: Vec<Expr>) -> Expr {
    list_with(items.into_iter().map(Element::Item).collect())
}

pub fn list_with(elements: Vec<Element>) -> Expr {
    expr(ExprKind::List(elements))
}

pub fn map(entries: Vec<(&str, Expr)>) -> Expr {
    expr(ExprKind::Map(
        entries
            .into_iter()
            .map(|(k, v)| (Name::new(k), v))
            .collect(),
    ))
}

pub fn text(s: &str) -> InterpolationPart {
    InterpolationPart::Text(Name::new(s))
}

pub fn interp(parts: Vec<InterpolationPart>) -> Expr {
    expr(ExprKind::Interpolation(parts))
}

pub fn spread(e: Expr) -> Element {
    Element::Spread(e)
}

// Names and operators

pub fn ident(name: &str) -> Expr {
    expr(ExprKind::Ident(VarRef::new(name, Span::DUMMY)))
}

pub fn this() -> Expr {
    expr(ExprKind::This)
}

pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    expr(ExprKind::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn add(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Add, left, right)
}

pub fn sub(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Sub, left, right)
}

pub fn mul(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Mul, left, right)
}

pub fn div(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Div, left, right)
}

pub fn lt(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Lt, left, right)
}

pub fn le(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::LtEq, left, right)
}

pub fn eq(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Eq, left, right)
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    expr(ExprKind::Unary {
        op,
        operand: Box::new(operand),
    })
}

pub fn neg(operand: Expr) -> Expr {
    unary(UnaryOp::Neg, operand)
}

pub fn not(operand: Expr) -> Expr {
    unary(UnaryOp::Not, operand)
}

// Assignment

pub fn var_target(name: &str) -> AssignTarget {
    AssignTarget::Var(VarRef::new(name, Span::DUMMY))
}

pub fn member_target(object: Expr, name: &str) -> AssignTarget {
    AssignTarget::Member {
        object: Box::new(object),
        name: Name::new(name),
    }
}

pub fn index_target(object: Expr, index: Expr) -> AssignTarget {
    AssignTarget::Index {
        object: Box::new(object),
        index: Box::new(index),
    }
}

pub fn assign_to(target: AssignTarget, op: Option<BinaryOp>, value: Expr) -> Expr {
    expr(ExprKind::Assign {
        target,
        op,
        value: Box::new(value),
    })
}

/// `name = value`
pub fn assign(name: &str, value: Expr) -> Expr {
    assign_to(var_target(name), None, value)
}

pub fn update(target: AssignTarget, op: UpdateOp, prefix: bool) -> Expr {
    expr(ExprKind::Update { op, prefix, target })
}

/// `name++`
pub fn post_inc(name: &str) -> Expr {
    update(var_target(name), UpdateOp::Increment, false)
}

// Calls and access

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    call_with(callee, args.into_iter().map(Element::Item).collect())
}

pub fn call_with(callee: Expr, args: Vec<Element>) -> Expr {
    expr(ExprKind::Call {
        callee: Box::new(callee),
        args,
    })
}

/// `name(args)`
pub fn call_named(name: &str, args: Vec<Expr>) -> Expr {
    call(ident(name), args)
}

pub fn member(object: Expr, name: &str) -> Expr {
    expr(ExprKind::Member {
        object: Box::new(object),
        name: Name::new(name),
    })
}

pub fn method_call(object: Expr, method: &str, args: Vec<Expr>) -> Expr {
    call(member(object, method), args)
}

pub fn super_call(method: &str, args: Vec<Expr>) -> Expr {
    expr(ExprKind::SuperCall {
        method: Name::new(method),
        args: args.into_iter().map(Element::Item).collect(),
    })
}

pub fn index(object: Expr, idx: Expr) -> Expr {
    expr(ExprKind::Index {
        object: Box::new(object),
        index: Box::new(idx),
    })
}

// Control flow

pub fn if_(cond: Expr, then_branch: Block, else_branch: Option<Expr>) -> Expr {
    expr(ExprKind::If {
        cond: Box::new(cond),
        then_branch,
        else_branch: else_branch.map(Box::new),
    })
}

/// `if (cond) { a } else { b }` where both branches are plain values.
pub fn if_else(cond: Expr, then_value: Expr, else_value: Expr) -> Expr {
    if_(
        cond,
        value_block(then_value),
        Some(expr(ExprKind::Block(value_block(else_value)))),
    )
}

pub fn while_(cond: Expr, body: Block) -> Expr {
    expr(ExprKind::While {
        cond: Box::new(cond),
        body,
    })
}

pub fn for_in(binding: &str, iterable: Expr, body: Block) -> Expr {
    expr(ExprKind::For {
        binding: decl(binding),
        iterable: Box::new(iterable),
        body,
    })
}

pub fn try_(body: Block, catch: Option<(Option<&str>, Block)>, finally: Option<Block>) -> Expr {
    expr(ExprKind::Try {
        body,
        catch: catch.map(|(binding, body)| CatchClause {
            binding: binding.map(decl),
            body,
        }),
        finally,
    })
}

pub fn throw(value: Expr) -> Expr {
    expr(ExprKind::Throw(Box::new(value)))
}

pub fn range(start: Expr, end: Expr, inclusive: bool) -> Expr {
    expr(ExprKind::Range {
        start: Box::new(start),
        end: Box::new(end),
        inclusive,
    })
}

pub fn match_(subject: Expr, arms: Vec<MatchArm>) -> Expr {
    expr(ExprKind::Match {
        subject: Box::new(subject),
        arms,
    })
}

pub fn arm(pattern: MatchPattern, guard: Option<Expr>, body: Expr) -> MatchArm {
    MatchArm {
        pattern,
        guard,
        body,
        span: Span::DUMMY,
    }
}

pub fn bind_pattern(name: &str) -> MatchPattern {
    MatchPattern::Binding(decl(name))
}

pub fn ret(value: Option<Expr>) -> Expr {
    expr(ExprKind::Return(value.map(Box::new)))
}

pub fn break_() -> Expr {
    expr(ExprKind::Break)
}

pub fn continue_() -> Expr {
    expr(ExprKind::Continue)
}

pub fn await_(value: Expr) -> Expr {
    expr(ExprKind::Await(Box::new(value)))
}
