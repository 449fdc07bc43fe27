//! Expression lowering and operator inlining.

use lume_ir::ast::{AssignTarget, Element, Expr, ExprKind, InterpolationPart};
use lume_ir::code::{AssignCode, CatchCode, Code, CodeElement};
use lume_ir::{BinaryOp, Literal, Span, UnaryOp};

use super::Lowerer;

impl Lowerer {
    pub(super) fn lower_expr(&mut self, expr: &Expr) -> Code {
        lume_stack::ensure_sufficient_stack(|| self.lower_expr_inner(expr))
    }

    fn lower_expr_inner(&mut self, expr: &Expr) -> Code {
        let span = expr.span;
        match &expr.kind {
            ExprKind::Literal(literal) => Code::Constant(literal.clone()),
            ExprKind::Interpolation(parts) => Code::Interpolate(
                parts
                    .iter()
                    .map(|part| match part {
                        InterpolationPart::Text(text) => {
                            Code::Constant(Literal::Str(text.clone()))
                        }
                        InterpolationPart::Expr(e) => self.lower_expr(e),
                    })
                    .collect(),
            ),
            ExprKind::List(elements) => Code::List(self.lower_elements(elements)),
            ExprKind::Map(entries) => Code::Map(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), self.lower_expr(value)))
                    .collect(),
            ),
            ExprKind::Ident(var) => Code::Load {
                access: self.access(var),
                span,
            },
            ExprKind::This => Code::This { span },
            ExprKind::Assign { target, op, value } => Code::Assign {
                target: self.lower_target(target),
                op: *op,
                value: Box::new(self.lower_expr(value)),
                span,
            },
            ExprKind::Update { op, prefix, target } => Code::Update {
                target: self.lower_target(target),
                op: *op,
                prefix: *prefix,
                span,
            },
            ExprKind::Binary { op, left, right } => {
                let left = self.lower_expr(left);
                let right = self.lower_expr(right);
                lower_binary(*op, left, right, span)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.lower_expr(operand);
                match op {
                    UnaryOp::Neg if operand.is_statically_numeric() => {
                        Code::NumNeg(Box::new(operand))
                    }
                    _ => Code::Unary {
                        op: *op,
                        operand: Box::new(operand),
                        span,
                    },
                }
            }
            ExprKind::Call { callee, args } => {
                let args = self.lower_elements(args);
                match &callee.kind {
                    ExprKind::Member { object, name } => Code::MethodCall {
                        object: Box::new(self.lower_expr(object)),
                        method: name.clone(),
                        args,
                        span,
                    },
                    _ => Code::Call {
                        callee: Box::new(self.lower_expr(callee)),
                        args,
                        span,
                    },
                }
            }
            ExprKind::SuperCall { method, args } => Code::SuperCall {
                method: method.clone(),
                args: self.lower_elements(args),
                span,
            },
            ExprKind::Member { object, name } => Code::Member {
                object: Box::new(self.lower_expr(object)),
                name: name.clone(),
                span,
            },
            ExprKind::Index { object, index } => Code::Index {
                object: Box::new(self.lower_expr(object)),
                index: Box::new(self.lower_expr(index)),
                span,
            },
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => Code::If {
                cond: Box::new(self.lower_expr(cond)),
                then_branch: Box::new(Code::Block(self.lower_block(then_branch))),
                else_branch: else_branch
                    .as_deref()
                    .map(|e| Box::new(self.lower_expr(e))),
            },
            ExprKind::While { cond, body } => Code::While {
                cond: Box::new(self.lower_expr(cond)),
                body: Box::new(Code::Block(self.lower_block(body))),
            },
            ExprKind::For {
                binding,
                iterable,
                body,
            } => Code::For {
                target: self.target(binding, false),
                iterable: Box::new(self.lower_expr(iterable)),
                body: Box::new(Code::Block(self.lower_block(body))),
                scoped: self.scoped(),
                span,
            },
            ExprKind::Block(block) => Code::Block(self.lower_block(block)),
            ExprKind::Lambda(function) => Code::Lambda(self.lower_function(function)),
            ExprKind::Try {
                body,
                catch,
                finally,
            } => Code::Try {
                body: Box::new(Code::Block(self.lower_block(body))),
                catch: catch.as_ref().map(|c| CatchCode {
                    binding: c.binding.as_ref().map(|b| self.target(b, true)),
                    body: Box::new(Code::Block(self.lower_block(&c.body))),
                    scoped: self.scoped(),
                }),
                finally: finally
                    .as_ref()
                    .map(|f| Box::new(Code::Block(self.lower_block(f)))),
            },
            ExprKind::Throw(value) => Code::Throw {
                value: Box::new(self.lower_expr(value)),
                span,
            },
            ExprKind::Range {
                start,
                end,
                inclusive,
            } => Code::Range {
                start: Box::new(self.lower_expr(start)),
                end: Box::new(self.lower_expr(end)),
                inclusive: *inclusive,
                span,
            },
            ExprKind::Match { subject, arms } => Code::Match {
                subject: Box::new(self.lower_expr(subject)),
                arms: arms.iter().map(|arm| self.lower_arm(arm)).collect(),
                scoped: self.scoped(),
                span,
            },
            ExprKind::Return(value) => {
                Code::Return(value.as_deref().map(|e| Box::new(self.lower_expr(e))))
            }
            ExprKind::Break => Code::Break,
            ExprKind::Continue => Code::Continue,
            ExprKind::Await(value) => Code::Await(Box::new(self.lower_expr(value))),
        }
    }

    fn lower_elements(&mut self, elements: &[Element]) -> Vec<CodeElement> {
        elements
            .iter()
            .map(|element| match element {
                Element::Item(e) => CodeElement::Item(self.lower_expr(e)),
                Element::Spread(e) => CodeElement::Spread(self.lower_expr(e)),
            })
            .collect()
    }

    fn lower_target(&mut self, target: &AssignTarget) -> AssignCode {
        match target {
            AssignTarget::Var(var) => AssignCode::Var(self.access(var)),
            AssignTarget::Member { object, name } => AssignCode::Member {
                object: Box::new(self.lower_expr(object)),
                name: name.clone(),
            },
            AssignTarget::Index { object, index } => AssignCode::Index {
                object: Box::new(self.lower_expr(object)),
                index: Box::new(self.lower_expr(index)),
            },
        }
    }
}

/// Pick the inlined numeric form when both operands are statically numeric.
fn lower_binary(op: BinaryOp, left: Code, right: Code, span: Span) -> Code {
    match op {
        BinaryOp::And => Code::And(Box::new(left), Box::new(right)),
        BinaryOp::Or => Code::Or(Box::new(left), Box::new(right)),
        _ if left.is_statically_numeric() && right.is_statically_numeric() => Code::NumBinary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
        },
        _ => Code::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
        },
    }
}
