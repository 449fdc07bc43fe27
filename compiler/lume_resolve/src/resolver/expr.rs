//! Expressions.

use lume_ir::ast::{AssignTarget, Element, Expr, ExprKind, InterpolationPart, MatchArm};
use lume_ir::{Mutability, Span};

use super::Resolver;
use crate::errors::ResolveErrorKind;
use crate::scope::{ScopeKind, UnitKind};

impl Resolver {
    pub(super) fn resolve_expr(&mut self, expr: &mut Expr) {
        lume_stack::ensure_sufficient_stack(|| self.resolve_expr_inner(expr));
    }

    fn resolve_expr_inner(&mut self, expr: &mut Expr) {
        let span = expr.span;
        match &mut expr.kind {
            ExprKind::Literal(_) => {}
            ExprKind::Interpolation(parts) => {
                for part in parts {
                    if let InterpolationPart::Expr(e) = part {
                        self.resolve_expr(e);
                    }
                }
            }
            ExprKind::List(elements) => self.resolve_elements(elements),
            ExprKind::Map(entries) => {
                for (_, value) in entries {
                    self.resolve_expr(value);
                }
            }
            ExprKind::Ident(var) => {
                self.reference(var);
            }
            ExprKind::This => {
                if self.enclosing_class().is_none() {
                    self.error(ResolveErrorKind::ThisOutsideClass, span);
                }
            }
            ExprKind::Assign { target, value, .. } => {
                self.resolve_expr(value);
                self.resolve_target(target);
            }
            ExprKind::Update { target, .. } => self.resolve_target(target),
            ExprKind::Binary { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            ExprKind::Unary { operand, .. } => self.resolve_expr(operand),
            ExprKind::Call { callee, args } => {
                self.resolve_expr(callee);
                self.resolve_elements(args);
            }
            ExprKind::SuperCall { args, .. } => {
                if !self.enclosing_class().is_some_and(|c| c.has_parent) {
                    self.error(ResolveErrorKind::SuperOutsideSubclass, span);
                }
                self.resolve_elements(args);
            }
            ExprKind::Member { object, .. } => self.resolve_expr(object),
            ExprKind::Index { object, index } => {
                self.resolve_expr(object);
                self.resolve_expr(index);
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(cond);
                self.resolve_block(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_expr(else_branch);
                }
            }
            ExprKind::While { cond, body } => {
                self.resolve_expr(cond);
                self.in_loop(|this| this.resolve_block(body));
            }
            ExprKind::For {
                binding,
                iterable,
                body,
            } => {
                self.resolve_expr(iterable);
                self.push_scope(ScopeKind::Block);
                self.declare(binding, Mutability::Immutable);
                self.in_loop(|this| this.resolve_block(body));
                self.pop_scope();
            }
            ExprKind::Block(block) => self.resolve_block(block),
            ExprKind::Lambda(function) => self.resolve_function(function, UnitKind::Lambda),
            ExprKind::Try {
                body,
                catch,
                finally,
            } => {
                self.resolve_block(body);
                if let Some(catch) = catch {
                    self.push_scope(ScopeKind::Block);
                    if let Some(binding) = &mut catch.binding {
                        self.declare(binding, Mutability::Mutable);
                    }
                    self.resolve_block(&mut catch.body);
                    self.pop_scope();
                }
                if let Some(finally) = finally {
                    self.resolve_block(finally);
                }
            }
            ExprKind::Throw(value) | ExprKind::Await(value) => self.resolve_expr(value),
            ExprKind::Range { start, end, .. } => {
                self.resolve_expr(start);
                self.resolve_expr(end);
            }
            ExprKind::Match { subject, arms } => {
                self.resolve_expr(subject);
                for arm in arms {
                    self.resolve_arm(arm);
                }
            }
            ExprKind::Return(value) => {
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
                let allowed = self.current_unit().is_some_and(|u| u.kind.allows_return());
                if !allowed {
                    self.error(ResolveErrorKind::ReturnOutsideFunction, span);
                }
            }
            ExprKind::Break => self.check_loop_control("break", span),
            ExprKind::Continue => self.check_loop_control("continue", span),
        }
    }

    fn resolve_elements(&mut self, elements: &mut [Element]) {
        for element in elements {
            self.resolve_expr(element.expr_mut());
        }
    }

    /// Resolve an assignment or update target. Compound forms read the
    /// target too, which needs no extra check.
    fn resolve_target(&mut self, target: &mut AssignTarget) {
        match target {
            AssignTarget::Var(var) => self.assign(var),
            AssignTarget::Member { object, .. } => self.resolve_expr(object),
            AssignTarget::Index { object, index } => {
                self.resolve_expr(object);
                self.resolve_expr(index);
            }
        }
    }

    fn resolve_arm(&mut self, arm: &mut MatchArm) {
        self.push_scope(ScopeKind::Block);
        arm.pattern
            .for_each_decl_mut(&mut |decl| self.declare(decl, Mutability::Immutable));
        if let Some(guard) = &mut arm.guard {
            self.resolve_expr(guard);
        }
        self.resolve_expr(&mut arm.body);
        self.pop_scope();
    }

    fn in_loop(&mut self, f: impl FnOnce(&mut Self)) {
        if let Some(unit) = self.current_unit_mut() {
            unit.loop_depth += 1;
        }
        f(self);
        if let Some(unit) = self.current_unit_mut() {
            unit.loop_depth -= 1;
        }
    }

    fn check_loop_control(&mut self, keyword: &'static str, span: Span) {
        let in_loop = self.current_unit().is_some_and(|u| u.loop_depth > 0);
        if !in_loop {
            self.error(ResolveErrorKind::LoopControlOutsideLoop { keyword }, span);
        }
    }
}
