//! Destructuring and match patterns.

use lume_ir::ast::{BindingPattern, MatchArm, MatchPattern};
use lume_ir::code::{ArmCode, ArmPattern, PatternCode};

use super::Lowerer;

impl Lowerer {
    pub(super) fn lower_binding_pattern(
        &self,
        pattern: &BindingPattern,
        mutable: bool,
    ) -> PatternCode {
        match pattern {
            BindingPattern::Name(decl) => PatternCode::Bind(self.target(decl, mutable)),
            BindingPattern::List { items, rest } => PatternCode::List {
                items: items.iter().map(|d| self.target(d, mutable)).collect(),
                rest: rest.as_ref().map(|d| self.target(d, mutable)),
            },
            BindingPattern::Map { entries } => PatternCode::Map {
                entries: entries
                    .iter()
                    .map(|(key, d)| (key.clone(), self.target(d, mutable)))
                    .collect(),
            },
        }
    }

    pub(super) fn lower_arm(&mut self, arm: &MatchArm) -> ArmCode {
        ArmCode {
            pattern: self.lower_match_pattern(&arm.pattern),
            guard: arm.guard.as_ref().map(|g| self.lower_expr(g)),
            body: self.lower_expr(&arm.body),
        }
    }

    fn lower_match_pattern(&self, pattern: &MatchPattern) -> ArmPattern {
        match pattern {
            MatchPattern::Wildcard => ArmPattern::Wildcard,
            MatchPattern::Literal(literal) => ArmPattern::Literal(literal.clone()),
            MatchPattern::Binding(decl) => ArmPattern::Bind(self.target(decl, false)),
            MatchPattern::List { items, rest } => ArmPattern::List {
                items: items.iter().map(|p| self.lower_match_pattern(p)).collect(),
                rest: rest.as_ref().map(|d| self.target(d, false)),
            },
        }
    }
}
