//! Destructuring and match patterns.

use super::{Literal, VarDecl};
use crate::Name;

/// Left-hand side of `let` / `var`.
#[derive(Clone, Debug, PartialEq)]
pub enum BindingPattern {
    /// `let x = ...`
    Name(VarDecl),
    /// `let [a, b, ...rest] = ...`
    List {
        items: Vec<VarDecl>,
        rest: Option<VarDecl>,
    },
    /// `let {x, y} = ...` binds `x` to the value at key `x`.
    Map { entries: Vec<(Name, VarDecl)> },
}

impl BindingPattern {
    /// Declarations introduced by the pattern, in source order.
    pub fn decls(&self) -> Box<dyn Iterator<Item = &VarDecl> + '_> {
        match self {
            BindingPattern::Name(d) => Box::new(std::iter::once(d)),
            BindingPattern::List { items, rest } => Box::new(items.iter().chain(rest.iter())),
            BindingPattern::Map { entries } => Box::new(entries.iter().map(|(_, d)| d)),
        }
    }

    pub fn decls_mut(&mut self) -> Box<dyn Iterator<Item = &mut VarDecl> + '_> {
        match self {
            BindingPattern::Name(d) => Box::new(std::iter::once(d)),
            BindingPattern::List { items, rest } => {
                Box::new(items.iter_mut().chain(rest.iter_mut()))
            }
            BindingPattern::Map { entries } => Box::new(entries.iter_mut().map(|(_, d)| d)),
        }
    }
}

/// Pattern of a `match` arm.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchPattern {
    /// `_`
    Wildcard,
    Literal(Literal),
    /// Binds the matched value.
    Binding(VarDecl),
    /// `[p1, p2, ...rest]`. Without `rest` the length must match exactly.
    List {
        items: Vec<MatchPattern>,
        rest: Option<VarDecl>,
    },
}

impl MatchPattern {
    /// Visit every binding the pattern introduces, in source order.
    pub fn for_each_decl_mut(&mut self, f: &mut impl FnMut(&mut VarDecl)) {
        match self {
            MatchPattern::Wildcard | MatchPattern::Literal(_) => {}
            MatchPattern::Binding(d) => f(d),
            MatchPattern::List { items, rest } => {
                for item in items {
                    item.for_each_decl_mut(f);
                }
                if let Some(d) = rest {
                    f(d);
                }
            }
        }
    }
}
