//! Blocks, statements, functions and classes.

use lume_ir::ast::{
    Block, ClassDecl, Function, Program, Resolution, Stmt, StmtKind, UnitInfo, VarRef,
};
use lume_ir::{Mutability, Name, Span};

use super::{ClassContext, Resolver};
use crate::eligibility::{function_is_slot_eligible, program_is_slot_eligible};
use crate::errors::ResolveErrorKind;
use crate::scope::{ClassId, ScopeKind, UnitKind, VariableInfo};

impl Resolver {
    pub(crate) fn resolve_program(&mut self, program: &mut Program) {
        let eligible = program_is_slot_eligible(&program.body);
        self.push_unit(UnitKind::TopLevel, eligible);
        self.push_scope(ScopeKind::Function);
        self.resolve_block_contents(&mut program.body);
        self.pop_scope();
        if let Some(unit) = self.pop_unit() {
            program.unit = unit_info(unit.slot_eligible, unit.locals);
        }
    }

    /// Resolve a block in a fresh scope.
    pub(super) fn resolve_block(&mut self, block: &mut Block) {
        self.push_scope(ScopeKind::Block);
        self.resolve_block_contents(block);
        self.pop_scope();
    }

    /// Resolve a block's statements in the current scope. Function names are
    /// declared first so that functions in one block can call each other.
    fn resolve_block_contents(&mut self, block: &mut Block) {
        for stmt in &mut block.stmts {
            if let StmtKind::Function { decl, .. } = &mut stmt.kind {
                self.declare(decl, Mutability::Immutable);
            }
        }
        for stmt in &mut block.stmts {
            self.resolve_stmt(stmt);
        }
        if let Some(tail) = &mut block.tail {
            self.resolve_expr(tail);
        }
    }

    fn resolve_stmt(&mut self, stmt: &mut Stmt) {
        match &mut stmt.kind {
            StmtKind::Let {
                pattern,
                mutable,
                init,
            } => {
                self.resolve_expr(init);
                let mutability = Mutability::from_mutable(*mutable);
                for decl in pattern.decls_mut() {
                    self.declare(decl, mutability);
                }
            }
            StmtKind::Expr(e) => self.resolve_expr(e),
            StmtKind::Function { function, .. } => {
                self.resolve_function(function, UnitKind::Function);
            }
            StmtKind::Class(class) => self.resolve_class(class),
        }
    }

    /// Resolve a function, lambda or method as its own unit. Parameters and
    /// body share one scope; each default is resolved before its parameter
    /// is declared, so it sees only the earlier parameters.
    pub(super) fn resolve_function(&mut self, function: &mut Function, kind: UnitKind) {
        let eligible = function_is_slot_eligible(function);
        self.push_unit(kind, eligible);
        self.push_scope(ScopeKind::Function);

        for param in &mut function.params {
            if let Some(default) = &mut param.default {
                self.resolve_expr(default);
            }
            self.declare(&mut param.decl, Mutability::Mutable);
        }
        if let Some(rest) = &mut function.rest {
            self.declare(rest, Mutability::Mutable);
        }
        self.resolve_block_contents(&mut function.body);

        self.pop_scope();
        if let Some(unit) = self.pop_unit() {
            tracing::debug!(
                function = %function.name,
                slot_eligible = unit.slot_eligible,
                locals = unit.locals.len(),
                "resolved unit"
            );
            function.unit = unit_info(unit.slot_eligible, unit.locals);
        }
    }

    fn resolve_class(&mut self, class: &mut ClassDecl) {
        let parent_id = class
            .parent
            .as_mut()
            .and_then(|parent| self.resolve_parent(parent, &class.decl.name, class.span));

        let own_fields = class.fields.iter().map(|f| f.name.clone()).collect();
        let id = self.register_class(parent_id, own_fields);
        self.declare_with_class(&mut class.decl, Mutability::Immutable, Some(id));

        self.class_stack.push(ClassContext {
            has_parent: class.parent.is_some(),
        });
        self.push_scope(ScopeKind::Fields);

        let inherited = parent_id.map(|p| self.all_fields(p)).unwrap_or_default();
        for name in inherited {
            self.declare_field(name, Span::DUMMY);
        }
        let mut seen = Vec::with_capacity(class.fields.len());
        for field in &class.fields {
            if seen.contains(&field.name) {
                self.error(
                    ResolveErrorKind::VariableAlreadyDeclared {
                        name: field.name.clone(),
                    },
                    field.span,
                );
                continue;
            }
            seen.push(field.name.clone());
            self.declare_field(field.name.clone(), field.span);
        }

        for field in &mut class.fields {
            if let Some(init) = &mut field.init {
                self.push_unit(UnitKind::Initializer, false);
                self.push_scope(ScopeKind::Function);
                self.resolve_expr(init);
                self.pop_scope();
                self.pop_unit();
            }
        }
        for method in &mut class.methods {
            self.resolve_function(method, UnitKind::Method);
        }

        self.pop_scope();
        self.class_stack.pop();
    }

    /// Check the `extends` clause. Returns the parent's id when it is a class
    /// this pass declared. Host-registered parents are accepted without one.
    fn resolve_parent(
        &mut self,
        parent: &mut VarRef,
        class_name: &Name,
        span: Span,
    ) -> Option<ClassId> {
        let Some(found) = self.lookup(&parent.name) else {
            let kind = if parent.name == *class_name {
                ResolveErrorKind::CircularInheritance {
                    name: class_name.clone(),
                }
            } else {
                ResolveErrorKind::ParentClassNotDefined {
                    name: parent.name.clone(),
                }
            };
            self.error(kind, span);
            return None;
        };
        parent.resolution = found.resolution;
        match (found.class, found.resolution) {
            (Some(id), _) => Some(id),
            (None, Resolution::Global) => None,
            (None, _) => {
                self.error(
                    ResolveErrorKind::ParentClassNotDefined {
                        name: parent.name.clone(),
                    },
                    span,
                );
                None
            }
        }
    }

    fn declare_field(&mut self, name: Name, span: Span) {
        let mut info = VariableInfo::new(false, None, span);
        info.is_field = true;
        info.used = true;
        if let Some(scope) = self.current_scope_mut() {
            scope.insert(name, info);
        }
    }
}

fn unit_info(slot_eligible: bool, locals: Vec<Name>) -> UnitInfo {
    UnitInfo {
        slot_eligible,
        locals,
    }
}
