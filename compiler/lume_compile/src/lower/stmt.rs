//! Programs, blocks, functions and classes.

use std::sync::Arc;

use lume_ir::ast::{Block, ClassDecl, Function, Program, Stmt, StmtKind};
use lume_ir::code::{BlockCode, ClassCode, Code, FieldCode, FunctionCode, ParamCode, ProgramCode};

use super::{storage, Lowerer};

impl Lowerer {
    pub(crate) fn lower_program(&mut self, program: &Program) -> ProgramCode {
        let uses_slots = self.options.optimize_top_level && program.unit.slot_eligible;
        tracing::debug!(
            storage = if uses_slots { "slots" } else { "map" },
            slots = program.unit.slot_count(),
            "top-level storage"
        );
        self.in_unit(uses_slots, |this| ProgramCode {
            storage: storage(uses_slots, &program.unit.locals),
            body: Code::Block(this.lower_block_unscoped(&program.body)),
        })
    }

    /// A nested block: scoped under map storage.
    pub(super) fn lower_block(&mut self, block: &Block) -> BlockCode {
        let mut code = self.lower_block_unscoped(block);
        code.scoped = self.scoped();
        code
    }

    /// A block that runs in the scope its caller set up: unit bodies.
    fn lower_block_unscoped(&mut self, block: &Block) -> BlockCode {
        let mut stmts = Vec::with_capacity(block.stmts.len());
        for stmt in &block.stmts {
            if let StmtKind::Function { decl, function } = &stmt.kind {
                stmts.push(Code::DefineFunction {
                    target: self.target(decl, false),
                    function: self.lower_function(function),
                });
            }
        }
        for stmt in &block.stmts {
            if let Some(code) = self.lower_stmt(stmt) {
                stmts.push(code);
            }
        }
        BlockCode {
            stmts,
            tail: block.tail.as_deref().map(|e| Box::new(self.lower_expr(e))),
            scoped: false,
        }
    }

    /// `None` for function declarations, which were hoisted.
    fn lower_stmt(&mut self, stmt: &Stmt) -> Option<Code> {
        let code = match &stmt.kind {
            StmtKind::Let {
                pattern,
                mutable,
                init,
            } => Code::Declare {
                pattern: self.lower_binding_pattern(pattern, *mutable),
                value: Box::new(self.lower_expr(init)),
                span: stmt.span,
            },
            StmtKind::Expr(e) => self.lower_expr(e),
            StmtKind::Function { .. } => return None,
            StmtKind::Class(class) => self.lower_class(class),
        };
        Some(code)
    }

    pub(super) fn lower_function(&mut self, function: &Function) -> Arc<FunctionCode> {
        let uses_slots = self.options.slot_locals && function.unit.slot_eligible;
        tracing::debug!(
            function = %function.name,
            storage = if uses_slots { "slots" } else { "map" },
            slots = function.unit.slot_count(),
            "function storage"
        );
        self.in_unit(uses_slots, |this| {
            let params = function
                .params
                .iter()
                .map(|p| ParamCode {
                    name: p.decl.name.clone(),
                    target: this.target(&p.decl, true),
                    default: p.default.as_ref().map(|d| this.lower_expr(d)),
                })
                .collect();
            let rest = function.rest.as_ref().map(|r| this.target(r, true));
            let body = Code::Block(this.lower_block_unscoped(&function.body));
            Arc::new(FunctionCode {
                name: function.name.clone(),
                params,
                rest,
                storage: storage(uses_slots, &function.unit.locals),
                body,
                is_async: function.is_async,
                span: function.span,
            })
        })
    }

    fn lower_class(&mut self, class: &ClassDecl) -> Code {
        let fields = class
            .fields
            .iter()
            .map(|f| FieldCode {
                name: f.name.clone(),
                init: f
                    .init
                    .as_ref()
                    .map(|init| self.in_unit(false, |this| this.lower_expr(init))),
            })
            .collect();
        let methods = class
            .methods
            .iter()
            .map(|m| self.lower_function(m))
            .collect();
        Code::DefineClass {
            target: self.target(&class.decl, false),
            class: Arc::new(ClassCode {
                name: class.decl.name.clone(),
                fields,
                methods,
                span: class.span,
            }),
            parent: class.parent.as_ref().map(|p| self.access(p)),
            span: class.span,
        }
    }
}
