//! Executable IR.
//!
//! The compiler lowers a resolved syntax tree into `Code`. Every storage
//! decision is already made: a variable access is an `Access` (slot, dynamic
//! name, prelude global or receiver field), numeric operators that the
//! compiler could prove numeric are `NumBinary` / `NumNeg`, and blocks that
//! need a fresh dynamic scope carry `scoped: true`.
//!
//! Code is immutable and contains only `Arc` and plain data, so compiled
//! programs are `Send + Sync` and can be run from many execution contexts.

mod function;

pub use function::{ClassCode, FieldCode, FunctionCode, ParamCode, ProgramCode, Storage};

use crate::{BinaryOp, Literal, Name, Span, UnaryOp, UpdateOp};
use std::sync::Arc;

/// Where a declaration stores its value.
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    /// Index into the unit's local array.
    Slot(u32),
    /// Defined by name in the current dynamic scope.
    Name { name: Name, mutable: bool },
}

/// How a variable is read or written.
#[derive(Clone, Debug, PartialEq)]
pub enum Access {
    Slot(u32),
    /// Looked up through the dynamic scope chain.
    Name(Name),
    /// Looked up directly in the context's globals.
    Global(Name),
    /// Field of the current receiver.
    Field(Name),
}

impl Access {
    pub fn name(&self) -> Option<&Name> {
        match self {
            Access::Slot(_) => None,
            Access::Name(n) | Access::Global(n) | Access::Field(n) => Some(n),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Code {
    Constant(Literal),
    /// Concatenation of the display strings of each part.
    Interpolate(Vec<Code>),
    List(Vec<CodeElement>),
    Map(Vec<(Name, Code)>),

    Load {
        access: Access,
        span: Span,
    },
    This {
        span: Span,
    },
    /// `let` / `var` with its destructuring pattern.
    Declare {
        pattern: PatternCode,
        value: Box<Code>,
        span: Span,
    },
    Assign {
        target: AssignCode,
        op: Option<BinaryOp>,
        value: Box<Code>,
        span: Span,
    },
    Update {
        target: AssignCode,
        op: UpdateOp,
        prefix: bool,
        span: Span,
    },

    /// Inlined operator on operands that always produce numbers.
    NumBinary {
        op: BinaryOp,
        left: Box<Code>,
        right: Box<Code>,
        span: Span,
    },
    /// Inlined negation of an operand that always produces a number.
    NumNeg(Box<Code>),
    /// Operator routed through dynamic dispatch.
    Binary {
        op: BinaryOp,
        left: Box<Code>,
        right: Box<Code>,
        span: Span,
    },
    And(Box<Code>, Box<Code>),
    Or(Box<Code>, Box<Code>),
    Unary {
        op: UnaryOp,
        operand: Box<Code>,
        span: Span,
    },

    Call {
        callee: Box<Code>,
        args: Vec<CodeElement>,
        span: Span,
    },
    /// `object.method(args)`: field callables, class methods and builtins.
    MethodCall {
        object: Box<Code>,
        method: Name,
        args: Vec<CodeElement>,
        span: Span,
    },
    SuperCall {
        method: Name,
        args: Vec<CodeElement>,
        span: Span,
    },
    Member {
        object: Box<Code>,
        name: Name,
        span: Span,
    },
    Index {
        object: Box<Code>,
        index: Box<Code>,
        span: Span,
    },

    If {
        cond: Box<Code>,
        then_branch: Box<Code>,
        else_branch: Option<Box<Code>>,
    },
    While {
        cond: Box<Code>,
        body: Box<Code>,
    },
    For {
        target: Target,
        iterable: Box<Code>,
        body: Box<Code>,
        /// Bind the loop variable in a fresh scope per iteration.
        scoped: bool,
        span: Span,
    },
    Block(BlockCode),

    Lambda(Arc<FunctionCode>),
    /// Hoisted named function declaration.
    DefineFunction {
        target: Target,
        function: Arc<FunctionCode>,
    },
    DefineClass {
        target: Target,
        class: Arc<ClassCode>,
        parent: Option<Access>,
        span: Span,
    },

    Try {
        body: Box<Code>,
        catch: Option<CatchCode>,
        finally: Option<Box<Code>>,
    },
    Throw {
        value: Box<Code>,
        span: Span,
    },
    Range {
        start: Box<Code>,
        end: Box<Code>,
        inclusive: bool,
        span: Span,
    },
    Match {
        subject: Box<Code>,
        arms: Vec<ArmCode>,
        scoped: bool,
        span: Span,
    },

    Return(Option<Box<Code>>),
    Break,
    Continue,
    Await(Box<Code>),
}

impl Code {
    pub const NULL: Code = Code::Constant(Literal::Null);

    /// The code always evaluates to a number without dynamic dispatch.
    pub fn is_statically_numeric(&self) -> bool {
        match self {
            Code::Constant(Literal::Number(_)) | Code::NumNeg(_) => true,
            Code::NumBinary { op, .. } => op.is_arithmetic(),
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockCode {
    pub stmts: Vec<Code>,
    pub tail: Option<Box<Code>>,
    /// Evaluate inside a fresh dynamic scope.
    pub scoped: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CodeElement {
    Item(Code),
    Spread(Code),
}

#[derive(Clone, Debug, PartialEq)]
pub enum PatternCode {
    Bind(Target),
    List {
        items: Vec<Target>,
        rest: Option<Target>,
    },
    Map {
        entries: Vec<(Name, Target)>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum AssignCode {
    Var(Access),
    Member { object: Box<Code>, name: Name },
    Index { object: Box<Code>, index: Box<Code> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchCode {
    pub binding: Option<Target>,
    pub body: Box<Code>,
    pub scoped: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArmCode {
    pub pattern: ArmPattern,
    pub guard: Option<Code>,
    pub body: Code,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArmPattern {
    Wildcard,
    Literal(Literal),
    Bind(Target),
    List {
        items: Vec<ArmPattern>,
        rest: Option<Target>,
    },
}

#[cfg(test)]
mod tests;
