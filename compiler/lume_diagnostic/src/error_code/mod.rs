//! Error codes for all engine diagnostics.

use std::fmt;

/// Compiler phase an error code belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    Lex,
    Parse,
    Resolve,
    Runtime,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Lex => "lex",
            Phase::Parse => "parse",
            Phase::Resolve => "resolve",
            Phase::Runtime => "runtime",
        })
    }
}

/// Error codes for all engine diagnostics.
///
/// The discriminant is the code's numeric identity and never changes once
/// published.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u16)]
pub enum ErrorCode {
    // Lex errors (1-99)
    UnexpectedCharacter = 1,
    UnterminatedString = 2,
    InvalidNumber = 3,
    InvalidEscape = 4,

    // Parse errors (100-199)
    UnexpectedToken = 100,
    ExpectedExpression = 101,
    UnclosedDelimiter = 102,
    ExpectedIdentifier = 103,
    RestParameterNotLast = 104,

    // Resolve errors (200-299)
    UndefinedVariable = 200,
    VariableAlreadyDeclared = 201,
    CannotAssignToLet = 202,
    ParentClassNotDefined = 203,
    CircularInheritance = 204,
    ReturnOutsideFunction = 205,
    LoopControlOutsideLoop = 206,
    ThisOutsideClass = 207,
    SuperOutsideSubclass = 208,

    // Runtime errors (300-399)
    DivisionByZero = 300,
    IndexOutOfRange = 301,
    KeyNotFound = 302,
    NullReference = 303,
    TypeMismatch = 304,
    NotCallable = 305,
    CannotCompare = 306,
    InvalidOperation = 307,
    UnboundVariable = 308,
    WrongArgumentCount = 309,
    StackOverflow = 310,
    UndefinedMember = 311,
    NoMatchingArm = 312,
    Thrown = 313,
    ImmutableAssignment = 314,
}

impl ErrorCode {
    /// All error codes, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::UnexpectedCharacter,
        ErrorCode::UnterminatedString,
        ErrorCode::InvalidNumber,
        ErrorCode::InvalidEscape,
        ErrorCode::UnexpectedToken,
        ErrorCode::ExpectedExpression,
        ErrorCode::UnclosedDelimiter,
        ErrorCode::ExpectedIdentifier,
        ErrorCode::RestParameterNotLast,
        ErrorCode::UndefinedVariable,
        ErrorCode::VariableAlreadyDeclared,
        ErrorCode::CannotAssignToLet,
        ErrorCode::ParentClassNotDefined,
        ErrorCode::CircularInheritance,
        ErrorCode::ReturnOutsideFunction,
        ErrorCode::LoopControlOutsideLoop,
        ErrorCode::ThisOutsideClass,
        ErrorCode::SuperOutsideSubclass,
        ErrorCode::DivisionByZero,
        ErrorCode::IndexOutOfRange,
        ErrorCode::KeyNotFound,
        ErrorCode::NullReference,
        ErrorCode::TypeMismatch,
        ErrorCode::NotCallable,
        ErrorCode::CannotCompare,
        ErrorCode::InvalidOperation,
        ErrorCode::UnboundVariable,
        ErrorCode::WrongArgumentCount,
        ErrorCode::StackOverflow,
        ErrorCode::UndefinedMember,
        ErrorCode::NoMatchingArm,
        ErrorCode::Thrown,
        ErrorCode::ImmutableAssignment,
    ];

    /// The fixed numeric identity of this code.
    #[inline]
    pub const fn number(self) -> u16 {
        self as u16
    }

    pub const fn phase(self) -> Phase {
        match self.number() {
            0..=99 => Phase::Lex,
            100..=199 => Phase::Parse,
            200..=299 => Phase::Resolve,
            _ => Phase::Runtime,
        }
    }

    pub fn from_number(number: u16) -> Option<ErrorCode> {
        Self::ALL.iter().find(|c| c.number() == number).copied()
    }

    pub fn is_resolve_error(self) -> bool {
        self.phase() == Phase::Resolve
    }

    pub fn is_runtime_error(self) -> bool {
        self.phase() == Phase::Runtime
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.number())
    }
}

/// Parse an error code string like `"E0202"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('E')
            .or_else(|| s.strip_prefix('e'))
            .ok_or(())?;
        let number: u16 = digits.parse().map_err(|_| ())?;
        Self::from_number(number).ok_or(())
    }
}
