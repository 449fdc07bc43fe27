//! Lume IR - shared data structures for the Lume engine.
//!
//! This crate contains:
//! - `Name` and `Span`, the identifier and source-location types
//! - The token interface produced by the external lexer
//! - The syntax tree produced by the external parser (`ast`), including the
//!   annotation slots the scope resolver fills in
//! - The executable IR produced by the compiler (`code`)
//! - Tree builders (`build`) for hosts and tests that construct trees directly
//!
//! # Pipeline Position
//!
//! ```text
//! tokens → parse → ast::Program → resolve → compile → code::ProgramCode → eval
//! ```
//!
//! Syntax trees and executable code are immutable after compilation and are
//! shared across threads, so every string in them is a `Name` (`Arc<str>`).

pub mod ast;
pub mod build;
pub mod code;
mod name;
mod span;
pub mod token;

pub use ast::{BinaryOp, Literal, Mutability, UnaryOp, UpdateOp};
pub use name::Name;
pub use span::{Span, Spanned};
