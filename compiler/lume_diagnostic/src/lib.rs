//! Error codes and diagnostics for the Lume engine.
//!
//! Every failure the engine reports carries an [`ErrorCode`] with a fixed
//! numeric identity, partitioned by phase:
//!
//! | Range   | Phase    |
//! |---------|----------|
//! | 1–99    | lex      |
//! | 100–199 | parse    |
//! | 200–299 | resolve  |
//! | 300–399 | runtime  |
//!
//! Tests assert on codes, never on message text. Rendering a [`Diagnostic`]
//! for humans is left to the host.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::{ErrorCode, Phase};
