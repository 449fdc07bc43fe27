//! Failures reported to the host.

use lume_diagnostic::{Diagnostic, ErrorCode};
use lume_resolve::ResolveError;
use lume_runtime::EvalError;

/// Why a script did not produce a value.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ScriptError {
    /// Every resolution error found in the program. Nothing was compiled.
    #[error("{} resolution error(s), first: {}", .0.len(), first_message(.0))]
    Resolve(Vec<ResolveError>),
    #[error("runtime error: {0}")]
    Runtime(#[source] EvalError),
}

fn first_message(errors: &[ResolveError]) -> String {
    errors.first().map(ToString::to_string).unwrap_or_default()
}

impl ScriptError {
    /// Code of the first error.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ScriptError::Resolve(errors) => errors.first().map(ResolveError::code),
            ScriptError::Runtime(err) => Some(err.code()),
        }
    }

    pub fn codes(&self) -> Vec<ErrorCode> {
        match self {
            ScriptError::Resolve(errors) => errors.iter().map(ResolveError::code).collect(),
            ScriptError::Runtime(err) => vec![err.code()],
        }
    }

    pub fn runtime_error(&self) -> Option<&EvalError> {
        match self {
            ScriptError::Runtime(err) => Some(err),
            ScriptError::Resolve(_) => None,
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            ScriptError::Resolve(errors) => {
                errors.iter().map(ResolveError::to_diagnostic).collect()
            }
            ScriptError::Runtime(err) => vec![err.to_diagnostic()],
        }
    }
}

impl From<EvalError> for ScriptError {
    fn from(err: EvalError) -> Self {
        ScriptError::Runtime(err)
    }
}
