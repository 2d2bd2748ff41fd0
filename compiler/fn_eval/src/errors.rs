//! Evaluation errors and their constructors.
//!
//! Every runtime failure is an [`EvalError`] built through one of the
//! factory functions below, so messages are produced in one place.

use std::fmt;

use crate::Value;

/// Result of evaluating to a single value.
pub type EvalResult = Result<Value, EvalError>;

/// Structured category of an evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    UndefinedIdentifier {
        name: String,
    },
    /// The name is already bound in the environment's own bindings.
    DuplicateDefinition {
        name: String,
    },
    NotCallable {
        type_name: &'static str,
    },
    NotDefinable {
        type_name: &'static str,
    },
    ArgumentCountMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    /// A `when` had no truthy branch.
    NoMatchingBranch,
    ImportFailure {
        path: String,
        reason: String,
    },
    TypeMismatch {
        expected: String,
        got: &'static str,
    },
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },
    DivisionByZero,
    RecursionLimitExceeded {
        depth: usize,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedIdentifier { name } => write!(f, "`{name}` is not defined"),
            Self::DuplicateDefinition { name } => {
                write!(f, "`{name}` is already defined in this scope")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::NotDefinable { type_name } => {
                write!(f, "cannot define names on a {type_name}")
            }
            Self::ArgumentCountMismatch {
                name,
                expected,
                got,
            } => write!(
                f,
                "`{name}` expects {expected} argument{}, got {got}",
                if *expected == 1 { "" } else { "s" }
            ),
            Self::NoMatchingBranch => f.write_str("no branch of `when` matched"),
            Self::ImportFailure { path, reason } => {
                write!(f, "failed to import \"{path}\": {reason}")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for list of length {len}")
            }
            Self::DivisionByZero => f.write_str("division by zero"),
            Self::RecursionLimitExceeded { depth } => {
                write!(f, "maximum call depth of {depth} exceeded")
            }
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError { kind, message }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

#[cold]
pub fn undefined_identifier(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedIdentifier {
        name: name.to_string(),
    })
}

#[cold]
pub fn duplicate_definition(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateDefinition {
        name: name.to_string(),
    })
}

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

#[cold]
pub fn not_definable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotDefinable { type_name })
}

#[cold]
pub fn argument_count_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentCountMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn no_matching_branch() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMatchingBranch)
}

#[cold]
pub fn import_failure(path: &str, reason: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImportFailure {
        path: path.to_string(),
        reason: reason.to_string(),
    })
}

#[cold]
pub fn type_mismatch(expected: impl Into<String>, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.into(),
        got,
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimitExceeded { depth })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn message_matches_kind_display() {
        let err = undefined_identifier("x");
        assert_eq!(err.message, err.kind.to_string());
        assert_eq!(err.to_string(), "`x` is not defined");
    }

    #[test]
    fn argument_count_pluralizes() {
        assert_eq!(
            argument_count_mismatch("not", 1, 2).to_string(),
            "`not` expects 1 argument, got 2"
        );
        assert_eq!(
            argument_count_mismatch("+", 2, 0).to_string(),
            "`+` expects 2 arguments, got 0"
        );
    }

    #[test]
    fn import_failure_carries_reason() {
        let err = import_failure("lib.fn", "file not found");
        assert_eq!(
            err.kind,
            EvalErrorKind::ImportFailure {
                path: "lib.fn".into(),
                reason: "file not found".into(),
            }
        );
        assert_eq!(err.to_string(), "failed to import \"lib.fn\": file not found");
    }
}
