//! Result and error types for the core library

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Core library error type
///
/// Every failure a caller can observe maps to exactly one of these kinds.
/// `NotFound` and `StateConflict` carry a single message; `Validation`
/// carries the full set of violated field rules so callers can render
/// every problem at once.
#[derive(Error, Debug)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(Violations),

    #[error("state conflict: {0}")]
    StateConflict(String),

    #[error("insufficient funds on account {0}")]
    InsufficientFunds(Uuid),

    #[error("source and destination accounts must differ")]
    SameAccount,

    #[error("amount must not be negative")]
    NegativeAmount,

    #[error("rate lookup failed: {0}")]
    Lookup(String),

    #[error("commit failed: {0}")]
    Persistence(String),

    #[error("operation cancelled before commit")]
    Cancelled,
}

impl Error {
    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error from a single violated rule
    pub fn validation(rule: &'static str, msg: impl Into<String>) -> Self {
        Self::Validation(Violations::single(rule, msg))
    }

    /// Create a state conflict error
    pub fn state_conflict(msg: impl Into<String>) -> Self {
        Self::StateConflict(msg.into())
    }

    /// Create a rate lookup error
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// A single violated field rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Stable rule identifier, e.g. "login.max_length"
    pub rule: &'static str,
    /// Human-readable description of the violation
    pub message: String,
}

/// A collection of field rule violations gathered during one validation pass
#[derive(Debug, Clone, Default)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn single(rule: &'static str, message: impl Into<String>) -> Self {
        let mut v = Self::new();
        v.push(rule, message);
        v
    }

    /// Record a violated rule
    pub fn push(&mut self, rule: &'static str, message: impl Into<String>) {
        self.0.push(Violation {
            rule,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rules(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|v| v.rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Finish a validation pass: `Ok` when nothing was violated,
    /// otherwise a `Validation` error carrying every recorded rule.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", v.message)?;
            first = false;
        }
        Ok(())
    }
}
