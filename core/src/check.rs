//! Validation aggregator.
//!
//! Checks never stop at the first failing rule: every violated rule is
//! collected into one [`CheckError`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::{OptionRecord, RenderError, assemble};

/// Category of a [`Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// A field or cross-field rule declared by the record.
    Check,
    /// A required field is empty and has no default.
    MissingRequired,
    /// A required typed value has no canonical encoding.
    Encode,
}

/// One failed rule: kind, message and free-form context.
///
/// # Examples
///
/// ```
/// use v8_args_core::{Violation, ViolationKind};
///
/// let v = Violation::check("ssh host key must be set")
///     .with_context("msg", "field SSHHostKeyAuto or SSHHostKey not set");
/// assert_eq!(v.kind, ViolationKind::Check);
/// assert_eq!(v.context["msg"], "field SSHHostKeyAuto or SSHHostKey not set");
/// assert_eq!(v.to_string(), "ssh host key must be set");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    /// A record-declared rule violation.
    pub fn check(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Check, message)
    }

    /// Adds one context entry (field name or key, explanation).
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

impl From<RenderError> for Violation {
    fn from(err: RenderError) -> Self {
        let kind = match err {
            RenderError::Encode { .. } => ViolationKind::Encode,
            RenderError::MissingRequired { .. } | RenderError::KindMismatch { .. } => {
                ViolationKind::MissingRequired
            }
        };
        Violation::new(kind, err.to_string()).with_context(err.field(), "cannot be rendered")
    }
}

/// Aggregate of every violation found by a check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckError {
    violations: Vec<Violation>,
}

impl CheckError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violations.as_slice() {
            [] => write!(f, "check failed"),
            [only] => write_violation(f, only),
            many => {
                write!(f, "{} checks failed: ", many.len())?;
                for (i, violation) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write_violation(f, violation)?;
                }
                Ok(())
            }
        }
    }
}

fn write_violation(f: &mut fmt::Formatter<'_>, violation: &Violation) -> fmt::Result {
    write!(f, "{}", violation.message)?;
    if !violation.context.is_empty() {
        let context: Vec<String> = violation
            .context
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect();
        write!(f, " ({})", context.join(", "))?;
    }
    Ok(())
}

impl std::error::Error for CheckError {}

/// Collects violations and turns them into a single result.
///
/// # Examples
///
/// ```
/// use v8_args_core::{Checker, Violation};
///
/// let allow_changes = true;
/// let allowed_rule: Option<&str> = None;
/// let not_recommended_rule: Option<&str> = None;
///
/// let mut checker = Checker::new();
/// checker.ensure(!allow_changes || allowed_rule.is_some(), || {
///     Violation::check("changes allowed rule must be set")
/// });
/// checker.ensure(!allow_changes || not_recommended_rule.is_some(), || {
///     Violation::check("changes not recommended rule must be set")
/// });
///
/// let err = checker.finish().unwrap_err();
/// assert_eq!(err.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a check seeded with every field of `record` that cannot be
    /// rendered.
    pub fn for_record<T: OptionRecord>(record: &T) -> Self {
        let violations = assemble(record)
            .errors
            .into_iter()
            .map(Violation::from)
            .collect();
        Self { violations }
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Records the violation built by `violation` unless `ok` holds.
    pub fn ensure(&mut self, ok: bool, violation: impl FnOnce() -> Violation) {
        if !ok {
            self.violations.push(violation());
        }
    }

    pub fn finish(self) -> Result<(), CheckError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(CheckError {
                violations: self.violations,
            })
        }
    }
}

/// Checks that every field of `record` can be rendered.
pub fn check_rendering<T: OptionRecord>(record: &T) -> Result<(), CheckError> {
    Checker::for_record(record).finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_checker_passes() {
        assert_eq!(Checker::new().finish(), Ok(()));
    }

    #[test]
    fn test_checker_aggregates_without_short_circuit() {
        let mut checker = Checker::new();
        checker.ensure(false, || Violation::check("first"));
        checker.ensure(true, || Violation::check("skipped"));
        checker.ensure(false, || Violation::check("second"));

        let err = checker.finish().unwrap_err();
        let messages: Vec<_> = err.violations().iter().map(|v| v.message.as_str()).collect();
        assert_eq!(messages, ["first", "second"]);
    }

    #[test]
    fn test_display_single_with_context() {
        let mut checker = Checker::new();
        checker.push(
            Violation::check("configuration changes must be set")
                .with_context("msg", "field ChangesNotRecommendedRule or ChangesAllowedRule not set"),
        );
        let err = checker.finish().unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration changes must be set (msg: field ChangesNotRecommendedRule or ChangesAllowedRule not set)"
        );
    }

    #[test]
    fn test_display_many() {
        let mut checker = Checker::new();
        checker.push(Violation::check("a"));
        checker.push(Violation::check("b"));
        assert_eq!(checker.finish().unwrap_err().to_string(), "2 checks failed: a; b");
    }

    #[test]
    fn test_render_error_converts_with_field_context() {
        let violation = Violation::from(RenderError::MissingRequired {
            field: "file",
            flag: "/ConfigurationRepositoryDumpCfg",
        });
        assert_eq!(violation.kind, ViolationKind::MissingRequired);
        assert_eq!(violation.context["file"], "cannot be rendered");
    }

    #[test]
    fn test_violation_serializes_without_empty_context() {
        let json = serde_json::to_value(Violation::check("x")).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "check", "message": "x" }));
    }
}
