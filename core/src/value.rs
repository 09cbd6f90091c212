//! Live field values handed to the renderer.

use std::borrow::Cow;

use thiserror::Error;

/// Failure reported by an [`Encode`] hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot encode {type_name}: {reason}")]
pub struct EncodeError {
    /// Type that failed to encode.
    pub type_name: &'static str,
    /// Human-readable cause.
    pub reason: String,
}

impl EncodeError {
    pub fn new(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            type_name,
            reason: reason.into(),
        }
    }
}

/// Converts a typed value (usually an enumerated constant) into its
/// canonical external token.
///
/// # Examples
///
/// ```
/// use v8_args_core::{Encode, EncodeError};
///
/// enum Mode { Fast, Slow }
///
/// impl Encode for Mode {
///     fn encode(&self) -> Result<String, EncodeError> {
///         Ok(match self {
///             Mode::Fast => "fast",
///             Mode::Slow => "slow",
///         }
///         .to_string())
///     }
/// }
///
/// assert_eq!(Mode::Slow.encode().unwrap(), "slow");
/// ```
pub trait Encode {
    fn encode(&self) -> Result<String, EncodeError>;
}

/// Snapshot of one field's runtime value.
///
/// Empty text and [`Value::Absent`] both count as "no value": optional
/// fields are then omitted and required fields fall back to their default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a> {
    /// Boolean presence.
    Flag(bool),
    /// Textual scalar; the empty string means unset.
    Text(Cow<'a, str>),
    /// Output of an [`Encode`] hook.
    Encoded(Result<String, EncodeError>),
    /// No value at all (an unset `Option`). `Some(0)` is a value.
    Absent,
}

impl<'a> Value<'a> {
    /// Runs the encode hook of a present value.
    pub fn encode<E: Encode + ?Sized>(value: &E) -> Self {
        Value::Encoded(value.encode())
    }

    /// Like [`encode`](Self::encode), mapping `None` to [`Value::Absent`].
    pub fn encode_opt<E: Encode>(value: Option<&E>) -> Self {
        value.map_or(Value::Absent, Value::encode)
    }

    /// Returns `true` when the value carries nothing to emit.
    ///
    /// # Examples
    ///
    /// ```
    /// use v8_args_core::Value;
    ///
    /// assert!(Value::from("").is_empty());
    /// assert!(Value::Flag(false).is_empty());
    /// assert!(Value::from(None::<i64>).is_empty());
    /// assert!(!Value::from(Some(-1i64)).is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Flag(set) => !set,
            Value::Text(text) => text.is_empty(),
            Value::Encoded(Ok(text)) => text.is_empty(),
            Value::Encoded(Err(_)) => false,
            Value::Absent => true,
        }
    }
}

impl From<bool> for Value<'_> {
    fn from(value: bool) -> Self {
        Value::Flag(value)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(value: &'a String) -> Self {
        Value::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for Value<'_> {
    fn from(value: String) -> Self {
        Value::Text(Cow::Owned(value))
    }
}

impl From<Option<i64>> for Value<'_> {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Value::Absent, |n| Value::Text(Cow::Owned(n.to_string())))
    }
}

impl From<Option<u16>> for Value<'_> {
    fn from(value: Option<u16>) -> Self {
        value.map_or(Value::Absent, |n| Value::Text(Cow::Owned(n.to_string())))
    }
}
