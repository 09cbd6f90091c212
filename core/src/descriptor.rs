//! Field descriptors: the normalized marshaling rule for one declared field.
//!
//! Descriptors are plain `const` data. Record types declare them once in
//! their [`Schema`](crate::Schema) table and the renderer interprets them
//! against live field values.

use serde::Serialize;

/// How a field turns into tokens.
///
/// # Examples
///
/// ```
/// use v8_args_core::{FieldDescriptor, FieldKind};
///
/// let flag = FieldDescriptor::presence("no_bind", "-NoBind");
/// assert_eq!(flag.kind, FieldKind::Presence);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Boolean switch: the flag alone when `true`, nothing when `false`.
    Presence,
    /// Plain string value, emitted as `"<flag> <value>"`.
    Scalar,
    /// Typed value converted through an [`Encode`](crate::Encode) hook.
    Encoded,
    /// An embedded record whose own fields are spliced in place.
    Composed,
    /// Supplies the primary command token, always emitted first.
    CommandMarker,
}

/// Normalized marshaling rule for one field.
///
/// Use the `const` constructors to declare descriptors next to the record
/// they describe, then chain [`optional`](Self::optional) or
/// [`with_default`](Self::with_default).
///
/// # Examples
///
/// ```
/// use v8_args_core::FieldDescriptor;
///
/// const USER: FieldDescriptor =
///     FieldDescriptor::scalar("user", "/ConfigurationRepositoryN").with_default("admin");
/// const EXTENSION: FieldDescriptor =
///     FieldDescriptor::scalar("extension", "-Extension").optional();
///
/// assert_eq!(USER.default, Some("admin"));
/// assert!(!USER.optional);
/// assert!(EXTENSION.optional);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field identity, used in diagnostics and validation context.
    pub name: &'static str,
    /// Literal token emitted before the value; empty for a bare positional value.
    pub flag: &'static str,
    /// When set, an empty value suppresses emission entirely.
    pub optional: bool,
    /// Substituted when a required value is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    /// Rendering rule.
    pub kind: FieldKind,
}

impl FieldDescriptor {
    const fn new(name: &'static str, flag: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            flag,
            optional: false,
            default: None,
            kind,
        }
    }

    /// Boolean presence flag. Presence flags are never required.
    pub const fn presence(name: &'static str, flag: &'static str) -> Self {
        Self::new(name, flag, FieldKind::Presence).optional()
    }

    /// Named scalar value (`"<flag> <value>"`).
    pub const fn scalar(name: &'static str, flag: &'static str) -> Self {
        Self::new(name, flag, FieldKind::Scalar)
    }

    /// Bare positional scalar with no flag token.
    pub const fn positional(name: &'static str) -> Self {
        Self::new(name, "", FieldKind::Scalar)
    }

    /// Value rendered through its [`Encode`](crate::Encode) hook.
    ///
    /// An empty `flag` makes the encoded value itself the token.
    pub const fn encoded(name: &'static str, flag: &'static str) -> Self {
        Self::new(name, flag, FieldKind::Encoded)
    }

    /// Embedded record reference; carries no token of its own.
    pub const fn composed(name: &'static str) -> Self {
        Self::new(name, "", FieldKind::Composed)
    }

    /// Command marker supplying the leading command token.
    pub const fn marker(token: &'static str) -> Self {
        Self::new("command", token, FieldKind::CommandMarker)
    }

    /// Marks the field optional: empty values are omitted.
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Declares a fallback used when a required value is empty.
    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    /// Returns `true` for descriptors with no flag token.
    pub fn is_positional(&self) -> bool {
        self.flag.is_empty()
    }

    /// Returns `true` when an empty value is a rendering failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use v8_args_core::FieldDescriptor;
    ///
    /// assert!(FieldDescriptor::scalar("path", "/F").is_strictly_required());
    /// assert!(!FieldDescriptor::scalar("path", "/F").with_default(".").is_strictly_required());
    /// assert!(!FieldDescriptor::presence("force", "-force").is_strictly_required());
    /// ```
    pub fn is_strictly_required(&self) -> bool {
        !self.optional
            && self.default.is_none()
            && matches!(self.kind, FieldKind::Scalar | FieldKind::Encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_is_optional() {
        let flag = FieldDescriptor::presence("force", "-force");
        assert!(flag.optional);
        assert_eq!(flag.kind, FieldKind::Presence);
    }

    #[test]
    fn test_positional_has_empty_flag() {
        let pos = FieldDescriptor::positional("group_by");
        assert!(pos.is_positional());
        assert_eq!(pos.kind, FieldKind::Scalar);
    }

    #[test]
    fn test_marker_carries_token_as_flag() {
        let marker = FieldDescriptor::marker("/ConfigurationRepositoryCreate");
        assert_eq!(marker.flag, "/ConfigurationRepositoryCreate");
        assert_eq!(marker.kind, FieldKind::CommandMarker);
    }

    #[test]
    fn test_descriptor_serializes_kind_in_kebab_case() {
        let json = serde_json::to_value(FieldDescriptor::marker("/AgentMode")).unwrap();
        assert_eq!(json["kind"], "command-marker");
        assert!(json.get("default").is_none());
    }
}
