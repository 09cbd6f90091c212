//! Value renderer: one descriptor plus one live value in, at most one token out.

use thiserror::Error;
use tracing::debug;

use crate::{EncodeError, FieldDescriptor, FieldKind, Value};

/// Reasons a field cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Required field is empty and declares no default.
    #[error("required field `{field}` ({flag}) is empty and has no default")]
    MissingRequired {
        field: &'static str,
        flag: &'static str,
    },

    /// Encode hook of a required field failed.
    #[error("field `{field}` could not be encoded: {source}")]
    Encode {
        field: &'static str,
        #[source]
        source: EncodeError,
    },

    /// The accessor produced a value the descriptor kind cannot render
    /// (e.g. text for a presence flag).
    #[error("field `{field}` holds a value that does not fit kind {kind:?}")]
    KindMismatch {
        field: &'static str,
        kind: FieldKind,
    },
}

impl RenderError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            RenderError::MissingRequired { field, .. }
            | RenderError::Encode { field, .. }
            | RenderError::KindMismatch { field, .. } => field,
        }
    }
}

/// Renders one field.
///
/// Returns `Ok(None)` when the field contributes nothing: a `false` presence
/// flag, an empty optional value, or an optional encoded value whose hook
/// failed. Flag and value are co-located in a single token.
///
/// # Examples
///
/// ```
/// use v8_args_core::{render_field, FieldDescriptor, Value};
///
/// let path = FieldDescriptor::scalar("path", "/ConfigurationRepositoryF");
/// assert_eq!(
///     render_field(&path, Value::from("./repo")).unwrap().as_deref(),
///     Some("/ConfigurationRepositoryF ./repo"),
/// );
///
/// let ext = FieldDescriptor::scalar("extension", "-Extension").optional();
/// assert_eq!(render_field(&ext, Value::from("")).unwrap(), None);
///
/// let user = FieldDescriptor::scalar("user", "-User").with_default("admin");
/// assert_eq!(render_field(&user, Value::from("")).unwrap().as_deref(), Some("-User admin"));
///
/// assert!(render_field(&path, Value::from("")).is_err());
/// ```
pub fn render_field(
    descriptor: &FieldDescriptor,
    value: Value<'_>,
) -> Result<Option<String>, RenderError> {
    match descriptor.kind {
        FieldKind::CommandMarker => Ok(Some(descriptor.flag.to_string())),
        FieldKind::Composed => Ok(None),
        FieldKind::Presence => match value {
            Value::Flag(true) => Ok(Some(descriptor.flag.to_string())),
            Value::Flag(false) | Value::Absent => Ok(None),
            _ => Err(mismatch(descriptor)),
        },
        FieldKind::Scalar | FieldKind::Encoded => {
            let text = match value {
                Value::Text(text) => text.into_owned(),
                Value::Encoded(Ok(text)) => text,
                Value::Encoded(Err(source)) => {
                    if descriptor.optional {
                        debug!(field = descriptor.name, error = %source, "dropping optional field that failed to encode");
                        return Ok(None);
                    }
                    return Err(RenderError::Encode {
                        field: descriptor.name,
                        source,
                    });
                }
                Value::Absent => String::new(),
                Value::Flag(_) => return Err(mismatch(descriptor)),
            };
            render_text(descriptor, &text)
        }
    }
}

fn render_text(descriptor: &FieldDescriptor, text: &str) -> Result<Option<String>, RenderError> {
    if !text.is_empty() {
        return Ok(Some(join(descriptor.flag, text)));
    }
    if descriptor.optional {
        return Ok(None);
    }
    match descriptor.default {
        Some(default) => Ok(Some(join(descriptor.flag, default))),
        None => Err(RenderError::MissingRequired {
            field: descriptor.name,
            flag: descriptor.flag,
        }),
    }
}

fn join(flag: &str, value: &str) -> String {
    if flag.is_empty() {
        value.to_string()
    } else {
        format!("{flag} {value}")
    }
}

fn mismatch(descriptor: &FieldDescriptor) -> RenderError {
    RenderError::KindMismatch {
        field: descriptor.name,
        kind: descriptor.kind,
    }
}
