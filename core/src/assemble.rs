//! Argument assembler: schema walk + value renderer + fixup pass.

use tracing::warn;

use crate::{FieldDescriptor, FieldKind, OptionRecord, RenderError, Value, Visitor, relocate_to_end, render_field};

/// Raw assembly output, before the fixup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembled {
    /// Command-marker tokens first, then field tokens in descriptor order.
    pub tokens: Vec<String>,
    /// Fields that could not be rendered and were left out of `tokens`.
    pub errors: Vec<RenderError>,
}

#[derive(Default)]
struct Assembler {
    commands: Vec<String>,
    fields: Vec<String>,
    errors: Vec<RenderError>,
}

impl Visitor for Assembler {
    fn visit(&mut self, descriptor: &FieldDescriptor, value: Value<'_>) {
        if descriptor.kind == FieldKind::CommandMarker {
            self.commands.push(descriptor.flag.to_string());
            return;
        }
        match render_field(descriptor, value) {
            Ok(Some(token)) => self.fields.push(token),
            Ok(None) => {}
            Err(err) => self.errors.push(err),
        }
    }
}

/// Walks `record` and renders every field.
///
/// Pure and repeatable: the output depends only on the field values and the
/// static schema of `T`.
pub fn assemble<T: OptionRecord>(record: &T) -> Assembled {
    let mut assembler = Assembler::default();
    T::schema().walk(record, &mut assembler);

    let mut tokens = assembler.commands;
    tokens.extend(assembler.fields);
    Assembled {
        tokens,
        errors: assembler.errors,
    }
}

/// Renders `record` into its final token vector: assembly followed by the
/// fixup pass registered on the schema.
///
/// Fields that fail to render are omitted and logged; run
/// [`Command::check`](crate::Command::check) first to surface them as
/// violations.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
/// use v8_args_core::{values, FieldDescriptor, OptionRecord, Schema, Value};
///
/// struct Bind {
///     path: String,
///     extension: String,
///     force: bool,
/// }
///
/// impl OptionRecord for Bind {
///     fn schema() -> &'static Schema<Self> {
///         static SCHEMA: LazyLock<Schema<Bind>> = LazyLock::new(|| {
///             Schema::<Bind>::builder()
///                 .field(FieldDescriptor::scalar("path", "/F"), |b| Value::from(&b.path))
///                 .field(FieldDescriptor::scalar("extension", "-Extension").optional(), |b| {
///                     Value::from(&b.extension)
///                 })
///                 .marker("/Bind")
///                 .field(FieldDescriptor::presence("force", "-force"), |b| b.force.into())
///                 .relocate_to_end("-Extension")
///                 .build()
///         });
///         &SCHEMA
///     }
/// }
///
/// let bind = Bind { path: "./repo".into(), extension: "ext".into(), force: true };
/// assert_eq!(values(&bind), ["/Bind", "/F ./repo", "-force", "-Extension ext"]);
/// ```
pub fn values<T: OptionRecord>(record: &T) -> Vec<String> {
    let assembled = assemble(record);
    for error in &assembled.errors {
        warn!(field = error.field(), %error, "omitting field from rendered arguments");
    }
    relocate_to_end(assembled.tokens, T::schema().relocations())
}
