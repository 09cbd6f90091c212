//! Statically declared schema tables and the schema extractor.
//!
//! Each record type builds its [`Schema`] once, behind a
//! [`LazyLock`](std::sync::LazyLock), and hands it out through
//! [`OptionRecord::schema`]. A schema is an ordered list of entries: the
//! command marker, fields (a descriptor plus an accessor returning the live
//! [`Value`]) and embedded records. Embedded records are flattened in place,
//! depth-first, both when extracting descriptors and when walking values.
//!
//! Embedding is structural. A record cannot embed itself, directly or
//! through another record, because such a type would have infinite size and
//! is rejected by the compiler.

use crate::{FieldDescriptor, FieldKind, Value};

/// A typed, composable option record with a static marshaling schema.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
/// use v8_args_core::{FieldDescriptor, OptionRecord, Schema, Value};
///
/// struct Target {
///     path: String,
///     verbose: bool,
/// }
///
/// impl OptionRecord for Target {
///     fn schema() -> &'static Schema<Self> {
///         static SCHEMA: LazyLock<Schema<Target>> = LazyLock::new(|| {
///             Schema::<Target>::builder()
///                 .field(FieldDescriptor::scalar("path", "/F"), |t| Value::from(&t.path))
///                 .field(FieldDescriptor::presence("verbose", "/Visible"), |t| t.verbose.into())
///                 .build()
///         });
///         &SCHEMA
///     }
/// }
///
/// let names: Vec<_> = Target::schema().descriptors().iter().map(|d| d.name).collect();
/// assert_eq!(names, ["path", "verbose"]);
/// ```
pub trait OptionRecord: Sized + 'static {
    /// Returns the schema table shared by every instance of the type.
    fn schema() -> &'static Schema<Self>;
}

/// Receives every non-composed descriptor of a record together with its value,
/// in schema order.
pub trait Visitor {
    fn visit(&mut self, descriptor: &FieldDescriptor, value: Value<'_>);
}

type Accessor<T> = Box<dyn for<'a> Fn(&'a T) -> Value<'a> + Send + Sync>;
type Walker<T> = Box<dyn Fn(&T, &mut dyn Visitor) + Send + Sync>;

enum Entry<T> {
    Marker(FieldDescriptor),
    Field {
        descriptor: FieldDescriptor,
        read: Accessor<T>,
    },
    Embed {
        descriptor: FieldDescriptor,
        flatten: fn(&mut Vec<FieldDescriptor>),
        walk: Walker<T>,
    },
}

/// Ordered marshaling table for record type `T`.
pub struct Schema<T> {
    entries: Vec<Entry<T>>,
    relocations: Vec<&'static str>,
}

impl<T: 'static> Schema<T> {
    /// Starts declaring a schema.
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder {
            entries: Vec::new(),
            relocations: Vec::new(),
        }
    }

    /// Extracts the flattened descriptor list.
    ///
    /// Declaration order is preserved and every embedded record contributes
    /// its own flattened list at the position it was embedded.
    pub fn descriptors(&self) -> Vec<FieldDescriptor> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<FieldDescriptor>) {
        for entry in &self.entries {
            match entry {
                Entry::Marker(descriptor) | Entry::Field { descriptor, .. } => {
                    out.push(*descriptor)
                }
                Entry::Embed { flatten, .. } => flatten(out),
            }
        }
    }

    /// Names of the records embedded directly in this schema.
    pub fn embedded(&self) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Embed { descriptor, .. } => Some(descriptor.name),
                _ => None,
            })
            .collect()
    }

    /// Token of the first command marker, searching embedded records too.
    pub fn command_token(&self) -> Option<&'static str> {
        self.descriptors()
            .into_iter()
            .find(|d| d.kind == FieldKind::CommandMarker)
            .map(|d| d.flag)
    }

    /// Token prefixes the fixup pass moves to the end of the rendered vector.
    pub fn relocations(&self) -> &[&'static str] {
        &self.relocations
    }

    /// Feeds every descriptor and its live value to `visitor`.
    pub fn walk(&self, record: &T, visitor: &mut dyn Visitor) {
        for entry in &self.entries {
            match entry {
                Entry::Marker(descriptor) => visitor.visit(descriptor, Value::Flag(true)),
                Entry::Field { descriptor, read } => visitor.visit(descriptor, read(record)),
                Entry::Embed { walk, .. } => walk(record, &mut *visitor),
            }
        }
    }
}

impl<T> std::fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries: Vec<&FieldDescriptor> = self
            .entries
            .iter()
            .map(|entry| match entry {
                Entry::Marker(descriptor)
                | Entry::Field { descriptor, .. }
                | Entry::Embed { descriptor, .. } => descriptor,
            })
            .collect();
        f.debug_struct("Schema")
            .field("entries", &entries)
            .field("relocations", &self.relocations)
            .finish()
    }
}

/// Builder returned by [`Schema::builder`].
pub struct SchemaBuilder<T> {
    entries: Vec<Entry<T>>,
    relocations: Vec<&'static str>,
}

impl<T: 'static> SchemaBuilder<T> {
    /// Declares the command marker. Its token is always rendered first.
    pub fn marker(mut self, token: &'static str) -> Self {
        self.entries.push(Entry::Marker(FieldDescriptor::marker(token)));
        self
    }

    /// Declares a field and the accessor producing its live value.
    ///
    /// # Panics
    ///
    /// Panics when `descriptor` is a marker or composed descriptor; use
    /// [`marker`](Self::marker) and [`embed`](Self::embed) for those.
    pub fn field(
        mut self,
        descriptor: FieldDescriptor,
        read: impl for<'a> Fn(&'a T) -> Value<'a> + Send + Sync + 'static,
    ) -> Self {
        assert!(
            !matches!(
                descriptor.kind,
                FieldKind::CommandMarker | FieldKind::Composed
            ),
            "field `{}` must be declared with marker() or embed()",
            descriptor.name
        );
        self.entries.push(Entry::Field {
            descriptor,
            read: Box::new(read),
        });
        self
    }

    /// Embeds another record; its fields are spliced in at this position.
    pub fn embed<U: OptionRecord>(
        mut self,
        name: &'static str,
        get: impl Fn(&T) -> &U + Send + Sync + 'static,
    ) -> Self {
        let walk: Walker<T> = Box::new(move |record: &T, visitor: &mut dyn Visitor| {
            U::schema().walk(get(record), visitor)
        });
        self.entries.push(Entry::Embed {
            descriptor: FieldDescriptor::composed(name),
            flatten: flatten_record::<U>,
            walk,
        });
        self
    }

    /// Registers a token prefix the fixup pass moves to the end.
    pub fn relocate_to_end(mut self, prefix: &'static str) -> Self {
        self.relocations.push(prefix);
        self
    }

    pub fn build(self) -> Schema<T> {
        Schema {
            entries: self.entries,
            relocations: self.relocations,
        }
    }
}

fn flatten_record<U: OptionRecord>(out: &mut Vec<FieldDescriptor>) {
    U::schema().flatten_into(out);
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;

    struct Inner {
        user: String,
    }

    impl OptionRecord for Inner {
        fn schema() -> &'static Schema<Self> {
            static SCHEMA: LazyLock<Schema<Inner>> = LazyLock::new(|| {
                Schema::<Inner>::builder()
                    .field(FieldDescriptor::scalar("user", "-User"), |r| {
                        Value::from(&r.user)
                    })
                    .build()
            });
            &SCHEMA
        }
    }

    struct Middle {
        inner: Inner,
        force: bool,
    }

    impl OptionRecord for Middle {
        fn schema() -> &'static Schema<Self> {
            static SCHEMA: LazyLock<Schema<Middle>> = LazyLock::new(|| {
                Schema::<Middle>::builder()
                    .embed("inner", |r: &Middle| &r.inner)
                    .field(FieldDescriptor::presence("force", "-force"), |r| {
                        r.force.into()
                    })
                    .build()
            });
            &SCHEMA
        }
    }

    struct Outer {
        path: String,
        middle: Middle,
    }

    impl OptionRecord for Outer {
        fn schema() -> &'static Schema<Self> {
            static SCHEMA: LazyLock<Schema<Outer>> = LazyLock::new(|| {
                Schema::<Outer>::builder()
                    .field(FieldDescriptor::scalar("path", "-Path"), |r| {
                        Value::from(&r.path)
                    })
                    .marker("/Command")
                    .embed("middle", |r: &Outer| &r.middle)
                    .relocate_to_end("-Path")
                    .build()
            });
            &SCHEMA
        }
    }

    struct Collect(Vec<(&'static str, bool)>);

    impl Visitor for Collect {
        fn visit(&mut self, descriptor: &FieldDescriptor, value: Value<'_>) {
            self.0.push((descriptor.name, value.is_empty()));
        }
    }

    #[test]
    fn test_descriptors_flatten_depth_first_in_place() {
        let names: Vec<_> = Outer::schema()
            .descriptors()
            .iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, ["path", "command", "user", "force"]);
    }

    #[test]
    fn test_descriptors_are_stable_across_calls() {
        assert_eq!(Outer::schema().descriptors(), Outer::schema().descriptors());
    }

    #[test]
    fn test_walk_visits_nested_values() {
        let record = Outer {
            path: "./repo".to_string(),
            middle: Middle {
                inner: Inner {
                    user: String::new(),
                },
                force: true,
            },
        };
        let mut collect = Collect(Vec::new());
        Outer::schema().walk(&record, &mut collect);
        assert_eq!(
            collect.0,
            vec![
                ("path", false),
                ("command", false),
                ("user", true),
                ("force", false)
            ]
        );
    }

    #[test]
    fn test_command_token_and_embedded_names() {
        assert_eq!(Outer::schema().command_token(), Some("/Command"));
        assert_eq!(Outer::schema().embedded(), ["middle"]);
        assert_eq!(Middle::schema().command_token(), None);
        assert_eq!(Outer::schema().relocations(), ["-Path"]);
    }

    #[test]
    #[should_panic(expected = "must be declared with marker() or embed()")]
    fn test_field_rejects_marker_descriptor() {
        let _ = Schema::<Inner>::builder()
            .field(FieldDescriptor::marker("/X"), |_| Value::Absent);
    }
}
