//! Declarative marshaling of typed option records into argument vectors.
//!
//! An option record declares, once per type, an ordered [`Schema`] of
//! [`FieldDescriptor`]s. Rendering walks that schema against a live record:
//!
//! - [`FieldDescriptor`] / [`FieldKind`]: the marshaling rule for one field
//!   (flag token, optional, default, kind).
//! - [`Schema`] / [`OptionRecord`]: the per-type table, with embedded
//!   records flattened in place.
//! - [`render_field`]: turns one descriptor and its [`Value`] into at most
//!   one token.
//! - [`assemble`] / [`values`]: renders a whole record, command marker
//!   first, then runs the [`relocate_to_end`] fixup pass.
//! - [`Command`] / [`Checker`] / [`CheckError`]: the uniform contract
//!   consumed by process runners, with aggregated validation.
//! - [`Invocation`]: a checked command line ready to execute.
//!
//! # Example
//!
//! ```
//! use std::sync::LazyLock;
//! use v8_args_core::*;
//!
//! #[derive(Clone, Default)]
//! struct Unbind {
//!     path: String,
//!     force: bool,
//! }
//!
//! impl OptionRecord for Unbind {
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: LazyLock<Schema<Unbind>> = LazyLock::new(|| {
//!             Schema::<Unbind>::builder()
//!                 .field(FieldDescriptor::scalar("path", "/ConfigurationRepositoryF"), |u| {
//!                     Value::from(&u.path)
//!                 })
//!                 .marker("/ConfigurationRepositoryUnbindCfg")
//!                 .field(FieldDescriptor::presence("force", "-force"), |u| u.force.into())
//!                 .build()
//!         });
//!         &SCHEMA
//!     }
//! }
//!
//! impl Command for Unbind {
//!     fn command(&self) -> &str { "DESIGNER" }
//!     fn check(&self) -> Result<(), CheckError> { check_rendering(self) }
//!     fn values(&self) -> Vec<String> { values(self) }
//! }
//!
//! let unbind = Unbind { path: "./repo".into(), force: true };
//! assert_eq!(
//!     Invocation::new(&unbind).unwrap().to_string(),
//!     "DESIGNER /ConfigurationRepositoryUnbindCfg /ConfigurationRepositoryF ./repo -force",
//! );
//!
//! // A required field left empty is a check failure, not a malformed token.
//! assert!(Unbind::default().check().is_err());
//! ```

mod assemble;
mod check;
mod command;
mod descriptor;
mod fixup;
mod render;
mod schema;
mod value;

pub use assemble::{Assembled, assemble, values};
pub use check::{CheckError, Checker, Violation, ViolationKind, check_rendering};
pub use command::{Command, Invocation};
pub use descriptor::{FieldDescriptor, FieldKind};
pub use fixup::relocate_to_end;
pub use render::{RenderError, render_field};
pub use schema::{OptionRecord, Schema, SchemaBuilder, Visitor};
pub use value::{Encode, EncodeError, Value};
