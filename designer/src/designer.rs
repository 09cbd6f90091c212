//! Startup flags shared by every designer command.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use v8_args_core::{FieldDescriptor, OptionRecord, Schema};

/// Name of the external command every record in this crate renders for.
pub const DESIGNER: &str = "DESIGNER";

/// Port the designer agent listens on when `/AgentPort` is not given.
pub const DEFAULT_AGENT_PORT: u16 = 1543;

/// Designer startup flags, embedded at the head of every repository command.
///
/// `Default` leaves every flag off; [`Designer::new`] is what batch runs
/// normally want.
///
/// # Examples
///
/// ```
/// use v8_args_core::assemble;
/// use v8_args_designer::Designer;
///
/// let tokens = assemble(&Designer::new()).tokens;
/// assert_eq!(tokens, ["/DisableStartupDialogs", "/DisableStartupMessages"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Designer {
    pub disable_startup_dialogs: bool,
    pub disable_startup_messages: bool,
    pub visible: bool,
}

impl Designer {
    /// Non-interactive startup: dialogs and startup messages suppressed.
    pub fn new() -> Self {
        Self {
            disable_startup_dialogs: true,
            disable_startup_messages: true,
            visible: false,
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

impl OptionRecord for Designer {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<Designer>> = LazyLock::new(|| {
            Schema::<Designer>::builder()
                .field(
                    FieldDescriptor::presence("disable_startup_dialogs", "/DisableStartupDialogs"),
                    |d| d.disable_startup_dialogs.into(),
                )
                .field(
                    FieldDescriptor::presence("disable_startup_messages", "/DisableStartupMessages"),
                    |d| d.disable_startup_messages.into(),
                )
                .field(FieldDescriptor::presence("visible", "/Visible"), |d| {
                    d.visible.into()
                })
                .build()
        });
        &SCHEMA
    }
}
