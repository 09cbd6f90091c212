//! Option records for the 1C:Enterprise designer (`DESIGNER`).
//!
//! Every record here implements [`OptionRecord`](v8_args_core::OptionRecord)
//! and [`Command`](v8_args_core::Command), so a runner only needs
//! `command()`, `check()` and `values()`:
//!
//! ```
//! use v8_args_core::{Command, Invocation};
//! use v8_args_designer::{Repository, SupportRule};
//!
//! let repo = Repository::new("./repo").with_user("admin").with_password("pwd");
//! let create = repo
//!     .create()
//!     .with_no_bind(true)
//!     .with_support_rules(SupportRule::ObjectNotSupported, SupportRule::ObjectNotSupported);
//!
//! let line = Invocation::new(&create).unwrap().with_connection(["/F ./ib"]);
//! assert_eq!(
//!     line.to_string(),
//!     "DESIGNER /F ./ib /ConfigurationRepositoryCreate /DisableStartupDialogs \
//!      /DisableStartupMessages /ConfigurationRepositoryF ./repo \
//!      /ConfigurationRepositoryN admin /ConfigurationRepositoryP pwd \
//!      -AllowConfigurationChanges -ChangesAllowedRule ObjectNotSupported \
//!      -ChangesNotRecommendedRule ObjectNotSupported -NoBind",
//! );
//! ```
//!
//! [`AgentModeOptions`] additionally knows the endpoint the agent will listen
//! on and can wait for it with the readiness poller.

/// Implements [`Command`](v8_args_core::Command) for a repository command
/// record and adds the builders shared by all of them.
///
/// With `rules = path`, the named function adds cross-field violations on
/// top of the rendering check.
macro_rules! repository_command {
    ($ty:ident) => {
        repository_command!(@impl $ty, |record: &$ty| v8_args_core::check_rendering(record));
    };
    ($ty:ident, rules = $rules:path) => {
        repository_command!(@impl $ty, |record: &$ty| {
            let mut checker = v8_args_core::Checker::for_record(record);
            $rules(record, &mut checker);
            checker.finish()
        });
    };
    (@impl $ty:ident, $check:expr) => {
        impl v8_args_core::Command for $ty {
            fn command(&self) -> &str {
                crate::DESIGNER
            }

            fn check(&self) -> Result<(), v8_args_core::CheckError> {
                ($check)(self)
            }

            fn values(&self) -> Vec<String> {
                v8_args_core::values(self)
            }
        }

        impl $ty {
            /// Replaces the repository connection.
            pub fn with_repository(mut self, repository: crate::Repository) -> Self {
                self.repository = repository;
                self
            }

            /// Replaces the designer startup flags.
            pub fn with_designer(mut self, designer: crate::Designer) -> Self {
                self.designer = designer;
                self
            }
        }
    };
}

mod agent;
mod designer;
mod document;
mod repository;
mod repository_cache;
mod repository_cfg;
mod repository_report;
mod repository_users;
mod types;

pub use agent::AgentModeOptions;
pub use designer::{DEFAULT_AGENT_PORT, DESIGNER, Designer};
pub use document::DesignerCommand;
pub use repository::{Repository, RepositoryCreateOptions};
pub use repository_cache::{
    RepositoryClearCacheOptions, RepositoryClearGlobalCacheOptions,
    RepositoryClearLocalCacheOptions,
};
pub use repository_cfg::{
    RepositoryBindCfgOptions, RepositoryDumpCfgOptions, RepositoryUnbindCfgOptions,
    RepositoryUpdateCfgOptions,
};
pub use repository_report::RepositoryReportOptions;
pub use repository_users::{RepositoryAddUserOptions, RepositoryCopyUsersOptions};
pub use types::{GroupBy, RepositoryRight, SupportRule};
