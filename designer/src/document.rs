//! Designer commands as serializable documents.

use serde::{Deserialize, Serialize};
use v8_args_core::{CheckError, Command, FieldDescriptor, OptionRecord};

use crate::{
    AgentModeOptions, RepositoryAddUserOptions, RepositoryBindCfgOptions,
    RepositoryClearCacheOptions, RepositoryClearGlobalCacheOptions,
    RepositoryClearLocalCacheOptions, RepositoryCopyUsersOptions, RepositoryCreateOptions,
    RepositoryDumpCfgOptions, RepositoryReportOptions, RepositoryUnbindCfgOptions,
    RepositoryUpdateCfgOptions,
};

macro_rules! designer_commands {
    ($($variant:ident($ty:ty) => $name:literal),* $(,)?) => {
        /// Any designer command, tagged by `command` in documents.
        ///
        /// # Examples
        ///
        /// ```
        /// use v8_args_core::Command;
        /// use v8_args_designer::DesignerCommand;
        ///
        /// let doc = r#"{
        ///     "command": "repository_unbind_cfg",
        ///     "repository": { "path": "./repo", "user": "admin" },
        ///     "force": true
        /// }"#;
        /// let command: DesignerCommand = serde_json::from_str(doc).unwrap();
        ///
        /// assert_eq!(command.name(), "repository_unbind_cfg");
        /// assert_eq!(
        ///     command.values(),
        ///     [
        ///         "/ConfigurationRepositoryUnbindCfg",
        ///         "/ConfigurationRepositoryF ./repo",
        ///         "/ConfigurationRepositoryN admin",
        ///         "-force",
        ///     ],
        /// );
        /// ```
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(tag = "command", rename_all = "snake_case")]
        pub enum DesignerCommand {
            $($variant($ty),)*
        }

        impl DesignerCommand {
            /// Every document tag, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($name),*];

            /// Flattened field descriptors of the command tagged `name`.
            ///
            /// ```
            /// use v8_args_designer::DesignerCommand;
            ///
            /// let fields = DesignerCommand::descriptors("repository_unbind_cfg").unwrap();
            /// assert_eq!(fields.last().unwrap().flag, "-force");
            /// assert!(DesignerCommand::descriptors("load_cfg").is_none());
            /// ```
            pub fn descriptors(name: &str) -> Option<Vec<FieldDescriptor>> {
                match name {
                    $($name => Some(<$ty as OptionRecord>::schema().descriptors()),)*
                    _ => None,
                }
            }

            /// Document tag of the command.
            pub fn name(&self) -> &'static str {
                match self {
                    $(DesignerCommand::$variant(_) => $name,)*
                }
            }

            fn as_command(&self) -> &dyn Command {
                match self {
                    $(DesignerCommand::$variant(options) => options,)*
                }
            }
        }

        $(
            impl From<$ty> for DesignerCommand {
                fn from(options: $ty) -> Self {
                    DesignerCommand::$variant(options)
                }
            }
        )*
    };
}

designer_commands! {
    RepositoryCreate(RepositoryCreateOptions) => "repository_create",
    RepositoryBindCfg(RepositoryBindCfgOptions) => "repository_bind_cfg",
    RepositoryUnbindCfg(RepositoryUnbindCfgOptions) => "repository_unbind_cfg",
    RepositoryDumpCfg(RepositoryDumpCfgOptions) => "repository_dump_cfg",
    RepositoryUpdateCfg(RepositoryUpdateCfgOptions) => "repository_update_cfg",
    RepositoryReport(RepositoryReportOptions) => "repository_report",
    RepositoryClearGlobalCache(RepositoryClearGlobalCacheOptions) => "repository_clear_global_cache",
    RepositoryClearCache(RepositoryClearCacheOptions) => "repository_clear_cache",
    RepositoryClearLocalCache(RepositoryClearLocalCacheOptions) => "repository_clear_local_cache",
    RepositoryAddUser(RepositoryAddUserOptions) => "repository_add_user",
    RepositoryCopyUsers(RepositoryCopyUsersOptions) => "repository_copy_users",
    AgentMode(AgentModeOptions) => "agent_mode",
}

impl Command for DesignerCommand {
    fn command(&self) -> &str {
        self.as_command().command()
    }

    fn check(&self) -> Result<(), CheckError> {
        self.as_command().check()
    }

    fn values(&self) -> Vec<String> {
        self.as_command().values()
    }
}
