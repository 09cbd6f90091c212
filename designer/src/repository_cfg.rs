//! Binding an infobase to a repository and moving configurations in and out.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use v8_args_core::{FieldDescriptor, OptionRecord, Schema, Value};

use crate::{Designer, Repository};

impl Repository {
    /// `/ConfigurationRepositoryBindCfg` against this repository.
    pub fn bind(&self) -> RepositoryBindCfgOptions {
        RepositoryBindCfgOptions {
            designer: Designer::new(),
            repository: self.clone(),
            ..RepositoryBindCfgOptions::default()
        }
    }

    /// `/ConfigurationRepositoryUnbindCfg` against this repository.
    pub fn unbind(&self) -> RepositoryUnbindCfgOptions {
        RepositoryUnbindCfgOptions {
            designer: Designer::new(),
            repository: self.clone(),
            ..RepositoryUnbindCfgOptions::default()
        }
    }

    /// Saves the latest repository version to `file`.
    pub fn dump_cfg(&self, file: impl Into<String>) -> RepositoryDumpCfgOptions {
        RepositoryDumpCfgOptions {
            designer: Designer::new(),
            repository: self.clone(),
            file: file.into(),
            version: None,
        }
    }

    /// Updates the infobase configuration to the latest repository version.
    pub fn update_cfg(&self) -> RepositoryUpdateCfgOptions {
        RepositoryUpdateCfgOptions {
            designer: Designer::new(),
            repository: self.clone(),
            ..RepositoryUpdateCfgOptions::default()
        }
    }
}

/// `/ConfigurationRepositoryBindCfg`: binds an unbound configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryBindCfgOptions {
    pub designer: Designer,
    pub repository: Repository,
    /// Bind even if this user already has a configuration bound to the
    /// repository.
    pub force_bind_already_binded_user: bool,
    /// Replace a non-empty configuration with the repository's.
    pub force_replace_cfg: bool,
}

impl RepositoryBindCfgOptions {
    /// Sets both force flags.
    pub fn with_force(self, force: bool) -> Self {
        self.with_force_bind_already_binded_user(force)
            .with_force_replace_cfg(force)
    }

    pub fn with_force_bind_already_binded_user(mut self, force: bool) -> Self {
        self.force_bind_already_binded_user = force;
        self
    }

    pub fn with_force_replace_cfg(mut self, force: bool) -> Self {
        self.force_replace_cfg = force;
        self
    }
}

impl OptionRecord for RepositoryBindCfgOptions {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<RepositoryBindCfgOptions>> = LazyLock::new(|| {
            Schema::<RepositoryBindCfgOptions>::builder()
                .embed("designer", |o: &RepositoryBindCfgOptions| &o.designer)
                .embed("repository", |o: &RepositoryBindCfgOptions| &o.repository)
                .marker("/ConfigurationRepositoryBindCfg")
                .field(
                    FieldDescriptor::presence(
                        "force_bind_already_binded_user",
                        "-forceBindAlreadyBindedUser",
                    ),
                    |o| o.force_bind_already_binded_user.into(),
                )
                .field(
                    FieldDescriptor::presence("force_replace_cfg", "-forceReplaceCfg"),
                    |o| o.force_replace_cfg.into(),
                )
                .build()
        });
        &SCHEMA
    }
}

repository_command!(RepositoryBindCfgOptions);

/// `/ConfigurationRepositoryUnbindCfg`: unbinds the configuration.
///
/// Without `force`, the designer refuses while locked objects carry local
/// changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryUnbindCfgOptions {
    pub designer: Designer,
    pub repository: Repository,
    pub force: bool,
}

impl RepositoryUnbindCfgOptions {
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl OptionRecord for RepositoryUnbindCfgOptions {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<RepositoryUnbindCfgOptions>> = LazyLock::new(|| {
            Schema::<RepositoryUnbindCfgOptions>::builder()
                .embed("designer", |o: &RepositoryUnbindCfgOptions| &o.designer)
                .embed("repository", |o: &RepositoryUnbindCfgOptions| &o.repository)
                .marker("/ConfigurationRepositoryUnbindCfg")
                .field(FieldDescriptor::presence("force", "-force"), |o| o.force.into())
                .build()
        });
        &SCHEMA
    }
}

repository_command!(RepositoryUnbindCfgOptions);

/// `/ConfigurationRepositoryDumpCfg <file>`: saves a repository version to a
/// `.cf` file.
///
/// The command token carries the file, so this record has no marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryDumpCfgOptions {
    pub designer: Designer,
    pub repository: Repository,
    pub file: String,
    /// Repository version; `None` or `-1` is the latest.
    pub version: Option<i64>,
}

impl RepositoryDumpCfgOptions {
    pub fn with_version(mut self, version: i64) -> Self {
        self.version = Some(version);
        self
    }
}

impl OptionRecord for RepositoryDumpCfgOptions {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<RepositoryDumpCfgOptions>> = LazyLock::new(|| {
            Schema::<RepositoryDumpCfgOptions>::builder()
                .embed("designer", |o: &RepositoryDumpCfgOptions| &o.designer)
                .embed("repository", |o: &RepositoryDumpCfgOptions| &o.repository)
                .field(
                    FieldDescriptor::scalar("file", "/ConfigurationRepositoryDumpCfg"),
                    |o| Value::from(&o.file),
                )
                .field(FieldDescriptor::scalar("version", "-v").optional(), |o| {
                    o.version.into()
                })
                .build()
        });
        &SCHEMA
    }
}

repository_command!(RepositoryDumpCfgOptions);

/// `/ConfigurationRepositoryUpdateCfg`: updates the infobase configuration
/// from the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryUpdateCfgOptions {
    pub designer: Designer,
    pub repository: Repository,
    /// Version to fetch when the configuration is not bound; `None` or `-1`
    /// is the latest.
    pub version: Option<i64>,
    /// Fetch locked objects when needed.
    pub revised: bool,
    /// Confirm adding and deleting configuration objects.
    pub force: bool,
    /// XML file listing the objects to update; empty updates everything.
    pub objects: String,
}

impl RepositoryUpdateCfgOptions {
    pub fn with_version(mut self, version: i64) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_revised(mut self, revised: bool) -> Self {
        self.revised = revised;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_objects(mut self, objects_file: impl Into<String>) -> Self {
        self.objects = objects_file.into();
        self
    }
}

impl OptionRecord for RepositoryUpdateCfgOptions {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<RepositoryUpdateCfgOptions>> = LazyLock::new(|| {
            Schema::<RepositoryUpdateCfgOptions>::builder()
                .embed("designer", |o: &RepositoryUpdateCfgOptions| &o.designer)
                .embed("repository", |o: &RepositoryUpdateCfgOptions| &o.repository)
                .marker("/ConfigurationRepositoryUpdateCfg")
                .field(FieldDescriptor::scalar("version", "-v").optional(), |o| {
                    o.version.into()
                })
                .field(FieldDescriptor::presence("revised", "-revised"), |o| {
                    o.revised.into()
                })
                .field(FieldDescriptor::presence("force", "-force"), |o| o.force.into())
                .field(FieldDescriptor::scalar("objects", "-objects").optional(), |o| {
                    Value::from(&o.objects)
                })
                .build()
        });
        &SCHEMA
    }
}

repository_command!(RepositoryUpdateCfgOptions);
