//! Repository user management.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use v8_args_core::{FieldDescriptor, OptionRecord, Schema, Value};

use crate::{Designer, Repository, RepositoryRight};

impl Repository {
    /// Creates repository user `user`. The connecting user needs
    /// administrative rights.
    pub fn add_user(
        &self,
        user: impl Into<String>,
        password: impl Into<String>,
        rights: RepositoryRight,
    ) -> RepositoryAddUserOptions {
        RepositoryAddUserOptions {
            designer: Designer::new(),
            repository: self.clone(),
            user: user.into(),
            password: password.into(),
            rights: Some(rights),
            restore_deleted_user: false,
        }
    }

    /// Copies users from the repository at `path`.
    pub fn copy_users(
        &self,
        path: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> RepositoryCopyUsersOptions {
        RepositoryCopyUsersOptions {
            designer: Designer::new(),
            repository: self.clone(),
            remote_path: path.into(),
            remote_user: user.into(),
            remote_password: password.into(),
            restore_deleted_user: false,
        }
    }

    /// Copies users from `source`, connecting with its credentials.
    pub fn copy_users_from_repository(&self, source: &Repository) -> RepositoryCopyUsersOptions {
        self.copy_users(&source.path, &source.user, &source.password)
    }
}

/// `/ConfigurationRepositoryAddUser`: creates a repository user.
///
/// An existing user with the same name is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryAddUserOptions {
    pub designer: Designer,
    pub repository: Repository,
    /// Name of the user to create.
    pub user: String,
    pub password: String,
    pub rights: Option<RepositoryRight>,
    /// Restore a deleted user with the same name instead.
    pub restore_deleted_user: bool,
}

impl RepositoryAddUserOptions {
    pub fn with_restore_deleted_user(mut self, restore: bool) -> Self {
        self.restore_deleted_user = restore;
        self
    }
}

impl OptionRecord for RepositoryAddUserOptions {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<RepositoryAddUserOptions>> = LazyLock::new(|| {
            Schema::<RepositoryAddUserOptions>::builder()
                .embed("designer", |o: &RepositoryAddUserOptions| &o.designer)
                .embed("repository", |o: &RepositoryAddUserOptions| &o.repository)
                .marker("/ConfigurationRepositoryAddUser")
                .field(FieldDescriptor::scalar("user", "-User"), |o| Value::from(&o.user))
                .field(FieldDescriptor::scalar("password", "-Pwd").optional(), |o| {
                    Value::from(&o.password)
                })
                .field(FieldDescriptor::encoded("rights", "-Rights"), |o| {
                    Value::encode_opt(o.rights.as_ref())
                })
                .field(
                    FieldDescriptor::presence("restore_deleted_user", "-RestoreDeletedUser"),
                    |o| o.restore_deleted_user.into(),
                )
                .relocate_to_end("-Extension")
                .build()
        });
        &SCHEMA
    }
}

repository_command!(RepositoryAddUserOptions);

/// `/ConfigurationRepositoryCopyUsers`: copies users from another
/// repository. Deleted users are not copied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryCopyUsersOptions {
    pub designer: Designer,
    pub repository: Repository,
    /// Path of the repository to copy from.
    pub remote_path: String,
    pub remote_user: String,
    pub remote_password: String,
    pub restore_deleted_user: bool,
}

impl RepositoryCopyUsersOptions {
    /// Points the copy at `source` and its credentials.
    pub fn from_repository(mut self, source: &Repository) -> Self {
        self.remote_path = source.path.clone();
        self.remote_user = source.user.clone();
        self.remote_password = source.password.clone();
        self
    }

    pub fn with_restore_deleted_user(mut self, restore: bool) -> Self {
        self.restore_deleted_user = restore;
        self
    }
}

impl OptionRecord for RepositoryCopyUsersOptions {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<RepositoryCopyUsersOptions>> = LazyLock::new(|| {
            Schema::<RepositoryCopyUsersOptions>::builder()
                .embed("designer", |o: &RepositoryCopyUsersOptions| &o.designer)
                .embed("repository", |o: &RepositoryCopyUsersOptions| &o.repository)
                .marker("/ConfigurationRepositoryCopyUsers")
                .field(FieldDescriptor::scalar("remote_path", "-Path"), |o| {
                    Value::from(&o.remote_path)
                })
                .field(FieldDescriptor::scalar("remote_user", "-User"), |o| {
                    Value::from(&o.remote_user)
                })
                .field(FieldDescriptor::scalar("remote_password", "-Pwd").optional(), |o| {
                    Value::from(&o.remote_password)
                })
                .field(
                    FieldDescriptor::presence("restore_deleted_user", "-RestoreDeletedUser"),
                    |o| o.restore_deleted_user.into(),
                )
                .relocate_to_end("-Extension")
                .build()
        });
        &SCHEMA
    }
}

repository_command!(RepositoryCopyUsersOptions);
