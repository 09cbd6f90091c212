//! Repository connection and repository creation.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use v8_args_core::{Checker, FieldDescriptor, OptionRecord, Schema, Value, Violation};

use crate::{Designer, SupportRule};

/// User name the designer assumes when none is given.
pub(crate) const DEFAULT_REPOSITORY_USER: &str = "Администратор";

/// Connection to a configuration repository.
///
/// `-Extension` selects an extension's repository instead of the main
/// configuration's. Commands whose designer syntax puts it after the command
/// arguments relocate it to the end of the argument vector.
///
/// # Examples
///
/// ```
/// use v8_args_core::values;
/// use v8_args_designer::Repository;
///
/// let repo = Repository::new("./repo");
/// assert_eq!(
///     values(&repo),
///     ["/ConfigurationRepositoryF ./repo", "/ConfigurationRepositoryN Администратор"],
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Repository {
    /// Repository directory or `tcp://` address.
    pub path: String,
    /// Repository user; empty means the designer's default administrator.
    pub user: String,
    pub password: String,
    /// Extension name; empty targets the main configuration.
    pub extension: String,
}

impl Repository {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// `/ConfigurationRepositoryCreate` against this repository.
    pub fn create(&self) -> RepositoryCreateOptions {
        RepositoryCreateOptions {
            designer: Designer::new(),
            repository: self.clone(),
            ..RepositoryCreateOptions::default()
        }
    }
}

impl OptionRecord for Repository {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<Repository>> = LazyLock::new(|| {
            Schema::<Repository>::builder()
                .field(
                    FieldDescriptor::scalar("path", "/ConfigurationRepositoryF"),
                    |r| Value::from(&r.path),
                )
                .field(
                    FieldDescriptor::scalar("user", "/ConfigurationRepositoryN")
                        .with_default(DEFAULT_REPOSITORY_USER),
                    |r| Value::from(&r.user),
                )
                .field(
                    FieldDescriptor::scalar("password", "/ConfigurationRepositoryP").optional(),
                    |r| Value::from(&r.password),
                )
                .field(
                    FieldDescriptor::scalar("extension", "-Extension").optional(),
                    |r| Value::from(&r.extension),
                )
                .build()
        });
        &SCHEMA
    }
}

/// `/ConfigurationRepositoryCreate`: creates a repository from the
/// infobase configuration.
///
/// Allowing configuration changes requires both support rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryCreateOptions {
    pub designer: Designer,
    pub repository: Repository,
    /// Makes a configuration on locked vendor support editable.
    pub allow_configuration_changes: bool,
    /// Rule for objects the vendor allows changing.
    pub changes_allowed_rule: Option<SupportRule>,
    /// Rule for objects the vendor does not recommend changing.
    pub changes_not_recommended_rule: Option<SupportRule>,
    /// Do not bind the infobase to the new repository.
    pub no_bind: bool,
}

impl RepositoryCreateOptions {
    pub fn with_no_bind(mut self, no_bind: bool) -> Self {
        self.no_bind = no_bind;
        self
    }

    /// Allows configuration changes with the given support rules.
    pub fn with_support_rules(mut self, allowed: SupportRule, not_recommended: SupportRule) -> Self {
        self.allow_configuration_changes = true;
        self.changes_allowed_rule = Some(allowed);
        self.changes_not_recommended_rule = Some(not_recommended);
        self
    }

    fn rules(&self, checker: &mut Checker) {
        let rules_set =
            self.changes_allowed_rule.is_some() && self.changes_not_recommended_rule.is_some();
        checker.ensure(!self.allow_configuration_changes || rules_set, || {
            Violation::check("configuration changes must be set").with_context(
                "msg",
                "field changes_allowed_rule or changes_not_recommended_rule not set",
            )
        });
    }
}

impl OptionRecord for RepositoryCreateOptions {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<RepositoryCreateOptions>> = LazyLock::new(|| {
            Schema::<RepositoryCreateOptions>::builder()
                .embed("designer", |o: &RepositoryCreateOptions| &o.designer)
                .embed("repository", |o: &RepositoryCreateOptions| &o.repository)
                .marker("/ConfigurationRepositoryCreate")
                .field(
                    FieldDescriptor::presence(
                        "allow_configuration_changes",
                        "-AllowConfigurationChanges",
                    ),
                    |o| o.allow_configuration_changes.into(),
                )
                .field(
                    FieldDescriptor::encoded("changes_allowed_rule", "-ChangesAllowedRule")
                        .optional(),
                    |o| Value::encode_opt(o.changes_allowed_rule.as_ref()),
                )
                .field(
                    FieldDescriptor::encoded(
                        "changes_not_recommended_rule",
                        "-ChangesNotRecommendedRule",
                    )
                    .optional(),
                    |o| Value::encode_opt(o.changes_not_recommended_rule.as_ref()),
                )
                .field(FieldDescriptor::presence("no_bind", "-NoBind"), |o| {
                    o.no_bind.into()
                })
                .relocate_to_end("-Extension")
                .build()
        });
        &SCHEMA
    }
}

repository_command!(RepositoryCreateOptions, rules = RepositoryCreateOptions::rules);
