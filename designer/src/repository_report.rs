//! Repository history report.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use v8_args_core::{FieldDescriptor, OptionRecord, Schema, Value};

use crate::{Designer, GroupBy, Repository};

impl Repository {
    /// Writes the repository history report to `file`.
    pub fn report(&self, file: impl Into<String>) -> RepositoryReportOptions {
        RepositoryReportOptions {
            designer: Designer::new(),
            repository: self.clone(),
            file: file.into(),
            ..RepositoryReportOptions::default()
        }
    }
}

/// `/ConfigurationRepositoryReport <file>`: builds a report of the
/// repository history.
///
/// Without a grouping the designer groups by version.
///
/// # Examples
///
/// ```
/// use v8_args_core::Command;
/// use v8_args_designer::Repository;
///
/// let report = Repository::new("./repo")
///     .with_extension("ext")
///     .report("history.mxl")
///     .with_versions(1, 2)
///     .group_by_object();
///
/// let values = report.values();
/// assert_eq!(
///     &values[values.len() - 5..],
///     [
///         "/ConfigurationRepositoryReport history.mxl",
///         "-NBegin 1",
///         "-NEnd 2",
///         "-GroupByObject",
///         "-Extension ext",
///     ],
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryReportOptions {
    pub designer: Designer,
    pub repository: Repository,
    pub file: String,
    /// First stored version in the report.
    pub number_begin: Option<i64>,
    /// Last stored version in the report.
    pub number_end: Option<i64>,
    pub group_by: Option<GroupBy>,
}

impl RepositoryReportOptions {
    pub fn with_versions(mut self, begin: i64, end: i64) -> Self {
        self.number_begin = Some(begin);
        self.number_end = Some(end);
        self
    }

    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = Some(group_by);
        self
    }

    pub fn group_by_object(self) -> Self {
        self.with_group_by(GroupBy::Object)
    }

    pub fn group_by_comment(self) -> Self {
        self.with_group_by(GroupBy::Comment)
    }
}

impl OptionRecord for RepositoryReportOptions {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<RepositoryReportOptions>> = LazyLock::new(|| {
            Schema::<RepositoryReportOptions>::builder()
                .embed("designer", |o: &RepositoryReportOptions| &o.designer)
                .embed("repository", |o: &RepositoryReportOptions| &o.repository)
                .field(
                    FieldDescriptor::scalar("file", "/ConfigurationRepositoryReport"),
                    |o| Value::from(&o.file),
                )
                .field(FieldDescriptor::scalar("number_begin", "-NBegin").optional(), |o| {
                    o.number_begin.into()
                })
                .field(FieldDescriptor::scalar("number_end", "-NEnd").optional(), |o| {
                    o.number_end.into()
                })
                .field(FieldDescriptor::encoded("group_by", "").optional(), |o| {
                    Value::encode_opt(o.group_by.as_ref())
                })
                .relocate_to_end("-Extension")
                .build()
        });
        &SCHEMA
    }
}

repository_command!(RepositoryReportOptions);
