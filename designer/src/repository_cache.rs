//! Repository cache maintenance.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use v8_args_core::{OptionRecord, Schema};

use crate::{Designer, Repository};

impl Repository {
    pub fn clear_global_cache(&self) -> RepositoryClearGlobalCacheOptions {
        RepositoryClearGlobalCacheOptions {
            designer: Designer::new(),
            repository: self.clone(),
        }
    }

    pub fn clear_cache(&self) -> RepositoryClearCacheOptions {
        RepositoryClearCacheOptions {
            designer: Designer::new(),
            repository: self.clone(),
        }
    }

    pub fn clear_local_cache(&self) -> RepositoryClearLocalCacheOptions {
        RepositoryClearLocalCacheOptions {
            designer: Designer::new(),
            repository: self.clone(),
        }
    }
}

/// `/ConfigurationRepositoryClearGlobalCache`: clears the repository's
/// global version cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryClearGlobalCacheOptions {
    pub designer: Designer,
    pub repository: Repository,
}

impl OptionRecord for RepositoryClearGlobalCacheOptions {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<RepositoryClearGlobalCacheOptions>> =
            LazyLock::new(|| {
                Schema::<RepositoryClearGlobalCacheOptions>::builder()
                    .embed("designer", |o: &RepositoryClearGlobalCacheOptions| &o.designer)
                    .embed("repository", |o: &RepositoryClearGlobalCacheOptions| {
                        &o.repository
                    })
                    .marker("/ConfigurationRepositoryClearGlobalCache")
                    .build()
            });
        &SCHEMA
    }
}

repository_command!(RepositoryClearGlobalCacheOptions);

/// `/ConfigurationRepositoryClearCache`: clears the local repository
/// database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryClearCacheOptions {
    pub designer: Designer,
    pub repository: Repository,
}

impl OptionRecord for RepositoryClearCacheOptions {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<RepositoryClearCacheOptions>> = LazyLock::new(|| {
            Schema::<RepositoryClearCacheOptions>::builder()
                .embed("designer", |o: &RepositoryClearCacheOptions| &o.designer)
                .embed("repository", |o: &RepositoryClearCacheOptions| &o.repository)
                .marker("/ConfigurationRepositoryClearCache")
                .build()
        });
        &SCHEMA
    }
}

repository_command!(RepositoryClearCacheOptions);

/// `/ConfigurationRepositoryClearLocalCache`: clears the local version
/// cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryClearLocalCacheOptions {
    pub designer: Designer,
    pub repository: Repository,
}

impl OptionRecord for RepositoryClearLocalCacheOptions {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<RepositoryClearLocalCacheOptions>> = LazyLock::new(|| {
            Schema::<RepositoryClearLocalCacheOptions>::builder()
                .embed("designer", |o: &RepositoryClearLocalCacheOptions| &o.designer)
                .embed("repository", |o: &RepositoryClearLocalCacheOptions| &o.repository)
                .marker("/ConfigurationRepositoryClearLocalCache")
                .build()
        });
        &SCHEMA
    }
}

repository_command!(RepositoryClearLocalCacheOptions);

#[cfg(test)]
mod tests {
    use v8_args_core::Command;

    use super::*;

    #[test]
    fn test_each_cache_command_has_its_own_marker() {
        let repo = Repository::new("./repo");
        let firsts: Vec<String> = [
            repo.clear_global_cache().values(),
            repo.clear_cache().values(),
            repo.clear_local_cache().values(),
        ]
        .into_iter()
        .map(|values| values[0].clone())
        .collect();
        assert_eq!(
            firsts,
            [
                "/ConfigurationRepositoryClearGlobalCache",
                "/ConfigurationRepositoryClearCache",
                "/ConfigurationRepositoryClearLocalCache",
            ]
        );
    }

    #[test]
    fn test_extension_keeps_declared_position() {
        let clear = RepositoryClearCacheOptions::default()
            .with_repository(Repository::new("./repo").with_extension("ext"));
        assert_eq!(
            clear.values(),
            [
                "/ConfigurationRepositoryClearCache",
                "/ConfigurationRepositoryF ./repo",
                "/ConfigurationRepositoryN Администратор",
                "-Extension ext",
            ]
        );
    }

    #[test]
    fn test_clear_cache_requires_repository_path() {
        assert!(RepositoryClearLocalCacheOptions::default().check().is_err());
        assert!(Repository::new("./repo").clear_local_cache().check().is_ok());
    }
}
